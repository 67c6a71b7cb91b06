/// Build the full application over a fresh in-memory database with
/// `User One` already inserted
///
/// Evaluates to `(service, db, user_one)`.
#[macro_export]
macro_rules! service {
    () => {{
        let config = $crate::testing::setup::config();
        let db = $crate::testing::setup::database().await;
        let hasher = $crate::testing::setup::password_hasher(&config);
        let issuer = $crate::testing::setup::token_issuer(&config);
        let user_one = $crate::testing::setup::user_one(&db, &hasher, &issuer).await;
        let metrics = $crate::metrics::AppMetrics::new();

        let app = ::actix_web::App::new()
            .wrap($crate::metrics::MetricsMiddleware::new(metrics.clone()))
            .app_data(::actix_web::web::Data::new(db.clone()))
            .app_data(::actix_web::web::Data::new(hasher))
            .app_data(::actix_web::web::Data::new(issuer))
            .app_data(::actix_web::web::Data::new(config.avatar.clone()))
            .app_data(::actix_web::web::Data::new(metrics))
            .app_data(::actix_web::web::Data::new(config))
            .configure($crate::router::route);

        let service = ::actix_web::test::init_service(app).await;

        (service, db, user_one)
    }};
}
