use actix_web::web::{JsonConfig, ServiceConfig};
use utoipa::OpenApi;
use utoipa_swagger_ui::{SwaggerUi, Url};

use crate::api::Definition;
use crate::config::ApiConfig;
use crate::controllers;
use crate::prelude::*;

pub fn route(app: &mut ServiceConfig) {
    app.app_data(JsonConfig::default().error_handler(|err, _| {
        ::tracing::debug!(error = %err, "Rejected JSON body");

        Error::bad_request(err.to_string()).into()
    }));

    // User
    app.service(controllers::v1::user::store);
    app.service(controllers::v1::user::show);
    app.service(controllers::v1::user::update);
    app.service(controllers::v1::user::delete);
    // Auth
    app.service(controllers::v1::auth::login);
    app.service(controllers::v1::auth::logout);
    app.service(controllers::v1::auth::logout_all);
    // Avatar
    app.service(controllers::v1::avatar::upload);
    app.service(controllers::v1::avatar::remove);
    app.service(controllers::v1::avatar::show);

    app.service(controllers::health::health);
    app.service(controllers::health::health_db);
    app.service(controllers::metrics::metrics);
}

/// Swagger UI under `api.swagger_path`, nothing when disabled
pub fn docs(api: &ApiConfig) -> impl FnOnce(&mut ServiceConfig) + use<> {
    let enabled = api.swagger_enabled;
    let path = api.swagger_path.trim_end_matches('/').to_string();

    move |app: &mut ServiceConfig| {
        if !enabled {
            return;
        }

        // must be registered after every other route
        app.service(web::redirect(path.clone(), format!("{path}/")));
        app.service(SwaggerUi::new(format!("{path}/{{_:.*}}")).urls(vec![(
            Url::new("Accounts", "/api.json"),
            Definition::openapi(),
        )]));
    }
}
