use crate::metrics::AppMetrics;
use crate::middlewares::v1::auth::Auth;
use crate::prelude::*;
use crate::requests::v1::auth::LoginRequest;
use crate::responses::v1::auth::Authenticated;
use crate::security::{PasswordHasher, TokenIssuer};
use crate::services;

/// Log in
///
/// Appends a new token to the user's sessions; earlier tokens stay valid.
///
/// Fail if email is unknown or password is incorrect
#[utoipa::path(
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = Authenticated),
        (status = 400, description = "Unable to login", body = ErrorBody),
    ),
)]
#[post("/users/login")]
pub async fn login(
    db: Data<DatabaseConnection>,
    hasher: Data<PasswordHasher>,
    issuer: Data<TokenIssuer>,
    metrics: Data<AppMetrics>,
    Json(request): Json<LoginRequest>,
) -> Result<Authenticated, Error> {
    services::v1::auth::login::login(&db, &hasher, &issuer, &metrics, request).await
}

/// Log out of the current session
#[utoipa::path(
    tag = "Auth",
    security(("token" = [])),
    responses(
        (status = 200, description = "OK"),
        (status = 401, description = "Please authenticate", body = ErrorBody),
    ),
)]
#[post("/users/logout")]
pub async fn logout(
    db: Data<DatabaseConnection>,
    metrics: Data<AppMetrics>,
    auth: Auth,
) -> Result<Success, Error> {
    services::v1::auth::logout::logout(&db, &metrics, auth).await
}

/// Log out of every session
#[utoipa::path(
    tag = "Auth",
    security(("token" = [])),
    responses(
        (status = 200, description = "OK"),
        (status = 401, description = "Please authenticate", body = ErrorBody),
    ),
)]
#[post("/users/logoutAll")]
pub async fn logout_all(
    db: Data<DatabaseConnection>,
    metrics: Data<AppMetrics>,
    auth: Auth,
) -> Result<Success, Error> {
    services::v1::auth::logout_all::logout_all(&db, &metrics, auth).await
}
