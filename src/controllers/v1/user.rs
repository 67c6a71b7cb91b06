use serde_json::{Map, Value};

use crate::metrics::AppMetrics;
use crate::middlewares::v1::auth::Auth;
use crate::prelude::*;
use crate::requests::v1::user::{SignupRequest, UpdateProfileRequest};
use crate::responses::v1::auth::Authenticated;
use crate::responses::v1::user::User;
use crate::security::{PasswordHasher, TokenIssuer};
use crate::services;

/// Sign up
///
/// Creates the account and answers with its first session token.
///
/// Fail if
/// - name is empty
/// - email is invalid or already registered
/// - password is shorter than 7 characters or contains "password"
#[utoipa::path(
    tag = "User",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = Authenticated),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    ),
)]
#[post("/users")]
pub async fn store(
    db: Data<DatabaseConnection>,
    hasher: Data<PasswordHasher>,
    issuer: Data<TokenIssuer>,
    metrics: Data<AppMetrics>,
    Json(request): Json<SignupRequest>,
) -> Result<impl Responder, Error> {
    let response = services::v1::user::store::store(&db, &hasher, &issuer, &metrics, request).await?;

    Ok((response, StatusCode::CREATED))
}

/// Current user profile
#[utoipa::path(
    tag = "User",
    security(("token" = [])),
    responses(
        User,
        (status = 401, description = "Please authenticate", body = ErrorBody),
    ),
)]
#[get("/users/me")]
pub async fn show(auth: Auth) -> impl Responder {
    services::v1::user::show::show(auth).await
}

/// Update the current user's profile
///
/// Only `name`, `email` and `password` may be sent; any other key fails the
/// whole request with "Invalid updates!".
#[utoipa::path(
    tag = "User",
    security(("token" = [])),
    request_body = UpdateProfileRequest,
    responses(
        User,
        (status = 400, description = "Invalid updates or validation failed", body = ErrorBody),
        (status = 401, description = "Please authenticate", body = ErrorBody),
    ),
)]
#[patch("/users/me")]
pub async fn update(
    db: Data<DatabaseConnection>,
    hasher: Data<PasswordHasher>,
    auth: Auth,
    Json(body): Json<Map<String, Value>>,
) -> Result<User, Error> {
    services::v1::user::update::update(&db, &hasher, auth, body).await
}

/// Delete the current user
///
/// Removes the account with every session and answers with the profile as it
/// was before deletion.
#[utoipa::path(
    tag = "User",
    security(("token" = [])),
    responses(
        User,
        (status = 401, description = "Please authenticate", body = ErrorBody),
    ),
)]
#[delete("/users/me")]
pub async fn delete(
    db: Data<DatabaseConnection>,
    metrics: Data<AppMetrics>,
    auth: Auth,
) -> Result<User, Error> {
    services::v1::user::delete::delete(&db, &metrics, auth).await
}
