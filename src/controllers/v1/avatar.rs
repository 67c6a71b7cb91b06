use actix_multipart::Multipart;

use crate::config::AvatarConfig;
use crate::metrics::AppMetrics;
use crate::middlewares::v1::auth::Auth;
use crate::prelude::*;
use crate::services;

/// Upload avatar
///
/// Multipart body with a single `avatar` file field.
///
/// Fail if
/// - the field is not named `avatar`
/// - the file is not a jpg, jpeg or png
/// - the file is larger than the configured limit
#[utoipa::path(
    tag = "Avatar",
    security(("token" = [])),
    request_body(content_type = "multipart/form-data", description = "`avatar` file field"),
    responses(
        (status = 200, description = "OK"),
        (status = 400, description = "Missing, oversized or unsupported file", body = ErrorBody),
        (status = 401, description = "Please authenticate", body = ErrorBody),
    ),
)]
#[post("/users/me/avatar")]
pub async fn upload(
    db: Data<DatabaseConnection>,
    config: Data<AvatarConfig>,
    metrics: Data<AppMetrics>,
    auth: Auth,
    payload: Multipart,
) -> Result<Success, Error> {
    services::v1::avatar::upload::upload(&db, &config, &metrics, auth, payload).await
}

/// Remove avatar
#[utoipa::path(
    tag = "Avatar",
    security(("token" = [])),
    responses(
        (status = 200, description = "OK"),
        (status = 401, description = "Please authenticate", body = ErrorBody),
    ),
)]
#[delete("/users/me/avatar")]
pub async fn remove(db: Data<DatabaseConnection>, auth: Auth) -> Result<Success, Error> {
    services::v1::avatar::remove::remove(&db, auth).await
}

/// Download a user's avatar
#[utoipa::path(
    tag = "Avatar",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/*"),
        (status = 404, description = "User or avatar not found", body = ErrorBody),
    ),
)]
#[get("/users/{id}/avatar")]
pub async fn show(db: Data<DatabaseConnection>, id: Path<Uuid>) -> Result<HttpResponse, Error> {
    services::v1::avatar::show::show(&db, id.into_inner()).await
}
