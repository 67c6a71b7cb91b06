use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::{controllers, errors, requests, responses};

/// Registers the `token` bearer scheme referenced by `security(("token" = []))`
pub struct Authentication;

impl Modify for Authentication {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Accounts", description = "User accounts, sessions and avatars"),
    tags(
        (name = "User"),
        (name = "Auth"),
        (name = "Avatar"),
        (name = "Health"),
    ),
    modifiers(&Authentication),
    paths(
        controllers::v1::user::store,
        controllers::v1::user::show,
        controllers::v1::user::update,
        controllers::v1::user::delete,

        controllers::v1::auth::login,
        controllers::v1::auth::logout,
        controllers::v1::auth::logout_all,

        controllers::v1::avatar::upload,
        controllers::v1::avatar::remove,
        controllers::v1::avatar::show,

        controllers::health::health,
        controllers::health::health_db,
    ),
    components(schemas(
        requests::v1::auth::LoginRequest,
        requests::v1::user::SignupRequest,
        requests::v1::user::UpdateProfileRequest,

        responses::v1::user::User,
        responses::v1::auth::Authenticated,

        errors::ErrorBody,

        controllers::health::LivenessResponse,
        controllers::health::HealthResponse,
    )),
)]
pub struct Definition;
