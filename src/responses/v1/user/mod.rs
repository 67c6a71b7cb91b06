use actix_web::body::BoxBody;
use actix_web::{HttpRequest, HttpResponse, Responder};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoResponses, ToSchema};
use uuid::Uuid;

/// Public view of a user; password, tokens and avatar bytes never leave the
/// service through this type.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, IntoResponses, PartialEq, Eq, Hash)]
#[response(status = 200, description = "OK")]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema()]
    pub id: Uuid,
    #[schema(example = "User One")]
    pub name: String,
    #[schema(example = "userone@example.pl")]
    pub email: String,
    #[schema(example = false)]
    pub has_avatar: bool,
    #[schema(example = "2024-01-01T00:00:00")]
    pub created_at: NaiveDateTime,
    #[schema(example = "2024-01-01T00:00:00")]
    pub updated_at: NaiveDateTime,
}

impl Responder for User {
    type Body = BoxBody;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::Ok().json(self)
    }
}
