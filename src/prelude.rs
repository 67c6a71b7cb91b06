//! Names nearly every controller and service reaches for

pub use actix_web::http::StatusCode;
pub use actix_web::web::{self, Data, Json, Path};
pub use actix_web::{HttpRequest, HttpResponse, Responder};
pub use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, SqlErr};
pub use uuid::Uuid;

pub use crate::errors::{Error, ErrorBody, Success, Validation};
pub use crate::helpers::now;
