use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use actix_web::dev::Payload;
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};
use sea_orm::DatabaseConnection;

use crate::entities::v1::{tokens, users};
use crate::errors::Error;
use crate::security::TokenIssuer;

/// The authenticated user and the session token presented with the request
///
/// Extracting `Auth` fails with 401 unless the `Authorization: Bearer` token
/// has a valid signature, is unexpired, and is still part of the user's
/// token collection (logout removes it from there).
#[derive(Clone, Debug)]
pub struct Auth {
    pub user: users::Model,
    pub token: tokens::Model,
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    let (scheme, token) = header.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

impl FromRequest for Auth {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let start = Instant::now();

        let db = match req.app_data::<Data<DatabaseConnection>>().cloned() {
            Some(db) => db,
            None => {
                return Box::pin(async move {
                    tracing::error!("Failed to get database connection");

                    Err(Error::Internal("Failed to get database connection".to_string()))
                });
            }
        };

        let issuer = match req.app_data::<Data<TokenIssuer>>().cloned() {
            Some(issuer) => issuer,
            None => {
                return Box::pin(async move {
                    tracing::error!("Failed to get token issuer");

                    Err(Error::Internal("Failed to get token issuer".to_string()))
                });
            }
        };

        let token = match bearer_token(req) {
            Some(token) => token,
            None => {
                return Box::pin(async move {
                    tracing::debug!("Missing or malformed authorization header");

                    Err(Error::Unauthorized)
                });
            }
        };

        Box::pin(async move {
            let claims = match issuer.decode(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected bearer token");

                    return Err(Error::Unauthorized);
                }
            };

            let db: &DatabaseConnection = &db;
            let token = match tokens::Model::find_by_token(db, &token).await? {
                Some(token) if token.user_id == claims.sub => token,
                _ => {
                    tracing::debug!(user_id = %claims.sub, "Token is not in the user's token list");

                    return Err(Error::Unauthorized);
                }
            };

            let user = match users::Model::find_by_id(db, claims.sub).await? {
                Some(user) => user,
                None => {
                    tracing::debug!(user_id = %claims.sub, "Token owner no longer exists");

                    return Err(Error::Unauthorized);
                }
            };

            tracing::debug!(user_id = %user.id, "Authentication took: {:?}", start.elapsed());

            Ok(Auth { user, token })
        })
    }
}
