use crate::entities::v1::users::Model;
use crate::metrics::AppMetrics;
use crate::prelude::*;
use crate::requests::v1::auth::LoginRequest;
use crate::responses::v1::auth::Authenticated;
use crate::security::{PasswordHasher, TokenIssuer, Validator};

/// Same answer for an unknown email and a wrong password
pub const LOGIN_FAILED: &str = "Unable to login";

/// Check credentials and append a fresh token to the user's sessions
#[::tracing::instrument(skip(db, hasher, issuer, metrics, request), fields(email = %request.email))]
pub async fn login(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    issuer: &TokenIssuer,
    metrics: &AppMetrics,
    request: LoginRequest,
) -> Result<Authenticated, Error> {
    let email = Validator::normalize_email(&request.email);
    let password = request.password;

    let user = match Model::find_by_email(db, &email).await? {
        Some(user) => user,
        None => {
            ::tracing::debug!("No account for email");
            metrics.record_login_attempt(false);

            return Err(Error::bad_request(LOGIN_FAILED));
        }
    };

    let verifier = hasher.clone();
    let hash = user.password.clone();
    let candidate = password.clone();
    let valid = web::block(move || verifier.verify(&candidate, &hash)).await??;

    if !valid {
        ::tracing::debug!(user_id = %user.id, "Password mismatch");
        metrics.record_login_attempt(false);

        return Err(Error::bad_request(LOGIN_FAILED));
    }

    let user = if hasher.needs_rehash(&user.password)? {
        ::tracing::info!(user_id = %user.id, "Rehashing password with current parameters");

        let hasher = hasher.clone();
        let hash = web::block(move || hasher.hash(&password)).await??;

        user.update_password(db, hash).await?
    } else {
        user
    };

    let token = issuer.issue(user.id)?;
    user.append_token(db, token.clone()).await?;

    metrics.record_login_attempt(true);
    ::tracing::info!(user_id = %user.id, "User logged in");

    Ok(Authenticated {
        user: user.into(),
        token,
    })
}
