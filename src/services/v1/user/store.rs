use crate::entities::v1::users::Model;
use crate::metrics::AppMetrics;
use crate::prelude::*;
use crate::requests::v1::user::SignupRequest;
use crate::responses::v1::auth::Authenticated;
use crate::security::{PasswordHasher, TokenIssuer, Validator};

/// Create an account and open its first session
#[::tracing::instrument(
    skip(db, hasher, issuer, metrics, request),
    fields(email = %request.email)
)]
pub async fn store(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    issuer: &TokenIssuer,
    metrics: &AppMetrics,
    request: SignupRequest,
) -> Result<Authenticated, Error> {
    let mut validation = Validation::new();
    let name = request.name.trim().to_string();
    let email = Validator::normalize_email(&request.email);
    let password = request.password;

    Validator::check_profile(
        &mut validation,
        Some(name.as_str()),
        Some(email.as_str()),
        Some(password.as_str()),
    );

    if !validation.has("email") && Model::email_exists(db, &email, None).await? {
        validation.add("email", "Email already exists");
    }

    validation.finish()?;

    let hasher = hasher.clone();
    let hash = web::block(move || hasher.hash(&password)).await??;

    let user = match Model::new(name, email, hash).store(db).await {
        Ok(user) => user,
        Err(e) if super::is_duplicate_email(&e) => {
            // Lost a race with a concurrent signup for the same address
            let mut validation = Validation::new();
            validation.add("email", "Email already exists");

            return Err(validation.into());
        }
        Err(e) => return Err(e.into()),
    };

    let token = issuer.issue(user.id)?;
    user.append_token(db, token.clone()).await?;

    metrics.record_signup();
    ::tracing::info!(user_id = %user.id, "User signed up");

    Ok(Authenticated {
        user: user.into(),
        token,
    })
}
