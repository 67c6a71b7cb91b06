use serde_json::{Map, Value};

use crate::entities::v1::users::Model;
use crate::middlewares::v1::auth::Auth;
use crate::models::v1::user::ProfileChanges;
use crate::prelude::*;
use crate::requests::v1::user::UpdateProfileRequest;
use crate::responses::v1::user::User;
use crate::security::{PasswordHasher, Validator};

/// Fields a client may send to `PATCH /users/me`
pub const UPDATABLE_FIELDS: [&str; 3] = ["name", "email", "password"];

/// Apply a partial profile update for the authenticated user
///
/// The raw JSON object is taken so that an unknown key fails the whole
/// request before anything is validated or written.
#[::tracing::instrument(skip(db, hasher, auth, body), fields(user_id = %auth.user.id))]
pub async fn update(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    auth: Auth,
    body: Map<String, Value>,
) -> Result<User, Error> {
    if body.keys().any(|key| !UPDATABLE_FIELDS.contains(&key.as_str())) {
        return Err(Error::bad_request("Invalid updates!"));
    }

    let request: UpdateProfileRequest = serde_json::from_value(Value::Object(body))
        .map_err(|e| Error::bad_request(e.to_string()))?;

    let mut validation = Validation::new();
    let name = request.name.map(|name| name.trim().to_string());
    let email = request.email.as_deref().map(Validator::normalize_email);
    let password = request.password;

    Validator::check_profile(
        &mut validation,
        name.as_deref(),
        email.as_deref(),
        password.as_deref(),
    );

    if let Some(email) = &email {
        if !validation.has("email")
            && auth.user.email != *email
            && Model::email_exists(db, email, Some(auth.user.id)).await?
        {
            validation.add("email", "Email already exists");
        }
    }

    validation.finish()?;

    let password = match password {
        Some(password) => {
            let hasher = hasher.clone();

            Some(web::block(move || hasher.hash(&password)).await??)
        }
        None => None,
    };

    let changes = ProfileChanges {
        name,
        email,
        password,
    };

    if changes.is_empty() {
        return Ok(auth.user.into());
    }

    let user = match auth.user.update_profile(db, changes).await {
        Ok(user) => user,
        Err(e) if super::is_duplicate_email(&e) => {
            let mut validation = Validation::new();
            validation.add("email", "Email already exists");

            return Err(validation.into());
        }
        Err(e) => return Err(e.into()),
    };

    ::tracing::info!(user_id = %user.id, "Profile updated");

    Ok(user.into())
}
