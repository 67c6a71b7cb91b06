use crate::metrics::AppMetrics;
use crate::middlewares::v1::auth::Auth;
use crate::prelude::*;
use crate::responses::v1::user::User;

/// Delete the authenticated user and all of its sessions, answering with
/// the profile as it was
#[::tracing::instrument(skip(db, metrics, auth), fields(user_id = %auth.user.id))]
pub async fn delete(db: &DatabaseConnection, metrics: &AppMetrics, auth: Auth) -> Result<User, Error> {
    auth.user.destroy(db).await?;

    metrics.record_deletion();
    ::tracing::info!("User deleted");

    Ok(auth.user.into())
}
