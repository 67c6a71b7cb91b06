use crate::entities::v1::tokens;
use crate::metrics::AppMetrics;
use crate::middlewares::v1::auth::Auth;
use crate::prelude::*;

/// Drop every token the user holds
#[::tracing::instrument(skip(db, metrics, auth), fields(user_id = %auth.user.id))]
pub async fn logout_all(
    db: &DatabaseConnection,
    metrics: &AppMetrics,
    auth: Auth,
) -> Result<Success, Error> {
    let revoked = tokens::Model::revoke_all(db, auth.user.id).await?;

    metrics.record_logout(revoked);
    ::tracing::info!(revoked, "All sessions revoked");

    Ok(Success)
}
