use crate::metrics::AppMetrics;
use crate::middlewares::v1::auth::Auth;
use crate::prelude::*;

/// Drop the token presented with this request; other sessions survive
#[::tracing::instrument(skip(db, metrics, auth), fields(user_id = %auth.user.id, token_id = %auth.token.id))]
pub async fn logout(db: &DatabaseConnection, metrics: &AppMetrics, auth: Auth) -> Result<Success, Error> {
    auth.token.revoke(db).await?;

    metrics.record_logout(1);

    Ok(Success)
}
