use crate::middlewares::v1::auth::Auth;
use crate::prelude::*;

#[::tracing::instrument(skip(db, auth), fields(user_id = %auth.user.id))]
pub async fn remove(db: &DatabaseConnection, auth: Auth) -> Result<Success, Error> {
    auth.user.remove_avatar(db).await?;

    Ok(Success)
}
