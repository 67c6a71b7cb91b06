use crate::entities::v1::users::Model;
use crate::prelude::*;

/// Serve a user's avatar with the content type it was uploaded as
pub async fn show(db: &DatabaseConnection, id: Uuid) -> Result<HttpResponse, Error> {
    let user = Model::find_by_id(db, id)
        .await?
        .ok_or_else(|| Error::not_found("User not found"))?;

    match (user.avatar, user.avatar_content_type) {
        (Some(avatar), Some(content_type)) => Ok(HttpResponse::Ok()
            .content_type(content_type)
            .body(avatar)),
        _ => Err(Error::not_found("Avatar not found")),
    }
}
