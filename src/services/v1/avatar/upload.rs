use actix_multipart::Multipart;
use futures_util::TryStreamExt;

use crate::config::AvatarConfig;
use crate::metrics::AppMetrics;
use crate::middlewares::v1::auth::Auth;
use crate::prelude::*;

/// Multipart field the image must arrive in
pub const FIELD: &str = "avatar";

/// Store the uploaded image on the authenticated user
///
/// Exactly one `avatar` field is accepted. Its file name must carry an
/// allowed extension and its body may not exceed `max_size`; the size is
/// enforced while reading so an oversized upload is never fully buffered.
#[::tracing::instrument(skip(db, config, metrics, auth, payload), fields(user_id = %auth.user.id))]
pub async fn upload(
    db: &DatabaseConnection,
    config: &AvatarConfig,
    metrics: &AppMetrics,
    auth: Auth,
    mut payload: Multipart,
) -> Result<Success, Error> {
    let mut avatar: Option<(Vec<u8>, &'static str)> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| Error::bad_request(e.to_string()))?
    {
        if field.name() != Some(FIELD) || avatar.is_some() {
            return Err(Error::bad_request("Unexpected field"));
        }

        let filename = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .unwrap_or_default()
            .to_string();

        let content_type = config
            .content_type(&filename)
            .ok_or_else(|| Error::bad_request("Please upload an image"))?;

        let mut bytes = Vec::new();

        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| Error::bad_request(e.to_string()))?
        {
            if bytes.len() + chunk.len() > config.max_size {
                ::tracing::debug!(max_size = config.max_size, "Avatar too large");

                return Err(Error::bad_request("File too large"));
            }

            bytes.extend_from_slice(&chunk);
        }

        avatar = Some((bytes, content_type));
    }

    let (bytes, content_type) = match avatar {
        Some((bytes, content_type)) if !bytes.is_empty() => (bytes, content_type),
        _ => return Err(Error::bad_request("Please upload an image")),
    };

    let size = bytes.len();
    auth.user.set_avatar(db, bytes, content_type).await?;

    metrics.record_avatar_upload(size);
    ::tracing::info!(size, content_type, "Avatar stored");

    Ok(Success)
}
