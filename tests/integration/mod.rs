//! End-to-end tests against the in-process application

pub mod avatar_test;
pub mod users_test;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use serde_json::Value;

pub const BOUNDARY: &str = "----accounts-test-boundary";

/// One part of a `multipart/form-data` body; `filename: None` makes it a
/// plain form field
pub struct Part<'a> {
    pub field: &'a str,
    pub filename: Option<&'a str>,
    pub bytes: &'a [u8],
}

/// `multipart/form-data` body holding one file field
pub fn multipart(field: &str, filename: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    multipart_parts(&[Part {
        field,
        filename: Some(filename),
        bytes,
    }])
}

pub fn multipart_parts(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());

        match part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{filename}\"\r\n",
                        part.field
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.field)
                        .as_bytes(),
                );
            }
        }

        body.extend_from_slice(part.bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

pub fn profile_pic() -> Vec<u8> {
    include_bytes!("../fixtures/profile-pic.jpg").to_vec()
}

pub async fn json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let body = actix_web::test::read_body(resp).await;

    serde_json::from_slice(&body).unwrap()
}
