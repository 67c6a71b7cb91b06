//! Avatar upload, removal and download

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service};
use accounts::entities::v1::users;
use uuid::Uuid;

use super::{Part, json, multipart, multipart_parts, profile_pic};

#[actix_web::test]
async fn test_should_upload_avatar_image() {
    let (service, db, user_one) = accounts::service!();

    let (content_type, payload) = multipart("avatar", "profile-pic.jpg", &profile_pic());
    let req = TestRequest::post()
        .uri("/users/me/avatar")
        .insert_header(user_one.bearer())
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let user = users::Model::find_by_id(&db, user_one.user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.avatar, Some(profile_pic()));
    assert_eq!(user.avatar_content_type.as_deref(), Some("image/jpeg"));
}

#[actix_web::test]
async fn test_should_not_upload_avatar_for_unauthenticated_user() {
    let (service, db, user_one) = accounts::service!();

    let (content_type, payload) = multipart("avatar", "profile-pic.jpg", &profile_pic());
    let req = TestRequest::post()
        .uri("/users/me/avatar")
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let user = users::Model::find_by_id(&db, user_one.user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(user.avatar.is_none());
}

#[actix_web::test]
async fn test_avatar_rejects_wrong_field_name() {
    let (service, _db, user_one) = accounts::service!();

    let (content_type, payload) = multipart("upload", "profile-pic.jpg", &profile_pic());
    let req = TestRequest::post()
        .uri("/users/me/avatar")
        .insert_header(user_one.bearer())
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["message"], "Unexpected field");
}

#[actix_web::test]
async fn test_avatar_rejects_second_avatar_file() {
    let (service, db, user_one) = accounts::service!();

    let picture = profile_pic();
    let (content_type, payload) = multipart_parts(&[
        Part {
            field: "avatar",
            filename: Some("profile-pic.jpg"),
            bytes: &picture,
        },
        Part {
            field: "avatar",
            filename: Some("other.png"),
            bytes: &picture,
        },
    ]);
    let req = TestRequest::post()
        .uri("/users/me/avatar")
        .insert_header(user_one.bearer())
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["message"], "Unexpected field");

    let user = users::Model::find_by_id(&db, user_one.user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(user.avatar.is_none());
}

#[actix_web::test]
async fn test_avatar_rejects_field_after_file() {
    let (service, db, user_one) = accounts::service!();

    let picture = profile_pic();
    let (content_type, payload) = multipart_parts(&[
        Part {
            field: "avatar",
            filename: Some("profile-pic.jpg"),
            bytes: &picture,
        },
        Part {
            field: "caption",
            filename: None,
            bytes: b"me at the lake",
        },
    ]);
    let req = TestRequest::post()
        .uri("/users/me/avatar")
        .insert_header(user_one.bearer())
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["message"], "Unexpected field");

    let user = users::Model::find_by_id(&db, user_one.user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(user.avatar.is_none());
}

#[actix_web::test]
async fn test_avatar_rejects_unsupported_extension() {
    let (service, _db, user_one) = accounts::service!();

    let (content_type, payload) = multipart("avatar", "resume.pdf", b"%PDF-1.4");
    let req = TestRequest::post()
        .uri("/users/me/avatar")
        .insert_header(user_one.bearer())
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["message"], "Please upload an image");
}

#[actix_web::test]
async fn test_avatar_rejects_oversized_file() {
    let (service, db, user_one) = accounts::service!();

    let oversized = vec![0u8; 1_000_001];
    let (content_type, payload) = multipart("avatar", "huge.png", &oversized);
    let req = TestRequest::post()
        .uri("/users/me/avatar")
        .insert_header(user_one.bearer())
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["message"], "File too large");

    let user = users::Model::find_by_id(&db, user_one.user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(user.avatar.is_none());
}

#[actix_web::test]
async fn test_avatar_rejects_empty_upload() {
    let (service, _db, user_one) = accounts::service!();

    let (content_type, payload) = multipart("avatar", "empty.jpg", b"");
    let req = TestRequest::post()
        .uri("/users/me/avatar")
        .insert_header(user_one.bearer())
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_uploaded_avatar_is_served_publicly() {
    let (service, _db, user_one) = accounts::service!();

    let (content_type, payload) = multipart("avatar", "profile-pic.jpg", &profile_pic());
    let req = TestRequest::post()
        .uri("/users/me/avatar")
        .insert_header(user_one.bearer())
        .insert_header(("Content-Type", content_type))
        .set_payload(payload)
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri(&format!("/users/{}/avatar", user_one.user.id))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("content-type").unwrap(), "image/jpeg");

    let body = actix_web::test::read_body(resp).await;
    assert_eq!(body.to_vec(), profile_pic());
}

#[actix_web::test]
async fn test_avatar_download_not_found() {
    let (service, _db, user_one) = accounts::service!();

    let req = TestRequest::get()
        .uri(&format!("/users/{}/avatar", user_one.user.id))
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get()
        .uri(&format!("/users/{}/avatar", Uuid::new_v4()))
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_should_remove_avatar() {
    let (service, db, user_one) = accounts::service!();

    user_one
        .user
        .set_avatar(&db, profile_pic(), "image/jpeg")
        .await
        .unwrap();

    let req = TestRequest::delete()
        .uri("/users/me/avatar")
        .insert_header(user_one.bearer())
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::OK);

    let user = users::Model::find_by_id(&db, user_one.user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(user.avatar.is_none());
    assert!(user.avatar_content_type.is_none());
}
