//! Signup, profile, update and deletion

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service};
use accounts::entities::v1::users;
use accounts::testing::setup::{USER_ONE_NAME, USER_ONE_PASSWORD};
use serde_json::json as body;
use uuid::Uuid;

use super::json;

// =============================================================================
// Signup
// =============================================================================

#[actix_web::test]
async fn test_should_signup_a_new_user() {
    let (service, db, _) = accounts::service!();

    let req = TestRequest::post()
        .uri("/users")
        .set_json(body!({
            "name": "User Test",
            "email": "user@example.pl",
            "password": "MyPass777!"
        }))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);

    let response = json(resp).await;
    let id = Uuid::parse_str(response["user"]["id"].as_str().unwrap()).unwrap();

    let user = users::Model::find_by_id(&db, id).await.unwrap();
    assert!(user.is_some(), "user should be persisted");

    let user = user.unwrap();
    assert_eq!(response["user"]["name"], "User Test");
    assert_eq!(response["user"]["email"], "user@example.pl");
    assert_ne!(user.password, "MyPass777!");
    assert!(user.password.starts_with("$argon2id$"));

    let tokens = user.tokens(&db).await.unwrap();
    assert_eq!(response["token"].as_str().unwrap(), tokens[0].token);
}

#[actix_web::test]
async fn test_signup_response_never_exposes_secrets() {
    let (service, _db, _) = accounts::service!();

    let req = TestRequest::post()
        .uri("/users")
        .set_json(body!({
            "name": "User Test",
            "email": "user@example.pl",
            "password": "MyPass777!"
        }))
        .to_request();
    let response = json(call_service(&service, req).await).await;

    let user = response["user"].as_object().unwrap();
    assert!(!user.contains_key("password"));
    assert!(!user.contains_key("tokens"));
    assert!(!user.contains_key("avatar"));
    assert!(user.contains_key("createdAt"));
}

#[actix_web::test]
async fn test_signup_rejects_duplicate_email_in_any_case() {
    let (service, _db, _) = accounts::service!();

    let req = TestRequest::post()
        .uri("/users")
        .set_json(body!({
            "name": "Another One",
            "email": "  USERONE@example.pl ",
            "password": "MyPass777!"
        }))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let response = json(resp).await;
    assert_eq!(response["error"], "VALIDATION_ERROR");
    assert!(response["errors"]["email"].is_array());
}

#[actix_web::test]
async fn test_signup_rejects_invalid_fields() {
    let (service, _db, _) = accounts::service!();

    let cases = [
        body!({ "name": "", "email": "user@example.pl", "password": "MyPass777!" }),
        body!({ "name": "User", "email": "not-an-email", "password": "MyPass777!" }),
        body!({ "name": "User", "email": "user@example.pl", "password": "  short " }),
        body!({ "name": "User", "email": "user@example.pl", "password": "myPASSWORD1" }),
    ];

    for case in cases {
        let req = TestRequest::post().uri("/users").set_json(&case).to_request();
        let resp = call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{case}");
    }
}

#[actix_web::test]
async fn test_signup_rejects_missing_fields() {
    let (service, _db, _) = accounts::service!();

    let req = TestRequest::post()
        .uri("/users")
        .set_json(body!({ "email": "user@example.pl" }))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["error"], "BAD_REQUEST");
}

// =============================================================================
// Profile
// =============================================================================

#[actix_web::test]
async fn test_should_get_profile_for_user() {
    let (service, _db, user_one) = accounts::service!();

    let req = TestRequest::get()
        .uri("/users/me")
        .insert_header(user_one.bearer())
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let response = json(resp).await;
    assert_eq!(response["id"], user_one.user.id.to_string());
    assert_eq!(response["name"], USER_ONE_NAME);
    assert_eq!(response["hasAvatar"], false);
}

#[actix_web::test]
async fn test_should_not_get_profile_for_unauthenticated_user() {
    let (service, _db, _) = accounts::service!();

    let req = TestRequest::get().uri("/users/me").to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let response = json(resp).await;
    assert_eq!(response["message"], "Please authenticate");
}

// =============================================================================
// Update
// =============================================================================

#[actix_web::test]
async fn test_should_update_valid_user_fields() {
    let (service, db, user_one) = accounts::service!();

    let req = TestRequest::patch()
        .uri("/users/me")
        .insert_header(user_one.bearer())
        .set_json(body!({ "name": "Jess" }))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json(resp).await["name"], "Jess");

    let user = users::Model::find_by_id(&db, user_one.user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.name, "Jess");
}

#[actix_web::test]
async fn test_should_not_update_invalid_user_fields() {
    let (service, db, user_one) = accounts::service!();

    let req = TestRequest::patch()
        .uri("/users/me")
        .insert_header(user_one.bearer())
        .set_json(body!({ "name": "Jess", "location": "Philadelphia" }))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["message"], "Invalid updates!");

    let user = users::Model::find_by_id(&db, user_one.user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.name, USER_ONE_NAME);
}

#[actix_web::test]
async fn test_update_rejects_invalid_email_and_password() {
    let (service, _db, user_one) = accounts::service!();

    for case in [body!({ "email": "nope" }), body!({ "password": "password123" })] {
        let req = TestRequest::patch()
            .uri("/users/me")
            .insert_header(user_one.bearer())
            .set_json(&case)
            .to_request();
        let resp = call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{case}");
    }
}

#[actix_web::test]
async fn test_update_password_changes_login_credentials() {
    let (service, _db, user_one) = accounts::service!();

    let req = TestRequest::patch()
        .uri("/users/me")
        .insert_header(user_one.bearer())
        .set_json(body!({ "password": "NewSecret42" }))
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::OK);

    let req = TestRequest::post()
        .uri("/users/login")
        .set_json(body!({ "email": user_one.user.email, "password": USER_ONE_PASSWORD }))
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::post()
        .uri("/users/login")
        .set_json(body!({ "email": user_one.user.email, "password": "NewSecret42" }))
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_update_rejects_email_of_another_user() {
    let (service, _db, user_one) = accounts::service!();

    let req = TestRequest::post()
        .uri("/users")
        .set_json(body!({
            "name": "User Two",
            "email": "usertwo@example.pl",
            "password": "MyPass777!"
        }))
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::CREATED);

    let req = TestRequest::patch()
        .uri("/users/me")
        .insert_header(user_one.bearer())
        .set_json(body!({ "email": "UserTwo@example.pl" }))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json(resp).await["errors"]["email"].is_array());
}

#[actix_web::test]
async fn test_update_with_empty_body_changes_nothing() {
    let (service, _db, user_one) = accounts::service!();

    let req = TestRequest::patch()
        .uri("/users/me")
        .insert_header(user_one.bearer())
        .set_json(body!({}))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json(resp).await["name"], USER_ONE_NAME);
}

// =============================================================================
// Delete
// =============================================================================

#[actix_web::test]
async fn test_should_delete_account_for_user() {
    let (service, db, user_one) = accounts::service!();

    let req = TestRequest::delete()
        .uri("/users/me")
        .insert_header(user_one.bearer())
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json(resp).await["id"], user_one.user.id.to_string());

    let user = users::Model::find_by_id(&db, user_one.user.id).await.unwrap();
    assert!(user.is_none());
    assert!(user_one.user.tokens(&db).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_should_not_delete_account_for_unauthenticated_user() {
    let (service, db, user_one) = accounts::service!();

    let req = TestRequest::delete().uri("/users/me").to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let user = users::Model::find_by_id(&db, user_one.user.id).await.unwrap();
    assert!(user.is_some());
}

#[actix_web::test]
async fn test_token_of_deleted_user_is_rejected() {
    let (service, _db, user_one) = accounts::service!();

    let req = TestRequest::delete()
        .uri("/users/me")
        .insert_header(user_one.bearer())
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri("/users/me")
        .insert_header(user_one.bearer())
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::UNAUTHORIZED);
}
