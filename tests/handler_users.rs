mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::json;
use sqlx::PgPool;

fn png_form(bytes: &[u8]) -> MultipartForm {
    let part = Part::bytes(bytes.to_vec())
        .file_name("avatar.PNG")
        .mime_type("image/png");
    MultipartForm::new().add_part("file", part)
}

#[sqlx::test]
async fn test_sign_up_success(pool: PgPool) {
    let (server, _uploads) = common::make_server(pool);

    let body = common::sign_up(&server, common::EMAIL, common::PASSWORD).await;

    assert_eq!(body["email"], common::EMAIL);
    assert_eq!(body["username"], "john");
    assert_eq!(body["profileImageFile"], "");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
    assert_eq!(body["id"].as_str().unwrap().len(), 21);
}

#[sqlx::test]
async fn test_sign_up_duplicate_email(pool: PgPool) {
    let (server, _uploads) = common::make_server(pool);
    common::sign_up(&server, common::EMAIL, common::PASSWORD).await;

    let response = server
        .post("/users/signup")
        .json(&json!({ "email": common::EMAIL, "password": common::PASSWORD }))
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_sign_up_weak_password(pool: PgPool) {
    let (server, _uploads) = common::make_server(pool);

    for password in ["short1!", "nodigits!!", "NoSymbol123", "a1!aaaaaaaaaaaaaaaa"] {
        let response = server
            .post("/users/signup")
            .json(&json!({ "email": common::EMAIL, "password": password }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert!(body["error"]["details"]["fields"].get("password").is_some());
    }
}

#[sqlx::test]
async fn test_my_account(pool: PgPool) {
    let (server, _uploads) = common::make_server(pool);
    let signed_up = common::sign_up(&server, common::EMAIL, common::PASSWORD).await;
    let (token, _) = common::login(&server, common::EMAIL, common::PASSWORD).await;

    let response = server
        .get("/users/myAccount")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], signed_up["id"]);
    assert_eq!(body["email"], common::EMAIL);
}

#[sqlx::test]
async fn test_change_password(pool: PgPool) {
    let (server, _uploads) = common::make_server(pool);
    let token = common::signed_in(&server, common::EMAIL).await;

    server
        .patch("/users/password")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "password": "Wrong1!pass", "newPassword": "Other2@pass" }))
        .await
        .assert_status_bad_request();

    server
        .patch("/users/password")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "password": common::PASSWORD, "newPassword": "Other2@pass" }))
        .await
        .assert_status_ok();

    server
        .post("/auth/login")
        .json(&json!({ "email": common::EMAIL, "password": common::PASSWORD }))
        .await
        .assert_status_bad_request();
    common::login(&server, common::EMAIL, "Other2@pass").await;
}

#[sqlx::test]
async fn test_sign_out_closes_account(pool: PgPool) {
    let (server, _uploads) = common::make_server(pool);
    let token = common::signed_in(&server, common::EMAIL).await;

    server
        .post("/users/signout")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "password": "Wrong1!pass" }))
        .await
        .assert_status_bad_request();

    server
        .post("/users/signout")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "password": common::PASSWORD }))
        .await
        .assert_status_ok();

    // The still-valid JWT no longer maps to a live account.
    server
        .get("/users/myAccount")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status_not_found();

    server
        .post("/auth/login")
        .json(&json!({ "email": common::EMAIL, "password": common::PASSWORD }))
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_list_my_urls(pool: PgPool) {
    let (server, _uploads) = common::make_server(pool);
    let token = common::signed_in(&server, common::EMAIL).await;
    let other = common::signed_in(&server, "other@x.com").await;

    let first = common::create_url(&server, &token, "https://example.com/1").await;
    let second = common::create_url(&server, &token, "https://example.com/2").await;
    common::create_url(&server, &other, "https://example.com/3").await;

    let response = server
        .get("/users/url")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["count"], 2);
    assert_eq!(body["items"][0]["shortUrl"], second["shortUrl"]);
    assert_eq!(body["items"][1]["shortUrl"], first["shortUrl"]);
}

#[sqlx::test]
async fn test_profile_image_upload_and_delete(pool: PgPool) {
    let (server, uploads) = common::make_server(pool);
    let token = common::signed_in(&server, common::EMAIL).await;

    let response = server
        .post("/users/profile-img")
        .add_header("Authorization", common::bearer(&token))
        .multipart(png_form(b"\x89PNG fake image"))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    let location = body["location"].as_str().unwrap().to_string();
    assert!(location.starts_with(common::UPLOADS_URL));
    assert!(location.ends_with(".png"));

    let key = location
        .strip_prefix(&format!("{}/", common::UPLOADS_URL))
        .unwrap();
    assert!(uploads.path().join(key).is_file());

    // Served back from the uploads directory.
    let served = server.get(&format!("/uploads/{key}")).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().as_ref(), b"\x89PNG fake image");

    let account: serde_json::Value = server
        .get("/users/myAccount")
        .add_header("Authorization", common::bearer(&token))
        .await
        .json();
    assert_eq!(account["profileImageFile"], location);

    server
        .delete("/users/profile-img")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status_ok();
    assert!(!uploads.path().join(key).exists());

    let account: serde_json::Value = server
        .get("/users/myAccount")
        .add_header("Authorization", common::bearer(&token))
        .await
        .json();
    assert_eq!(account["profileImageFile"], "");
}

#[sqlx::test]
async fn test_profile_image_missing_file_field(pool: PgPool) {
    let (server, _uploads) = common::make_server(pool);
    let token = common::signed_in(&server, common::EMAIL).await;

    let form = MultipartForm::new().add_text("note", "no file here");

    server
        .post("/users/profile-img")
        .add_header("Authorization", common::bearer(&token))
        .multipart(form)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_profile_image_requires_token(pool: PgPool) {
    let (server, _uploads) = common::make_server(pool);

    server
        .post("/users/profile-img")
        .multipart(png_form(b"img"))
        .await
        .assert_status_unauthorized();
}
