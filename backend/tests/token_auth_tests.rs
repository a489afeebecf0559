//! Tests for token issuance at /api/token-auth/

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use common::{PASSWORD, USERNAME, spawn_app};

fn json_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/token-auth/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn valid_credentials_return_a_working_token() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(json_request(json!({ "username": USERNAME, "password": PASSWORD })))
        .await;
    assert_eq!(status, StatusCode::OK);

    let token = body["token"].as_str().unwrap();
    let auth = format!("Token {}", token);
    let (status, body) = app
        .graphql_with_auth(Some(&auth), "{ allIngredients { edges { cursor } } }", json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["allIngredients"]["edges"], json!([]));

    let user = app.db.users().get_by_username(USERNAME).await.unwrap().unwrap();
    assert!(user.last_login_at.is_some());
}

#[tokio::test]
async fn form_bodies_are_accepted() {
    let app = spawn_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/token-auth")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={}&password={}", USERNAME, PASSWORD)))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn missing_and_blank_fields_are_reported_per_field() {
    let app = spawn_app().await;

    let (status, body) = app.send(json_request(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "password": ["This field is required."],
            "username": ["This field is required."],
        })
    );

    let (status, body) = app
        .send(json_request(json!({ "username": USERNAME, "password": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "password": ["This field may not be blank."] }));
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let app = spawn_app().await;

    for (username, password) in [(USERNAME, "wrong"), ("nobody", PASSWORD)] {
        let (status, body) = app
            .send(json_request(json!({ "username": username, "password": password })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "non_field_errors": ["Unable to log in with provided credentials."] })
        );
    }
}

#[tokio::test]
async fn reset_password_replaces_the_old_one() {
    let app = spawn_app().await;
    app.auth.upsert_user(USERNAME, "new-password").await.unwrap();

    let (status, _) = app
        .send(json_request(json!({ "username": USERNAME, "password": PASSWORD })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(json_request(json!({ "username": USERNAME, "password": "new-password" })))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn inactive_users_cannot_obtain_tokens() {
    let app = spawn_app().await;
    let user = app.db.users().get_by_username(USERNAME).await.unwrap().unwrap();
    app.db.users().set_active(user.id, false).await.unwrap();

    let (status, body) = app
        .send(json_request(json!({ "username": USERNAME, "password": PASSWORD })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "non_field_errors": ["Unable to log in with provided credentials."] })
    );
}
