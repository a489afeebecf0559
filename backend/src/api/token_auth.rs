//! Token issuance endpoint
//!
//! `POST /api/token-auth/` exchanges a username and password for a token.
//! Accepts a JSON or form-encoded body. Field errors are keyed by field name,
//! credential errors under `non_field_errors`.

use std::collections::BTreeMap;

use axum::extract::{FromRequest, Request, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;
use crate::services::auth::AuthError;

#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

type FieldErrors = BTreeMap<&'static str, Vec<&'static str>>;

impl TokenRequest {
    /// Both fields must be present and not blank
    fn validate(self) -> Result<(String, String), FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = self.username.map(|u| u.trim().to_string());
        let username = check_field(&mut errors, "username", username);
        let password = check_field(&mut errors, "password", self.password);

        match (username, password) {
            (Some(username), Some(password)) if errors.is_empty() => Ok((username, password)),
            _ => Err(errors),
        }
    }
}

fn check_field(
    errors: &mut FieldErrors,
    name: &'static str,
    value: Option<String>,
) -> Option<String> {
    match value {
        None => {
            errors.insert(name, vec!["This field is required."]);
            None
        }
        Some(v) if v.is_empty() => {
            errors.insert(name, vec!["This field may not be blank."]);
            None
        }
        Some(v) => Some(v),
    }
}

/// Read the body as a form when it says so, JSON otherwise
async fn read_body(req: Request) -> Result<TokenRequest, Response> {
    let is_form = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false);

    if is_form {
        Form::<TokenRequest>::from_request(req, &())
            .await
            .map(|Form(body)| body)
            .map_err(|rejection| {
                (rejection.status(), Json(json!({ "detail": rejection.body_text() })))
                    .into_response()
            })
    } else {
        Json::<TokenRequest>::from_request(req, &())
            .await
            .map(|Json(body)| body)
            .map_err(|rejection| {
                (rejection.status(), Json(json!({ "detail": rejection.body_text() })))
                    .into_response()
            })
    }
}

/// Obtain a token for valid credentials
async fn obtain_token(State(state): State<AppState>, req: Request) -> Response {
    let body = match read_body(req).await {
        Ok(body) => body,
        Err(response) => return response,
    };

    let (username, password) = match body.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
    };

    match state.auth.obtain_token(&username, &password).await {
        Ok(token) => {
            tracing::info!(username = %username, "Token issued");
            (StatusCode::OK, Json(TokenResponse { token })).into_response()
        }
        Err(AuthError::Internal(e)) => {
            tracing::error!(error = ?e, "Token issuance failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Internal server error" })),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "non_field_errors": [e.to_string()] })),
        )
            .into_response(),
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/token-auth/", post(obtain_token))
        .route("/token-auth", post(obtain_token))
}
