//! HTTP routes for /graphql: the GraphiQL console and the authenticated POST endpoint.

use async_graphql::http::GraphiQLSource;
use async_graphql::{ErrorExtensions, Response};
use async_graphql_axum::rejection::GraphQLRejection;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::{FromRequest, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response as HttpResponse};
use axum::routing::get;

use super::auth::AuthUser;
use super::errors::ApiError;
use crate::AppState;
use crate::services::auth::AuthError;

const TOKEN_NOT_PROVIDED: &str = "Authentication token not provided.";
const TOKEN_NOT_RECOGNISED: &str = "Invalid or expired token.";

/// Routes for /graphql and /graphql/. Merge into the app and apply state there.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/graphql/", get(graphiql).post(graphql_handler))
}

/// Pull the token out of `Authorization: Token <t>` (or `Bearer <t>`)
pub(crate) fn extract_token(headers: &HeaderMap) -> Result<String, &'static str> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.trim().is_empty())
        .ok_or(TOKEN_NOT_PROVIDED)?;

    let mut parts = header.split_whitespace();
    let keyword = parts.next().unwrap_or_default();
    if !keyword.eq_ignore_ascii_case("token") && !keyword.eq_ignore_ascii_case("bearer") {
        return Err(TOKEN_NOT_RECOGNISED);
    }

    match (parts.next(), parts.next()) {
        (None, _) => Err("Invalid token header. No credentials provided."),
        (Some(_), Some(_)) => Err("Invalid token header. Token string should not contain spaces."),
        (Some(token), None) => Ok(token.to_string()),
    }
}

/// GraphiQL interactive playground (only for browsers)
async fn graphiql(headers: HeaderMap) -> impl IntoResponse {
    let accepts_html = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        axum::response::Html(GraphiQLSource::build().endpoint("/graphql/").finish()).into_response()
    } else {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            axum::Json(serde_json::json!({
                "error": "GET requests are not supported for GraphQL queries. Use POST with Content-Type: application/json"
            })),
        )
            .into_response()
    }
}

/// Reject with 401 and a GraphQL error envelope, before anything executes
fn unauthenticated(message: &str) -> HttpResponse {
    let error = ApiError::Unauthenticated(message.to_string())
        .extend()
        .into_server_error(Default::default());
    let response: GraphQLResponse = Response::from_errors(vec![error]).into();
    (StatusCode::UNAUTHORIZED, response).into_response()
}

/// GraphQL query/mutation handler. Every request must carry a valid token.
///
/// The token is checked before the body is read, so a request without one is
/// rejected the same way whatever its body.
async fn graphql_handler(State(state): State<AppState>, req: Request) -> HttpResponse {
    let token = match extract_token(req.headers()) {
        Ok(token) => token,
        Err(message) => {
            tracing::debug!(reason = message, "Rejected GraphQL request");
            return unauthenticated(message);
        }
    };

    let user = match state.auth.authenticate(&token).await {
        Ok(user) => AuthUser::from(user),
        Err(AuthError::Internal(e)) => {
            let error = ApiError::Internal(e).extend().into_server_error(Default::default());
            let response: GraphQLResponse = Response::from_errors(vec![error]).into();
            return (StatusCode::INTERNAL_SERVER_ERROR, response).into_response();
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected GraphQL request");
            return unauthenticated(&e.to_string());
        }
    };

    let request = match GraphQLRequest::<GraphQLRejection>::from_request(req, &state).await {
        Ok(request) => request,
        Err(rejection) => return rejection.into_response(),
    };

    tracing::debug!(user_id = user.user_id, "Executing GraphQL request");
    let request = request.into_inner().data(user);
    GraphQLResponse::from(state.schema.execute(request).await).into_response()
}
