//! Application state and HTTP router construction.
//!
//! Used by `main` and by the integration tests to build the Axum app.

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::graphql::RecipeBookSchema;
use crate::services::AuthService;

/// Shared state for HTTP handlers (GraphQL, API routes).
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub schema: RecipeBookSchema,
    pub auth: AuthService,
}

/// Build the full Axum router: /api, /graphql, health probes and layers.
/// Returns Router<()> (state fully applied) for use with axum::serve.
pub fn build_app(state: AppState) -> Router<()> {
    Router::new()
        .merge(crate::api::health::router())
        .nest("/api", crate::api::token_auth::router())
        .merge(crate::graphql::handler::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
