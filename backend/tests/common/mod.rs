//! Shared harness: an app over a private in-memory database with one user.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use recipebook::db::Database;
use recipebook::graphql::{SchemaSettings, build_schema};
use recipebook::services::{AuthConfig, AuthService};
use recipebook::{AppState, build_app};

pub const USERNAME: &str = "chef";
pub const PASSWORD: &str = "mise-en-place";

pub struct TestApp {
    pub db: Database,
    pub auth: AuthService,
    pub router: Router,
    pub token: String,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_page_size(100).await
}

pub async fn spawn_app_with_page_size(max_page_size: i32) -> TestApp {
    let db = Database::connect_in_memory().await.unwrap();
    db.migrate().await.unwrap();

    let auth = AuthService::initialize(
        db.clone(),
        AuthConfig {
            jwt_secret: Some("test-secret".to_string()),
            token_lifetime_secs: 3600,
            bcrypt_cost: 4,
        },
    )
    .await
    .unwrap();
    let user = auth.upsert_user(USERNAME, PASSWORD).await.unwrap();
    let token = auth.issue_token(&user).unwrap();

    let schema = build_schema(db.clone(), SchemaSettings { max_page_size });
    let router = build_app(AppState {
        db: db.clone(),
        schema,
        auth: auth.clone(),
    });

    TestApp {
        db,
        auth,
        router,
        token,
    }
}

impl TestApp {
    /// Send a request and decode the JSON body (Null when the body is not JSON)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    /// POST a GraphQL operation with the given Authorization header
    pub async fn graphql_with_auth(
        &self,
        authorization: Option<&str>,
        query: &str,
        variables: Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/graphql/")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let body = json!({ "query": query, "variables": variables }).to_string();
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// POST a GraphQL operation as the test user
    pub async fn graphql(&self, query: &str, variables: Value) -> Value {
        let auth = format!("Token {}", self.token);
        let (status, body) = self.graphql_with_auth(Some(&auth), query, variables).await;
        assert_eq!(status, StatusCode::OK, "unexpected status, body: {}", body);
        body
    }

    /// POST a GraphQL operation that must succeed, returning `data`
    pub async fn data(&self, query: &str, variables: Value) -> Value {
        let body = self.graphql(query, variables).await;
        assert!(body.get("errors").is_none(), "unexpected errors: {}", body);
        body["data"].clone()
    }

    /// POST a GraphQL operation that must fail, returning the first error
    pub async fn first_error(&self, query: &str, variables: Value) -> Value {
        let body = self.graphql(query, variables).await;
        body["errors"][0].clone()
    }

    pub async fn create_ingredient(&self, name: &str) -> String {
        let data = self
            .data(
                "mutation($name: String!) { createIngredient(name: $name) { ingredient { id name } } }",
                json!({ "name": name }),
            )
            .await;
        data["createIngredient"]["ingredient"]["id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    pub async fn create_recipe(&self, title: &str, ingredient_ids: &[&str]) -> String {
        let data = self
            .data(
                "mutation($title: String!, $ids: [ID]) {
                    createRecipe(title: $title, ingredientIds: $ids) { recipe { id } }
                }",
                json!({ "title": title, "ids": ingredient_ids }),
            )
            .await;
        data["createRecipe"]["recipe"]["id"]
            .as_str()
            .unwrap()
            .to_string()
    }
}
