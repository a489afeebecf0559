//! Recipebook Backend - GraphQL API for ingredients and recipes
//!
//! This is the main entry point. All data operations are exposed via GraphQL
//! at /graphql/.

use anyhow::Context;

use recipebook::cli::{CliOptions, Command};
use recipebook::config::Config;
use recipebook::db::Database;
use recipebook::graphql::{SchemaSettings, build_schema};
use recipebook::services::{AuthConfig, AuthService, init_tracing};
use recipebook::{AppState, build_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = CliOptions::from_args()?;
    let config = Config::from_env()?;

    init_tracing(config.log_format)?;
    tracing::info!("Starting Recipebook Backend");

    let db = Database::connect(&config.database_url, config.database_max_connections).await?;
    db.migrate().await?;
    tracing::info!("Database connected");

    let auth = AuthService::initialize(db.clone(), AuthConfig::from(&config)).await?;

    if let Command::CreateUser { username, password } = cli.command {
        auth.upsert_user(&username, &password).await?;
        db.close().await;
        return Ok(());
    }

    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password)
        && auth.ensure_user(username, password).await?
    {
        tracing::info!(username = %username, "Bootstrap user created");
    }

    let schema = build_schema(
        db.clone(),
        SchemaSettings {
            max_page_size: config.max_page_size,
        },
    );
    tracing::info!("GraphQL schema built");

    let state = AppState {
        db: db.clone(),
        schema,
        auth,
    };
    let app = build_app(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql/", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
