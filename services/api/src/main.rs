use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod advisor;
mod catalog;
mod error;
mod metrics;
mod middleware;
mod models;
mod repositories;
mod routes;
mod simulation;
mod state;

use common::{
    database::{self, DatabaseConfig},
    settings::ServerConfig,
    token::{TokenConfig, TokenService},
};

use crate::{advisor::RuleBasedAdvisor, catalog::GamificationCatalog, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    if db_config.run_migrations {
        database::run_migrations(&pool).await?;
    }

    let token_service = TokenService::new(TokenConfig::from_env()?);

    let app_state = AppState::new(
        pool,
        token_service,
        GamificationCatalog::default(),
        Arc::new(RuleBasedAdvisor),
    );

    info!("API service initialized successfully");

    let server_config = ServerConfig::load(5000)?;
    let cors = match &server_config.cors_origin {
        Some(origin) => {
            CorsLayer::permissive().allow_origin(origin.parse::<axum::http::HeaderValue>()?)
        }
        None => CorsLayer::permissive(),
    };

    // Start the web server
    let app = routes::create_router(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("API service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
