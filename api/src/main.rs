//! Kinship API Server
//!
//! Likes and direct messages for a social-networking backend.
//! Uses hexagonal (ports & adapters) architecture: services talk to a unit
//! of work port, and PostgreSQL sits behind it as one adapter.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::PostgresUnitOfWorkFactory;
use app::{LikesService, MessageService};
use auth::TokenService;
use config::Config;
use domain::ports::UnitOfWorkFactory;

/// Application state shared across all handlers
pub struct AppState<F: UnitOfWorkFactory> {
    pub likes_service: Arc<LikesService<F>>,
    pub message_service: Arc<MessageService<F>>,
    pub tokens: Arc<TokenService>,
}

impl<F: UnitOfWorkFactory> AppState<F> {
    pub fn new(uow: Arc<F>, tokens: TokenService) -> Self {
        Self {
            likes_service: Arc::new(LikesService::new(uow.clone())),
            message_service: Arc::new(MessageService::new(uow)),
            tokens: Arc::new(tokens),
        }
    }
}

// Derived Clone would require F: Clone
impl<F: UnitOfWorkFactory> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            likes_service: self.likes_service.clone(),
            message_service: self.message_service.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router without rate limiting, which needs peer addresses
pub fn build_router<F: UnitOfWorkFactory>(state: AppState<F>) -> Router {
    let protected = Router::new()
        .route("/likes", get(handlers::get_user_likes::<F>))
        .route("/likes/:username", post(handlers::add_like::<F>))
        .route(
            "/messages",
            get(handlers::get_messages_for_user::<F>).post(handlers::create_message::<F>),
        )
        .route(
            "/messages/thread/:username",
            get(handlers::get_message_thread::<F>),
        )
        .route("/messages/:id", delete(handlers::delete_message::<F>))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(protected)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,kinship_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Kinship API...");

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let state = AppState::new(
        Arc::new(PostgresUnitOfWorkFactory::new(db)),
        TokenService::new(&config.token_key),
    );

    // 10 req/sec sustained per peer IP, burst of 50
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_millisecond(100)
            .burst_size(50)
            .finish()
            .context("Failed to build governor config")?,
    );

    let app = build_router(state).layer(GovernorLayer {
        config: governor_config,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
