pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use flashcard_core::StudyTimings;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::db::Database;
use crate::services::sessions::{spawn_sweeper, SessionStore};
use crate::services::sets::SetStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: SetStore,
    pub sessions: Arc<SessionStore>,
    pub timings: Arc<StudyTimings>,
}

impl AppState {
    pub fn new(store: SetStore, clock: Arc<dyn Clock>, timings: StudyTimings) -> Self {
        Self {
            store,
            sessions: Arc::new(SessionStore::new(clock)),
            timings: Arc::new(timings),
        }
    }
}

/// Build the API router over the given state
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Set routes
        .route("/api/sets", get(routes::sets::list).post(routes::sets::save))
        .route(
            "/api/sets/:id",
            get(routes::sets::get).delete(routes::sets::delete),
        )
        // Match routes
        .route("/api/sets/:id/match", post(routes::matching::start))
        .route(
            "/api/match/:session",
            get(routes::matching::board).delete(routes::matching::end),
        )
        .route("/api/match/:session/click", post(routes::matching::click))
        // Quiz routes
        .route("/api/sets/:id/quiz", post(routes::quiz::start))
        .route(
            "/api/quiz/:session",
            get(routes::quiz::view).delete(routes::quiz::end),
        )
        .route("/api/quiz/:session/answer", post(routes::quiz::answer))
        .route("/api/quiz/:session/quit", post(routes::quiz::quit))
        // Flip routes
        .route("/api/sets/:id/flip", post(routes::flip::start))
        .route(
            "/api/flip/:session",
            get(routes::flip::view).delete(routes::flip::end),
        )
        .route("/api/flip/:session/toggle", post(routes::flip::toggle))
        .route("/api/flip/:session/reset", post(routes::flip::reset))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(url).await?;

            tracing::info!("Running migrations...");
            db.run_migrations().await?;

            SetStore::Postgres(Arc::new(db))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, keeping flashcard sets in memory");
            SetStore::memory()
        }
    };

    let state = AppState::new(store, Arc::new(SystemClock::new()), StudyTimings::default());
    tracing::info!("Using {} set store", state.store.backend_name());

    let _sweeper = spawn_sweeper(
        state.sessions.clone(),
        config.session_ttl,
        config.sweep_interval,
    );

    let app = app_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
