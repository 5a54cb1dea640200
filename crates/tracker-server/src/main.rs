//! Exercise Tracker Server
//!
//! HTTP service for creating users, logging exercises against them and
//! querying filtered exercise logs.
//!
//! Uses SQLite (embedded) by default; `DATABASE_URL=memory` selects an
//! in-process store.

mod error;
mod extractors;
mod handlers;
mod services;
mod settings;
mod storage;


use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use settings::ServerConfig;
use services::ExerciseTracker;
use storage::Backend;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<ExerciseTracker>,
}

impl AppState {
    pub fn new(backend: &Backend) -> Self {
        Self {
            tracker: Arc::new(ExerciseTracker::new(backend.users(), backend.exercises())),
        }
    }
}

#[tokio::main]
async fn main() {
    // A missing .env is fine
    dotenv::dotenv().ok();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[FATAL] Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        error!("PANIC at {:?}: {}", location, payload);
    }));

    info!(
        "Starting Exercise Tracker Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tracker_server=info,tower_http=info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let result = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: ServerConfig) -> Result<()> {
    info!(
        "Config loaded: bind={}:{}, db={}",
        config.host, config.port, config.database_url
    );

    info!("Opening store...");
    let backend = Backend::open(&config.database_url)
        .await
        .context("Failed to open store")?;

    let state = AppState::new(&backend);
    info!("Static files directory: {}", config.static_dir);

    let app = router(state).nest_service("/public", ServeDir::new(&config.static_dir));

    let addr = config.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error");

    backend.close().await;
    info!("Shutdown complete");

    served
}

/// Routes and layers, without the static file service
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route("/users/:id/exercises", post(handlers::exercises::create))
        .route("/users/:id/logs", get(handlers::exercises::logs))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
