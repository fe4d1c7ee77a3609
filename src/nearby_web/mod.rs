use std::fmt::Display;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tokio::net::ToSocketAddrs;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::CompressionLevel;
use tracing::{info, Level};

use crate::nearby::provider::LocationProvider;

mod handlers;

/// Limits used for requests that do not specify their own.
#[derive(Clone, Copy, Debug)]
pub struct Defaults {
    pub max_distance: f64,
    pub max_results: i64,
}

pub struct Options<A> {
    pub provider: LocationProvider,
    pub defaults: Defaults,
    pub addr: A,
}

#[derive(Clone)]
pub struct AppState {
    pub provider: LocationProvider,
    pub defaults: Defaults,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/locations/nearby", get(handlers::api::handle_nearby_get))
        .route("/api/health", get(handlers::api::handle_health_get))
        .layer(CompressionLayer::new().gzip(true).quality(CompressionLevel::Fastest))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

pub async fn serve<A>(opts: Options<A>) -> Result<()>
where
    A: ToSocketAddrs + Display,
{
    let state = AppState {
        provider: opts.provider,
        defaults: opts.defaults,
    };

    let app = router(state);

    let addr = opts.addr.to_string();

    info!("Starting webserver on http://{}/", addr);
    let listener = tokio::net::TcpListener::bind(opts.addr)
        .await
        .with_context(|| format!("bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down");
}
