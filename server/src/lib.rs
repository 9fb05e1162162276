//! # Open house backend
//!
//! Backend for the school's open-house day. Organizers announce their
//! exhibits through the admin app, visitors browse them through the public
//! listing. One binary serves both: the `SERVER_ROLE` environment variable
//! decides whether this process exposes the authenticated admin API or the
//! anonymous visitor API, so the two deployments can sit on different
//! networks while sharing one database.
//!
//! Media files never pass through this server. Handlers hand out presigned
//! URLs against an S3-compatible store and the browser uploads/downloads
//! directly.

use std::time::Duration;

use axum::http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method};
use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod mapper;
pub mod routes;
pub mod state;
pub mod stores;

use config::{Config, ServerRole};
use state::State;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();

    info!("Initializing state...");
    let state = State::new(&config).await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    let app = match config.role {
        ServerRole::Admin => routes::admin_router(state),
        ServerRole::Visitor => routes::visitor_router(state),
    }
    .layer(cors);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
