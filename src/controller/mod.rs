use std::net::SocketAddr;
use anyhow::Context;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::repositories::booking_repo::DynBookingRepository;

pub mod booking_controller;
pub mod health_check;

pub async fn serve(
    booking_repo: DynBookingRepository,
    config: &Config,
) -> anyhow::Result<()> {
    let cors = cors_layer(&config.origin_urls)?;

    let application = application(booking_repo)
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(CompressionLayer::new())
        );

    let address: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("Invalid bind address or port")?;
    info!("API server listening on: http://{}", address);
    axum::Server::try_bind(&address)
        .with_context(|| format!("Failed to bind API server to {}", address))?
        .serve(application.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Error spinning up the API server")
}

/// Every route plus the 404 fallback, without the transport layers.
pub fn application(booking_repo: DynBookingRepository) -> Router {
    router_endpoints(booking_repo)
        .fallback(page_not_found_handler)
}

pub fn router_endpoints(booking_repo: DynBookingRepository) -> Router {
    health_check::router()
        .merge(booking_controller::router(booking_repo))
}

/// `*` allows any origin, otherwise a comma separated list of origins.
pub fn cors_layer(origin_urls: &str) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if origin_urls.trim() == "*" {
        return Ok(cors.allow_origin(Any));
    }

    let origins = origin_urls
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", s))
        })
        .collect::<anyhow::Result<Vec<HeaderValue>>>()?;

    Ok(cors.allow_origin(origins))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining in-flight requests"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
