use std::sync::Arc;
use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;
use crate::config::Config;
use crate::repositories::booking_repo::DynBookingRepository;
use crate::repositories::postgres_repo::{build_pool, PostgresConnectionRepo};

pub mod config;
pub mod controller;
pub mod helpers;
pub mod models;
pub mod repositories;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let postgres_connection = build_pool(&config).await?;
    let booking_repo: DynBookingRepository = Arc::new(PostgresConnectionRepo::new(
        postgres_connection
    ));

    controller::serve(booking_repo, &config).await
}
