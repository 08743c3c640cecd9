// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, Graph client and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use config::Config;
use db::{MirrorStore, PgStore};
use dotenv::dotenv;
use services::{GraphApi, GraphClient};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        anyhow::bail!("Configuration error: {}", e);
    }

    log::info!("Starting facebook-photos service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize database connection pool
    let pool = config::init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;
    let store: Arc<dyn MirrorStore> = Arc::new(PgStore::new(pool));

    // 5. Graph client (one rate limiter across all workers)
    let graph: Arc<dyn GraphApi> = Arc::new(GraphClient::from_config(&config));
    log::info!(
        "Graph API client ready ({}, {} req/s)",
        config.graph_api_url,
        config.graph_requests_per_second
    );

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();

    HttpServer::new(move || {
        App::new()
            // Application state (store, Graph client, config)
            .app_data(web::Data::from(store.clone()))
            .app_data(web::Data::from(graph.clone()))
            .app_data(web::Data::new(config_clone.clone()))
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::albums_config)
            .configure(handlers::admin_config)
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run()
    .await?;

    Ok(())
}
