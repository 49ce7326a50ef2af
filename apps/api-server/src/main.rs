//! # Catalog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod bootstrap;
mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::auth::AuthGate;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&telemetry::TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    let Some(db_config) = config.database.clone() else {
        return Err(std::io::Error::other(
            "DATABASE_URL is not set; refusing to start without a store",
        ));
    };

    let state = AppState::new(&db_config, config.cache_ttl)
        .await
        .map_err(std::io::Error::other)?;

    bootstrap::ensure_admin(&state.users, &config.admin).await;

    tracing::info!(
        "Starting catalog API server on {}:{}",
        config.host,
        config.port
    );

    let tokens = state.tokens.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(AuthGate::new(tokens.clone()))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
