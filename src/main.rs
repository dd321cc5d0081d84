mod actors;
mod api;
mod bandit;
mod catalog;
mod config;
mod errors;
mod policies;
mod simulation;

use actix::SyncArbiter;
use actix_web::{web, web::Data, App, HttpServer};
use actors::runner::SimulationRunner;
use api::routes::{configure, cors, json_config, ping};
use config::AppConfig;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let simulation_config = config.simulation.clone();
    let runner = SyncArbiter::start(config.runner.workers, move || {
        SimulationRunner::new(simulation_config.clone())
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        workers = %config.runner.workers,
        cors_origins = ?config.server.cors_origins,
        "Starting server"
    );

    let api_prefix = config.server.api_prefix.clone();
    let cors_origins = config.server.cors_origins.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(runner.clone()))
            .app_data(json_config())
            .wrap(cors(&cors_origins))
            .wrap(TracingLogger::default())
            .service(ping)
            .service(web::scope(&api_prefix).configure(configure))
    })
    .bind((config.server.host, config.server.port))?
    .run()
    .await
}
