use std::sync::Arc;

use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use commerce::CommercetoolsCartApi;
use config::Config;
use cqrs::AddToCartCommandHandler;
use dotenv::dotenv;
use state::AppState;
use tracing::{event, Level};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

mod auth;
mod commerce;
mod config;
mod cqrs;
mod domain;
mod dtos;
mod errors;
mod mutations;
mod routes;
mod state;
mod translator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = Config::from_env()?;

    let writer = match &config.log_path {
        Some(path) => BoxMakeWriter::new(std::fs::File::create(path)?),
        None => BoxMakeWriter::new(std::io::stdout),
    };

    tracing_subscriber::
    fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_target(false)
    .with_ansi(false)
    .json()
    .with_file(true)
    .with_line_number(true)
    .with_current_span(true)
    .with_writer(writer)
    .init();

    let cart_api = Arc::new(CommercetoolsCartApi::new(config.commerce.clone()));
    let add_to_cart_command_handler = Arc::new(AddToCartCommandHandler::new(cart_api));

    let state = Arc::new(AppState {
        add_to_cart_command_handler: add_to_cart_command_handler,
    });

    let (prometheus_layer, metrics_handle) = PrometheusMetricLayer::pair();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    event!(Level::INFO, port = config.port, project_key = %config.commerce.project_key, "Cart webhook listening");

    axum::serve(listener, routes::app(state)
        .route("/metrics", get(|| async move {metrics_handle.render()}))
        .layer(prometheus_layer)).await?;

    Ok(())
}
