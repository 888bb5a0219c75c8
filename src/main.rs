use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nfe_gateway::config::Config;
use nfe_gateway::middleware::RequestIdTagger;
use nfe_gateway::modules::health::configure_health_routes;
use nfe_gateway::modules::reference::controllers::{configure_reference_routes, SharedProvider};
use nfe_gateway::modules::reference::SeededReferenceProvider;
use nfe_gateway::modules::taxes::controllers::configure_calculation_routes;
use nfe_gateway::modules::taxes::TaxService;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nfe_gateway=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting NFE Gateway");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Reference data: deterministic seeded provider; a registry-backed
    // adapter can be swapped in behind the same trait
    let provider: SharedProvider = Arc::new(SeededReferenceProvider::new());
    let tax_service = web::Data::new(TaxService::new(provider.clone()));
    let provider_data = web::Data::new(provider);

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let cors_origin = config.app.cors_origin.clone();

    let server = HttpServer::new(move || {
        let cors = if cors_origin == "*" {
            Cors::permissive()
        } else {
            Cors::default()
                .allowed_origin(&cors_origin)
                .allow_any_method()
                .allow_any_header()
        };

        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestIdTagger)
            .wrap(cors)
            .app_data(tax_service.clone())
            .app_data(provider_data.clone())
            .configure(configure_health_routes)
            .configure(configure_calculation_routes)
            .configure(configure_reference_routes)
    })
    .workers(workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated with an error")
}
