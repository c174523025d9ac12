use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use lono_geo::config::{LoggingSettings, Settings};
use lono_geo::core::MemoryLocator;
use lono_geo::routes::{self, AppState};
use lono_geo::services::{DocumentCollections, DocumentStoreClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting Lono Geo service...");

    let store = DocumentStoreClient::new(
        settings.store.to_client_config(),
        DocumentCollections::from(&settings.collection),
    )
    .map_err(|e| {
        error!("Failed to create document store client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!(
        "Document store client initialized (database: {}, collection: {})",
        settings.store.database_id, settings.collection.memories
    );

    let locator = MemoryLocator::new(settings.geo.bounding_box_prefilter);

    info!(
        "Memory locator initialized (prefilter: {}, max radius: {} km)",
        settings.geo.bounding_box_prefilter, settings.geo.max_radius_km
    );

    let app_state = AppState {
        store: Arc::new(store),
        locator,
        max_radius_km: settings.geo.max_radius_km,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
