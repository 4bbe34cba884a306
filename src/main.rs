use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use pcos_risk::config::{LoggingSettings, Settings};
use pcos_risk::routes::{self, AppState};
use pcos_risk::{ModelRegistry, Predictor, ScalingMode, Tier};
use std::sync::Arc;
use tracing::{error, info, warn};
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

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting PCOS risk prediction service...");

    let scaling = settings.preprocessing.scaling;
    if scaling == ScalingMode::PerRequest {
        warn!("Numeric features are standardized per request; every numeric column will be centered to zero");
    }

    // Models load once here; a failed tier stays unavailable
    let registry = Arc::new(ModelRegistry::load(&settings.models, scaling).await);

    for tier in Tier::ALL {
        if !registry.is_available(tier) {
            warn!("The {} tier will answer with errors until its model is fixed and the service restarted", tier);
        }
    }

    let app_state = AppState {
        registry,
        predictor: Predictor::new(scaling),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
            .default_service(web::to(routes::not_found))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
