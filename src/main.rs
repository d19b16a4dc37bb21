use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use outfit_engine::config::Settings;
use outfit_engine::core::{OutfitPolicy, Recommender, ScoringProfile};
use outfit_engine::routes::{self, recommendations::AppState};
use outfit_engine::services::{Catalog, CatalogProvider, InMemoryCatalog, RecommendationCache};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST);
        HttpResponse::build(status).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize logging (RUST_LOG wins over the configured level)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting outfit recommendation service...");

    // Load the catalog snapshot
    let catalog = match Catalog::load_from(&settings.catalog.path) {
        Ok(c) => {
            info!("Catalog loaded from {} ({} items)", settings.catalog.path, c.len());
            c
        }
        Err(e) => {
            error!("Failed to load catalog from {}: {}", settings.catalog.path, e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()));
        }
    };

    if catalog.is_empty() {
        warn!("Catalog is empty, every recommendation will fail until it is replaced");
    }

    let catalog: Arc<dyn CatalogProvider> = Arc::new(InMemoryCatalog::new(catalog));

    // Initialize result cache
    let cache_size = settings.cache.l1_cache_size.unwrap_or(1000);
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let cache = Arc::new(RecommendationCache::new(cache_size, cache_ttl));

    info!("Recommendation cache initialized ({} entries, TTL: {}s)", cache_size, cache_ttl);

    // Initialize the engine with configured constants
    let profile = ScoringProfile::from(&settings.scoring);
    let policy = OutfitPolicy::from(&settings.outfit);
    let recommender = Recommender::new(profile, policy);

    info!("Recommender initialized with profile: {:?}, policy: {:?}", profile, policy);

    // Build application state
    let app_state = AppState {
        catalog,
        cache,
        recommender,
        top_picks: settings.outfit.top_picks,
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
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
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
