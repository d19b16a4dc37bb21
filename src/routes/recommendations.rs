use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{Diagnostics, EngineError, Recommender};
use crate::models::{
    CatalogResponse, DiagnosticsResponse, ErrorResponse, HealthResponse, OutfitResult,
    RecommendationRequest, RecommendationResponse,
};
use crate::services::{CacheKey, CatalogProvider, RecommendationCache};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub cache: Arc<RecommendationCache>,
    pub recommender: Recommender,
    pub top_picks: usize,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/items", web::get().to(list_items))
        .route("/recommendations", web::post().to(recommend))
        .route("/debug/outfit-scoring", web::post().to(debug_outfit_scoring));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog = state.catalog.snapshot();
    let status = if catalog.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_revision: catalog.revision(),
        catalog_items: catalog.len(),
    })
}

/// Catalog listing endpoint
///
/// GET /api/v1/items
async fn list_items(state: web::Data<AppState>) -> impl Responder {
    let catalog = state.catalog.snapshot();

    HttpResponse::Ok().json(CatalogResponse {
        revision: catalog.revision(),
        count: catalog.len(),
        items: catalog.items().to_vec(),
    })
}

/// Outfit recommendation endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "temp_f": 68.0,
///   "occasion": "Casual|Workout|Formal|Date",
///   "condition": "clear|cloudy|rainy|snowy|null"
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return validation_failed(errors.to_string());
    }

    let context = match req.to_context() {
        Ok(ctx) => ctx,
        Err(e) => return engine_error_response(&e),
    };

    let catalog = state.catalog.snapshot();
    let cache_key = CacheKey::outfit(&context, catalog.revision());

    tracing::info!(
        "Recommending outfit: temp_f={}, occasion={:?}, condition={:?}",
        context.weather.temp_f,
        context.occasion,
        context.weather.condition
    );

    if let Ok(outfit) = state.cache.get::<OutfitResult>(&cache_key).await {
        return HttpResponse::Ok().json(RecommendationResponse::from_outfit(outfit));
    }

    let outfit = match state.recommender.recommend(&context, catalog.items()) {
        Ok(outfit) => outfit,
        Err(e) => {
            tracing::warn!("Recommendation failed: {}", e);
            return engine_error_response(&e);
        }
    };

    if let Err(e) = state.cache.set(&cache_key, &outfit).await {
        tracing::warn!("Failed to cache recommendation: {}", e);
    }

    tracing::info!(
        "Returning outfit with {} items (total score {:.1}, from {} candidates)",
        outfit.selected_items.len(),
        outfit.total_score,
        outfit.all_items_scored.len()
    );

    HttpResponse::Ok().json(RecommendationResponse::from_outfit(outfit))
}

/// Diagnostic scoring endpoint
///
/// POST /api/v1/debug/outfit-scoring
///
/// Same body as `/recommendations`; returns every catalog item with its
/// score breakdown, best first.
async fn debug_outfit_scoring(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors.to_string());
    }

    let context = match req.to_context() {
        Ok(ctx) => ctx,
        Err(e) => return engine_error_response(&e),
    };

    let catalog = state.catalog.snapshot();
    let cache_key = CacheKey::diagnostics(&context, catalog.revision(), state.top_picks);

    if let Ok(diag) = state.cache.get::<Diagnostics>(&cache_key).await {
        return HttpResponse::Ok().json(DiagnosticsResponse::from(diag));
    }

    let diag = match state.recommender.diagnose(&context, catalog.items(), state.top_picks) {
        Ok(diag) => diag,
        Err(e) => {
            tracing::warn!("Diagnostic scoring failed: {}", e);
            return engine_error_response(&e);
        }
    };

    if let Err(e) = state.cache.set(&cache_key, &diag).await {
        tracing::warn!("Failed to cache diagnostics: {}", e);
    }

    tracing::debug!("Scored {} items for diagnostics", diag.all_items_scored.len());

    HttpResponse::Ok().json(DiagnosticsResponse::from(diag))
}

fn validation_failed(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
    })
}

/// Map an engine error onto an HTTP response
///
/// Bad input is a 400; a catalog that cannot produce an outfit is a 422.
fn engine_error_response(err: &EngineError) -> HttpResponse {
    let body = |status_code: u16| ErrorResponse {
        error: err.code().to_string(),
        message: err.to_string(),
        status_code,
    };

    if err.is_input_error() {
        HttpResponse::BadRequest().json(body(400))
    } else {
        HttpResponse::UnprocessableEntity().json(body(422))
    }
}
