// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    formality_from_label, ActivityComfort, Category, ClothingItem, ContextEcho, Occasion,
    OutfitResult, RecommendationContext, ScoreTier, ScoredItem, Slot, TemperatureBand,
    WeatherCondition, WeatherContext,
};
pub use requests::RecommendationRequest;
pub use responses::{
    CatalogResponse, DiagnosticsResponse, ErrorResponse, HealthResponse, RecommendationResponse,
    ScoreBreakdown, ScoredItemView,
};
