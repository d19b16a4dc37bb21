use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::Diagnostics;
use crate::models::domain::{
    ActivityComfort, Category, ClothingItem, ContextEcho, Occasion, OutfitResult, ScoreTier,
    ScoredItem, Slot, TemperatureBand, WeatherCondition,
};

/// Per-axis parts of an item score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub temperature: f64,
    pub occasion: f64,
    pub weather: f64,
    pub wet_penalty: f64,
}

/// Flat view of a scored item for the diagnostic table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItemView {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub score: f64,
    pub tier: ScoreTier,
    pub warmth_score: f64,
    pub formality: f64,
    pub activity_comfort: ActivityComfort,
    pub breakdown: ScoreBreakdown,
}

impl From<&ScoredItem> for ScoredItemView {
    fn from(scored: &ScoredItem) -> Self {
        Self {
            id: scored.item.id.clone(),
            name: scored.item.name.clone(),
            category: scored.item.category,
            score: scored.score,
            tier: scored.tier,
            warmth_score: scored.item.warmth_score,
            formality: scored.item.formality,
            activity_comfort: scored.item.activity_comfort,
            breakdown: ScoreBreakdown {
                temperature: scored.temp_component,
                occasion: scored.occasion_component,
                weather: scored.weather_component,
                wet_penalty: scored.wet_penalty,
            },
        }
    }
}

/// Response for the recommendation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub request_id: uuid::Uuid,
    pub occasion: Occasion,
    pub temp_f: f64,
    pub condition: Option<WeatherCondition>,
    pub band: TemperatureBand,
    pub items: BTreeMap<Slot, ClothingItem>,
    pub total_score: f64,
}

impl RecommendationResponse {
    pub fn from_outfit(outfit: OutfitResult) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4(),
            occasion: outfit.context.occasion,
            temp_f: outfit.context.temp_f,
            condition: outfit.context.condition,
            band: outfit.context.band,
            items: outfit.selected_items,
            total_score: outfit.total_score,
        }
    }
}

/// Response for the diagnostic scoring endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsResponse {
    pub test_params: ContextEcho,
    pub top_picks: Vec<ScoredItemView>,
    pub all_items_scored: Vec<ScoredItemView>,
}

impl From<Diagnostics> for DiagnosticsResponse {
    fn from(diag: Diagnostics) -> Self {
        Self {
            test_params: diag.context,
            top_picks: diag.top_picks.iter().map(ScoredItemView::from).collect(),
            all_items_scored: diag.all_items_scored.iter().map(ScoredItemView::from).collect(),
        }
    }
}

/// Catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub revision: u64,
    pub count: usize,
    pub items: Vec<ClothingItem>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub catalog_revision: u64,
    pub catalog_items: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
