use serde::{Deserialize, Serialize};

use crate::core::{
    assembler::{assemble, OutfitPolicy},
    error::EngineError,
    ranker::rank,
    scoring::{score_item, ScoringProfile},
    temperature::temperature_band,
};
use crate::models::{ClothingItem, ContextEcho, OutfitResult, RecommendationContext, ScoredItem};

/// Diagnostic view: the best picks plus every item's breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub context: ContextEcho,
    pub top_picks: Vec<ScoredItem>,
    pub all_items_scored: Vec<ScoredItem>,
}

/// Recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Input validation (temperature, catalog non-empty)
/// 2. Per-item scoring (temperature, occasion, weather)
/// 3. Ranking
/// 4. Outfit assembly
///
/// Holds no mutable state; a single instance can serve any number of
/// concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recommender {
    profile: ScoringProfile,
    policy: OutfitPolicy,
}

impl Recommender {
    pub fn new(profile: ScoringProfile, policy: OutfitPolicy) -> Self {
        Self { profile, policy }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    pub fn policy(&self) -> &OutfitPolicy {
        &self.policy
    }

    /// Score and rank every catalog item
    ///
    /// # Arguments
    /// * `context` - Temperature, condition and occasion of the request
    /// * `catalog` - Immutable snapshot of candidate items
    ///
    /// # Returns
    /// All items, best first, each with its score breakdown
    pub fn score_catalog(
        &self,
        context: &RecommendationContext,
        catalog: &[ClothingItem],
    ) -> Result<Vec<ScoredItem>, EngineError> {
        validate_request(context, catalog)?;

        tracing::debug!(
            temp_f = context.weather.temp_f,
            occasion = ?context.occasion,
            condition = ?context.weather.condition,
            band = ?temperature_band(context.weather.temp_f),
            catalog_size = catalog.len(),
            "scoring catalog"
        );

        let scored = catalog
            .iter()
            .map(|item| score_item(item, context, &self.profile))
            .collect();

        Ok(rank(scored))
    }

    /// Produce a complete outfit for the request
    pub fn recommend(
        &self,
        context: &RecommendationContext,
        catalog: &[ClothingItem],
    ) -> Result<OutfitResult, EngineError> {
        let ranked = self.score_catalog(context, catalog)?;
        let outfit = assemble(ranked, context, &self.policy)?;

        tracing::debug!(
            slots = ?outfit.selected_items.keys().collect::<Vec<_>>(),
            total_score = outfit.total_score,
            "assembled outfit"
        );

        Ok(outfit)
    }

    /// Ranked list with the first `top_n` entries called out
    pub fn diagnose(
        &self,
        context: &RecommendationContext,
        catalog: &[ClothingItem],
        top_n: usize,
    ) -> Result<Diagnostics, EngineError> {
        let all_items_scored = self.score_catalog(context, catalog)?;
        let top_picks = all_items_scored.iter().take(top_n).cloned().collect();

        Ok(Diagnostics {
            context: ContextEcho {
                temp_f: context.weather.temp_f,
                occasion: context.occasion,
                condition: context.weather.condition,
                band: temperature_band(context.weather.temp_f),
            },
            top_picks,
            all_items_scored,
        })
    }
}

/// Reject bad input before any scoring happens
///
/// Items are re-checked here; the slice need not come from a `Catalog`.
fn validate_request(
    context: &RecommendationContext,
    catalog: &[ClothingItem],
) -> Result<(), EngineError> {
    if !context.weather.temp_f.is_finite() {
        return Err(EngineError::InvalidTemperature(context.weather.temp_f));
    }
    if catalog.is_empty() {
        return Err(EngineError::EmptyCatalog);
    }
    for item in catalog {
        item.validate()?;
    }
    Ok(())
}
