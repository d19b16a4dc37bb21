use crate::core::{occasion, temperature, weather};
use crate::models::{ClothingItem, RecommendationContext, ScoreTier, ScoredItem};

/// Tunable constants for the three scorers
///
/// Defaults come from the named constants in `temperature`, `occasion`
/// and `weather`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringProfile {
    pub w_max: f64,
    pub temp_penalty_per_unit: f64,
    pub o_max: f64,
    pub formality_max: f64,
    pub formality_penalty_per_unit: f64,
    pub activity_credit: f64,
    pub activity_shortfall_penalty: f64,
    pub workout_shortfall_penalty: f64,
    pub c_max: f64,
    pub wet_weather_penalty: f64,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self {
            w_max: temperature::W_MAX,
            temp_penalty_per_unit: temperature::TEMP_PENALTY_PER_UNIT,
            o_max: occasion::O_MAX,
            formality_max: occasion::FORMALITY_MAX,
            formality_penalty_per_unit: occasion::FORMALITY_PENALTY_PER_UNIT,
            activity_credit: occasion::ACTIVITY_CREDIT,
            activity_shortfall_penalty: occasion::ACTIVITY_SHORTFALL_PENALTY,
            workout_shortfall_penalty: occasion::WORKOUT_SHORTFALL_PENALTY,
            c_max: weather::C_MAX,
            wet_weather_penalty: weather::WET_WEATHER_PENALTY,
        }
    }
}

impl ScoringProfile {
    /// Upper bound of any item score under this profile
    pub fn max_score(&self) -> f64 {
        self.w_max + self.o_max + self.c_max
    }
}

/// Combine the per-axis components into one item score
///
/// Straight sum, so the breakdown stays additive:
/// score = temp + occasion + weather - wet_penalty
#[inline]
pub fn aggregate(
    temp_component: f64,
    occasion_component: f64,
    weather_component: f64,
    wet_penalty: f64,
) -> f64 {
    temp_component + occasion_component + weather_component - wet_penalty
}

/// Score a single catalog item against the request context
pub fn score_item(
    item: &ClothingItem,
    context: &RecommendationContext,
    profile: &ScoringProfile,
) -> ScoredItem {
    let weather_ctx = &context.weather;

    let temp_component =
        temperature::score_temperature(item.warmth_score, weather_ctx.temp_f, profile);
    let occasion_component = occasion::score_occasion(
        item.formality,
        item.activity_comfort,
        context.occasion,
        profile,
    );
    let weather_component =
        weather::score_weather(&item.weather_tags, weather_ctx.condition, profile);
    let wet_penalty =
        weather::wet_weather_penalty(&item.weather_tags, weather_ctx.condition, profile);

    let score = aggregate(temp_component, occasion_component, weather_component, wet_penalty);

    tracing::trace!(
        item = %item.id,
        temp_component,
        occasion_component,
        weather_component,
        wet_penalty,
        score,
        "scored item"
    );

    ScoredItem {
        item: item.clone(),
        temp_component,
        occasion_component,
        weather_component,
        wet_penalty,
        score,
        tier: ScoreTier::from_score(score),
    }
}
