//! Outfit Engine - weather- and occasion-aware clothing recommendations
//!
//! This library provides the rule engine that scores a clothing catalog
//! against temperature, weather condition and occasion, ranks the items and
//! assembles a coherent outfit from them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{EngineError, OutfitPolicy, Recommender, ScoringProfile};
pub use models::{
    ClothingItem, Occasion, OutfitResult, RecommendationContext, ScoredItem, Slot, WeatherCondition,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let recommender = Recommender::with_defaults();
        assert_eq!(recommender.profile(), &ScoringProfile::default());
    }
}
