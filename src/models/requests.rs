use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::EngineError;
use crate::models::domain::{Occasion, RecommendationContext, WeatherCondition};

/// Request body shared by the recommendation and diagnostic endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[serde(alias = "tempF")]
    pub temp_f: f64,
    #[validate(length(min = 1))]
    #[serde(default = "default_occasion")]
    pub occasion: String,
    #[serde(default)]
    pub condition: Option<String>,
}

fn default_occasion() -> String {
    "Casual".to_string()
}

impl RecommendationRequest {
    /// Resolve the free-form labels into the engine's closed sets
    pub fn to_context(&self) -> Result<RecommendationContext, EngineError> {
        if !self.temp_f.is_finite() {
            return Err(EngineError::InvalidTemperature(self.temp_f));
        }
        let occasion: Occasion = self.occasion.parse()?;
        let condition = WeatherCondition::parse_optional(self.condition.as_deref())?;

        Ok(RecommendationContext::new(self.temp_f, occasion, condition))
    }
}
