use thiserror::Error;

use crate::models::Slot;

/// Errors surfaced by the recommendation engine
///
/// All of these are caller-input or caller-data problems; the engine never
/// retries and never returns a partial outfit in place of an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid occasion '{0}': expected one of Casual, Workout, Formal, Date")]
    InvalidOccasion(String),

    #[error("invalid weather condition '{0}': expected one of clear, cloudy, rainy, snowy")]
    InvalidCondition(String),

    #[error("invalid temperature {0}: must be a finite number of degrees Fahrenheit")]
    InvalidTemperature(f64),

    #[error("unknown {kind} '{value}'")]
    UnknownLabel { kind: &'static str, value: String },

    #[error("item '{id}' has invalid {field}: {reason}")]
    InvalidItem {
        id: String,
        field: &'static str,
        reason: String,
    },

    #[error("catalog is empty")]
    EmptyCatalog,

    #[error("insufficient inventory: no candidate for mandatory slot '{0}'")]
    InsufficientInventory(Slot),
}

impl EngineError {
    /// Whether the error comes from request validation rather than catalog contents
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidOccasion(_)
                | EngineError::InvalidCondition(_)
                | EngineError::InvalidTemperature(_)
                | EngineError::UnknownLabel { .. }
        )
    }

    /// Short machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidOccasion(_) => "invalid_occasion",
            EngineError::InvalidCondition(_) => "invalid_condition",
            EngineError::InvalidTemperature(_) => "invalid_temperature",
            EngineError::UnknownLabel { .. } => "unknown_label",
            EngineError::InvalidItem { .. } => "invalid_item",
            EngineError::EmptyCatalog => "empty_catalog",
            EngineError::InsufficientInventory(_) => "insufficient_inventory",
        }
    }
}
