// Core rule engine exports
pub mod assembler;
pub mod engine;
pub mod error;
pub mod occasion;
pub mod ranker;
pub mod scoring;
pub mod temperature;
pub mod weather;

pub use assembler::{assemble, needs_outerwear, OutfitPolicy};
pub use engine::{Diagnostics, Recommender};
pub use error::EngineError;
pub use occasion::{score_occasion, O_MAX};
pub use ranker::rank;
pub use scoring::{aggregate, score_item, ScoringProfile};
pub use temperature::{score_temperature, temperature_band, W_MAX};
pub use weather::{score_weather, wet_weather_penalty, C_MAX};
