use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{assembler, occasion, temperature, weather, OutfitPolicy, ScoringProfile};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub outfit: OutfitSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String { "config/catalog.toml".to_string() }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CacheSettings {
    pub l1_cache_size: Option<u64>,
    pub ttl_secs: Option<u64>,
}

/// Scoring constants; every field falls back to the engine's named constant
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_w_max")]
    pub w_max: f64,
    #[serde(default = "default_temp_penalty")]
    pub temp_penalty_per_unit: f64,
    #[serde(default = "default_o_max")]
    pub o_max: f64,
    #[serde(default = "default_formality_max")]
    pub formality_max: f64,
    #[serde(default = "default_formality_penalty")]
    pub formality_penalty_per_unit: f64,
    #[serde(default = "default_activity_credit")]
    pub activity_credit: f64,
    #[serde(default = "default_activity_shortfall")]
    pub activity_shortfall_penalty: f64,
    #[serde(default = "default_workout_shortfall")]
    pub workout_shortfall_penalty: f64,
    #[serde(default = "default_c_max")]
    pub c_max: f64,
    #[serde(default = "default_wet_penalty")]
    pub wet_weather_penalty: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            w_max: default_w_max(),
            temp_penalty_per_unit: default_temp_penalty(),
            o_max: default_o_max(),
            formality_max: default_formality_max(),
            formality_penalty_per_unit: default_formality_penalty(),
            activity_credit: default_activity_credit(),
            activity_shortfall_penalty: default_activity_shortfall(),
            workout_shortfall_penalty: default_workout_shortfall(),
            c_max: default_c_max(),
            wet_weather_penalty: default_wet_penalty(),
        }
    }
}

impl From<&ScoringSettings> for ScoringProfile {
    fn from(s: &ScoringSettings) -> Self {
        Self {
            w_max: s.w_max,
            temp_penalty_per_unit: s.temp_penalty_per_unit,
            o_max: s.o_max,
            formality_max: s.formality_max,
            formality_penalty_per_unit: s.formality_penalty_per_unit,
            activity_credit: s.activity_credit,
            activity_shortfall_penalty: s.activity_shortfall_penalty,
            workout_shortfall_penalty: s.workout_shortfall_penalty,
            c_max: s.c_max,
            wet_weather_penalty: s.wet_weather_penalty,
        }
    }
}

fn default_w_max() -> f64 { temperature::W_MAX }
fn default_temp_penalty() -> f64 { temperature::TEMP_PENALTY_PER_UNIT }
fn default_o_max() -> f64 { occasion::O_MAX }
fn default_formality_max() -> f64 { occasion::FORMALITY_MAX }
fn default_formality_penalty() -> f64 { occasion::FORMALITY_PENALTY_PER_UNIT }
fn default_activity_credit() -> f64 { occasion::ACTIVITY_CREDIT }
fn default_activity_shortfall() -> f64 { occasion::ACTIVITY_SHORTFALL_PENALTY }
fn default_workout_shortfall() -> f64 { occasion::WORKOUT_SHORTFALL_PENALTY }
fn default_c_max() -> f64 { weather::C_MAX }
fn default_wet_penalty() -> f64 { weather::WET_WEATHER_PENALTY }

#[derive(Debug, Clone, Deserialize)]
pub struct OutfitSettings {
    #[serde(default = "default_accessory_margin")]
    pub accessory_margin: f64,
    #[serde(default = "default_accessory_weight")]
    pub accessory_weight: f64,
    #[serde(default = "default_top_picks")]
    pub top_picks: usize,
}

impl Default for OutfitSettings {
    fn default() -> Self {
        Self {
            accessory_margin: default_accessory_margin(),
            accessory_weight: default_accessory_weight(),
            top_picks: default_top_picks(),
        }
    }
}

impl From<&OutfitSettings> for OutfitPolicy {
    fn from(s: &OutfitSettings) -> Self {
        Self {
            accessory_margin: s.accessory_margin,
            accessory_weight: s.accessory_weight,
        }
    }
}

fn default_accessory_margin() -> f64 { assembler::DEFAULT_ACCESSORY_MARGIN }
fn default_accessory_weight() -> f64 { assembler::DEFAULT_ACCESSORY_WEIGHT }
fn default_top_picks() -> usize { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with OUTFIT__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., OUTFIT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("OUTFIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("OUTFIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_matches_engine() {
        let settings = ScoringSettings::default();
        assert_eq!(ScoringProfile::from(&settings), ScoringProfile::default());
    }

    #[test]
    fn test_default_outfit_policy() {
        let settings = OutfitSettings::default();
        assert_eq!(OutfitPolicy::from(&settings), OutfitPolicy::default());
        assert_eq!(settings.top_picks, 5);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_shipped_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        let settings = Settings::load_from(path).unwrap();
        assert_eq!(settings.catalog.path, "config/catalog.toml");
        assert!(settings.outfit.accessory_margin >= 0.0);
    }
}
