use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::{Occasion, RecommendationContext, WeatherCondition};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Recommendation result cache
///
/// Ranking is deterministic, so a result depends only on the request
/// context and the catalog revision. Entries are stored as serialized JSON
/// and expire after the configured TTL.
pub struct RecommendationCache {
    entries: moka::future::Cache<String, Vec<u8>>,
}

impl RecommendationCache {
    /// Create a new cache
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries }
    }

    /// Get a value from cache
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        match self.entries.get(key).await {
            Some(bytes) => {
                tracing::trace!("Cache hit: {}", key);
                Ok(serde_json::from_slice(&bytes)?)
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Err(CacheError::CacheMiss(key.to_string()))
            }
        }
    }

    /// Set a value in cache
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.entries.insert(key.to_string(), bytes).await;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Drop every entry
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
        tracing::debug!("Invalidated recommendation cache");
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for an outfit recommendation
    ///
    /// The temperature is keyed by its exact bit pattern; the catalog
    /// revision makes entries from a replaced catalog unreachable.
    pub fn outfit(context: &RecommendationContext, catalog_revision: u64) -> String {
        format!(
            "outfit:{}:{}:{}:{:016x}",
            catalog_revision,
            occasion_key(context.occasion),
            condition_key(context.weather.condition),
            context.weather.temp_f.to_bits()
        )
    }

    /// Build a cache key for a diagnostic ranking
    pub fn diagnostics(
        context: &RecommendationContext,
        catalog_revision: u64,
        top_n: usize,
    ) -> String {
        format!(
            "diagnostics:{}:{}:{}:{:016x}:{}",
            catalog_revision,
            occasion_key(context.occasion),
            condition_key(context.weather.condition),
            context.weather.temp_f.to_bits(),
            top_n
        )
    }
}

fn occasion_key(occasion: Occasion) -> &'static str {
    match occasion {
        Occasion::Casual => "casual",
        Occasion::Workout => "workout",
        Occasion::Formal => "formal",
        Occasion::Date => "date",
    }
}

fn condition_key(condition: Option<WeatherCondition>) -> &'static str {
    match condition {
        None => "none",
        Some(WeatherCondition::Clear) => "clear",
        Some(WeatherCondition::Cloudy) => "cloudy",
        Some(WeatherCondition::Rainy) => "rainy",
        Some(WeatherCondition::Snowy) => "snowy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = RecommendationCache::new(100, 60);

        let key = "test_key";
        let value = vec![1.5_f64, 2.5];

        cache.set(key, &value).await.unwrap();
        let result: Vec<f64> = cache.get(key).await.unwrap();
        assert_eq!(result, value);

        cache.invalidate_all();
        assert!(cache.get::<Vec<f64>>(key).await.is_err());
    }

    #[tokio::test]
    async fn test_cached_floats_come_back_exact() {
        let cache = RecommendationCache::new(100, 60);

        // Shortest decimal forms that only parse back exactly with correct rounding
        let value = vec![44.449999999999996_f64, 0.1 + 0.2, 12.799999999999999, 1.0 / 3.0];
        cache.set("floats", &value).await.unwrap();
        let result: Vec<f64> = cache.get("floats").await.unwrap();

        let bits = |v: &[f64]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&result), bits(&value));
    }

    #[test]
    fn test_cache_key_builder() {
        let ctx = RecommendationContext::new(70.0, Occasion::Date, Some(WeatherCondition::Rainy));
        assert_eq!(
            CacheKey::outfit(&ctx, 3),
            format!("outfit:3:date:rainy:{:016x}", 70.0_f64.to_bits())
        );

        let other = RecommendationContext::new(70.0, Occasion::Date, None);
        assert_ne!(CacheKey::outfit(&ctx, 3), CacheKey::outfit(&other, 3));
        assert_ne!(CacheKey::outfit(&ctx, 3), CacheKey::outfit(&ctx, 4));
        assert_ne!(CacheKey::outfit(&ctx, 3), CacheKey::diagnostics(&ctx, 3, 5));
    }
}
