use std::collections::BTreeSet;

use crate::core::scoring::ScoringProfile;
use crate::models::WeatherCondition;

/// Maximum weather-condition score
pub const C_MAX: f64 = 4.0;

/// Penalty for wearing an item with no wet-weather tag in rain or snow
pub const WET_WEATHER_PENALTY: f64 = 2.0;

/// Rate how well an item's weather tags tolerate the condition
///
/// * unknown condition - neutral midpoint, so the axis does not affect ranking
/// * no tags (all-weather) - full credit
/// * condition tagged - full credit, otherwise zero
pub fn score_weather(
    tags: &BTreeSet<WeatherCondition>,
    condition: Option<WeatherCondition>,
    profile: &ScoringProfile,
) -> f64 {
    let Some(condition) = condition else {
        return profile.c_max / 2.0;
    };

    if tags.is_empty() || tags.contains(&condition) {
        profile.c_max
    } else {
        0.0
    }
}

/// Penalty for a non-weatherproof item in precipitation
///
/// Applies only when the condition is rainy or snowy and the item carries
/// tags, none of which is a wet condition. Untagged items are all-weather
/// and never penalized.
pub fn wet_weather_penalty(
    tags: &BTreeSet<WeatherCondition>,
    condition: Option<WeatherCondition>,
    profile: &ScoringProfile,
) -> f64 {
    match condition {
        Some(c) if c.is_wet() && !tags.is_empty() && !tags.iter().any(|t| t.is_wet()) => {
            profile.wet_weather_penalty
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[WeatherCondition]) -> BTreeSet<WeatherCondition> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_unknown_condition_is_neutral() {
        let profile = ScoringProfile::default();
        let score = score_weather(&tags(&[WeatherCondition::Clear]), None, &profile);
        assert_eq!(score, C_MAX / 2.0);
    }

    #[test]
    fn test_all_weather_gets_full_credit() {
        let profile = ScoringProfile::default();
        let score = score_weather(&BTreeSet::new(), Some(WeatherCondition::Snowy), &profile);
        assert_eq!(score, C_MAX);
    }

    #[test]
    fn test_tag_match_and_mismatch() {
        let profile = ScoringProfile::default();
        let t = tags(&[WeatherCondition::Clear, WeatherCondition::Cloudy]);
        assert_eq!(score_weather(&t, Some(WeatherCondition::Cloudy), &profile), C_MAX);
        assert_eq!(score_weather(&t, Some(WeatherCondition::Rainy), &profile), 0.0);
    }

    #[test]
    fn test_wet_penalty_rules() {
        let profile = ScoringProfile::default();
        let rainy = Some(WeatherCondition::Rainy);

        assert_eq!(wet_weather_penalty(&BTreeSet::new(), rainy, &profile), 0.0);
        assert_eq!(
            wet_weather_penalty(&tags(&[WeatherCondition::Clear]), rainy, &profile),
            WET_WEATHER_PENALTY
        );
        // Snow gear is still weatherproof in the rain
        assert_eq!(
            wet_weather_penalty(&tags(&[WeatherCondition::Snowy]), rainy, &profile),
            0.0
        );
        assert_eq!(
            wet_weather_penalty(
                &tags(&[WeatherCondition::Clear]),
                Some(WeatherCondition::Cloudy),
                &profile,
            ),
            0.0
        );
    }
}
