use crate::core::scoring::ScoringProfile;
use crate::models::TemperatureBand;

/// Maximum temperature-fit score
pub const W_MAX: f64 = 6.0;

/// Points lost per unit of warmth deviation from the band's ideal
pub const TEMP_PENALTY_PER_UNIT: f64 = 1.2;

/// Lowest temperature considered for scoring (°F)
pub const MIN_SCORING_TEMP_F: f64 = 0.0;

/// Highest temperature considered for scoring (°F)
pub const MAX_SCORING_TEMP_F: f64 = 120.0;

/// Clamp a temperature into the scoring range
#[inline]
pub fn clamp_temperature(temp_f: f64) -> f64 {
    temp_f.clamp(MIN_SCORING_TEMP_F, MAX_SCORING_TEMP_F)
}

/// Look up the temperature band for a reading in °F
///
/// Values outside [0, 120] are clamped first, so anything below zero is
/// `Cold` and anything above 120 is `Hot`.
pub fn temperature_band(temp_f: f64) -> TemperatureBand {
    let t = clamp_temperature(temp_f);
    if t < 40.0 {
        TemperatureBand::Cold
    } else if t < 60.0 {
        TemperatureBand::Cool
    } else if t < 80.0 {
        TemperatureBand::Warm
    } else {
        TemperatureBand::Hot
    }
}

impl TemperatureBand {
    /// Ideal item warmth on the 0-10 scale for this band
    pub fn ideal_warmth(self) -> f64 {
        match self {
            TemperatureBand::Cold => 9.0,
            TemperatureBand::Cool => 6.0,
            TemperatureBand::Warm => 3.0,
            TemperatureBand::Hot => 1.0,
        }
    }

    /// Bands where a layer on top is expected
    pub fn wants_outerwear(self) -> bool {
        matches!(self, TemperatureBand::Cold | TemperatureBand::Cool)
    }
}

/// Rate how well an item's warmth matches the temperature
///
/// # Arguments
/// * `warmth_score` - Item warmth, 0 (coldest) to 10 (warmest)
/// * `temp_f` - Requested temperature in °F (clamped to [0, 120])
/// * `profile` - Scoring constants
///
/// # Returns
/// Score in `[0, profile.w_max]`
#[inline]
pub fn score_temperature(warmth_score: f64, temp_f: f64, profile: &ScoringProfile) -> f64 {
    let ideal = temperature_band(temp_f).ideal_warmth();
    let deviation = (warmth_score - ideal).abs();

    (profile.w_max - deviation * profile.temp_penalty_per_unit).clamp(0.0, profile.w_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(temperature_band(39.9), TemperatureBand::Cold);
        assert_eq!(temperature_band(40.0), TemperatureBand::Cool);
        assert_eq!(temperature_band(60.0), TemperatureBand::Warm);
        assert_eq!(temperature_band(80.0), TemperatureBand::Hot);
        assert_eq!(temperature_band(120.0), TemperatureBand::Hot);
    }

    #[test]
    fn test_out_of_range_temperatures_clamp() {
        assert_eq!(temperature_band(-30.0), TemperatureBand::Cold);
        assert_eq!(temperature_band(150.0), TemperatureBand::Hot);
    }

    #[test]
    fn test_perfect_match_scores_max() {
        let profile = ScoringProfile::default();
        assert_eq!(score_temperature(3.0, 70.0, &profile), W_MAX);
        assert_eq!(score_temperature(9.0, 10.0, &profile), W_MAX);
    }

    #[test]
    fn test_score_is_lookup_within_band() {
        let profile = ScoringProfile::default();
        // Every reading in a band shares the same target
        assert_eq!(
            score_temperature(5.0, 60.0, &profile),
            score_temperature(5.0, 79.9, &profile)
        );
    }

    #[test]
    fn test_large_deviation_floors_at_zero() {
        let profile = ScoringProfile::default();
        assert_eq!(score_temperature(10.0, 100.0, &profile), 0.0);
    }
}
