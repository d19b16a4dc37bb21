use crate::core::scoring::ScoringProfile;
use crate::models::{ActivityComfort, Occasion};

/// Maximum occasion-fit score
pub const O_MAX: f64 = 5.0;

/// Maximum credit from formality closeness
pub const FORMALITY_MAX: f64 = 3.0;

/// Points lost per unit of formality deviation from the occasion's target
pub const FORMALITY_PENALTY_PER_UNIT: f64 = 0.5;

/// Credit for meeting the occasion's activity requirement
pub const ACTIVITY_CREDIT: f64 = 2.0;

/// Penalty for falling short of the activity requirement
pub const ACTIVITY_SHORTFALL_PENALTY: f64 = 1.0;

/// Penalty for falling short at a workout, where the mismatch is a hard one
pub const WORKOUT_SHORTFALL_PENALTY: f64 = 4.0;

/// What an occasion asks of an item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccasionTarget {
    /// Ideal formality on the 0-10 scale
    pub formality: f64,
    /// Minimum activity comfort that earns full credit
    pub min_activity: ActivityComfort,
}

impl Occasion {
    pub fn target(self) -> OccasionTarget {
        match self {
            Occasion::Casual => OccasionTarget {
                formality: 3.0,
                min_activity: ActivityComfort::Low,
            },
            Occasion::Workout => OccasionTarget {
                formality: 1.0,
                min_activity: ActivityComfort::High,
            },
            Occasion::Formal => OccasionTarget {
                formality: 9.0,
                min_activity: ActivityComfort::Low,
            },
            Occasion::Date => OccasionTarget {
                formality: 7.0,
                min_activity: ActivityComfort::Medium,
            },
        }
    }
}

/// Formality-closeness term
#[inline]
pub fn formality_term(formality: f64, occasion: Occasion, profile: &ScoringProfile) -> f64 {
    let deviation = (formality - occasion.target().formality).abs();
    (profile.formality_max - deviation * profile.formality_penalty_per_unit).max(0.0)
}

/// Activity-adequacy term: full credit or a fixed (negative) penalty
#[inline]
pub fn activity_term(
    activity: ActivityComfort,
    occasion: Occasion,
    profile: &ScoringProfile,
) -> f64 {
    if activity >= occasion.target().min_activity {
        profile.activity_credit
    } else if occasion == Occasion::Workout {
        -profile.workout_shortfall_penalty
    } else {
        -profile.activity_shortfall_penalty
    }
}

/// Rate how well an item's formality and activity comfort suit the occasion
///
/// Returns a score in `[0, profile.o_max]`.
pub fn score_occasion(
    formality: f64,
    activity: ActivityComfort,
    occasion: Occasion,
    profile: &ScoringProfile,
) -> f64 {
    let total =
        formality_term(formality, occasion, profile) + activity_term(activity, occasion, profile);
    total.clamp(0.0, profile.o_max)
}
