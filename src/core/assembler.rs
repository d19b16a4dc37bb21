use std::collections::{BTreeMap, HashSet};

use crate::core::error::EngineError;
use crate::core::temperature::temperature_band;
use crate::models::{
    ContextEcho, OutfitResult, RecommendationContext, ScoredItem, Slot, WeatherCondition,
};

/// Default score margin an accessory may trail the best item by
pub const DEFAULT_ACCESSORY_MARGIN: f64 = 2.0;

/// Default share of an accessory's score counted towards the outfit total
pub const DEFAULT_ACCESSORY_WEIGHT: f64 = 0.5;

/// Policy knobs for the optional slots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutfitPolicy {
    /// An accessory is worn only if it scores within this margin of the best item
    pub accessory_margin: f64,
    /// Weight of the accessory in `total_score`; 1.0 counts it like any
    /// other slot, 0.0 leaves it out of the total entirely
    pub accessory_weight: f64,
}

impl Default for OutfitPolicy {
    fn default() -> Self {
        Self {
            accessory_margin: DEFAULT_ACCESSORY_MARGIN,
            accessory_weight: DEFAULT_ACCESSORY_WEIGHT,
        }
    }
}

impl OutfitPolicy {
    /// Weight a slot's score contributes to the outfit total
    pub fn slot_weight(&self, slot: Slot) -> f64 {
        match slot {
            Slot::Accessory => self.accessory_weight,
            _ => 1.0,
        }
    }
}

/// Whether the context calls for an outer layer
pub fn needs_outerwear(context: &RecommendationContext) -> bool {
    let cold = temperature_band(context.weather.temp_f).wants_outerwear();
    let wet = context
        .weather
        .condition
        .map(WeatherCondition::is_wet)
        .unwrap_or(false);
    cold || wet
}

/// Slots to fill for this context, in fill order
///
/// The accessory slot is always listed; whether it is filled depends on the
/// margin rule.
pub fn planned_slots(context: &RecommendationContext) -> Vec<Slot> {
    let mut slots = Slot::MANDATORY.to_vec();
    if needs_outerwear(context) {
        slots.push(Slot::Outerwear);
    }
    slots.push(Slot::Accessory);
    slots
}

/// Build an outfit from a ranked list
///
/// Picks the highest-ranked item per slot. Mandatory slots (top, bottom,
/// footwear) must be filled or the call fails with `InsufficientInventory`;
/// outerwear is added when the temperature band or precipitation calls for
/// it; an accessory is added only if it is close enough to the best score.
pub fn assemble(
    ranked_items: Vec<ScoredItem>,
    context: &RecommendationContext,
    policy: &OutfitPolicy,
) -> Result<OutfitResult, EngineError> {
    let best_score = ranked_items.first().map(|s| s.score);

    let mut selected = BTreeMap::new();
    let mut used_ids: HashSet<&str> = HashSet::new();
    let mut total_score = 0.0;

    for slot in planned_slots(context) {
        let candidate = ranked_items.iter().find(|scored| {
            scored.item.category == slot.category() && !used_ids.contains(scored.item.id.as_str())
        });

        let Some(candidate) = candidate else {
            if slot.is_mandatory() {
                tracing::debug!(%slot, "no candidate for mandatory slot");
                return Err(EngineError::InsufficientInventory(slot));
            }
            tracing::debug!(%slot, "optional slot left empty, no candidate");
            continue;
        };

        if slot == Slot::Accessory {
            let threshold = best_score.unwrap_or(candidate.score) - policy.accessory_margin;
            if candidate.score < threshold {
                tracing::debug!(
                    item = %candidate.item.id,
                    score = candidate.score,
                    threshold,
                    "accessory below margin, skipped"
                );
                continue;
            }
        }

        used_ids.insert(candidate.item.id.as_str());
        total_score += candidate.score * policy.slot_weight(slot);
        selected.insert(slot, candidate.item.clone());
    }

    let context_echo = ContextEcho {
        temp_f: context.weather.temp_f,
        occasion: context.occasion,
        condition: context.weather.condition,
        band: temperature_band(context.weather.temp_f),
    };

    Ok(OutfitResult {
        context: context_echo,
        selected_items: selected,
        total_score,
        all_items_scored: ranked_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityComfort, Category, ClothingItem, Occasion, ScoreTier};
    use std::collections::BTreeSet;

    fn scored(id: &str, category: Category, score: f64) -> ScoredItem {
        ScoredItem {
            item: ClothingItem {
                id: id.to_string(),
                name: id.to_string(),
                category,
                warmth_score: 3.0,
                formality: 2.0,
                activity_comfort: ActivityComfort::Low,
                weather_tags: BTreeSet::new(),
            },
            temp_component: 0.0,
            occasion_component: 0.0,
            weather_component: 0.0,
            wet_penalty: 0.0,
            score,
            tier: ScoreTier::from_score(score),
        }
    }

    fn wardrobe() -> Vec<ScoredItem> {
        vec![
            scored("tee", Category::Top, 12.0),
            scored("jeans", Category::Bottom, 11.0),
            scored("polo", Category::Top, 10.5),
            scored("sneakers", Category::Footwear, 10.0),
            scored("jacket", Category::Outerwear, 9.0),
            scored("cap", Category::Accessory, 6.0),
        ]
    }

    #[test]
    fn test_fills_mandatory_slots_with_best_items() {
        let ctx = RecommendationContext::new(70.0, Occasion::Casual, Some(WeatherCondition::Clear));
        let outfit = assemble(wardrobe(), &ctx, &OutfitPolicy::default()).unwrap();

        assert_eq!(outfit.selected_items[&Slot::Top].id, "tee");
        assert_eq!(outfit.selected_items[&Slot::Bottom].id, "jeans");
        assert_eq!(outfit.selected_items[&Slot::Footwear].id, "sneakers");
        assert!(!outfit.selected_items.contains_key(&Slot::Outerwear));
        assert_eq!(outfit.total_score, 33.0);
    }

    #[test]
    fn test_outerwear_when_cool_or_wet() {
        let cool = RecommendationContext::new(50.0, Occasion::Casual, None);
        let outfit = assemble(wardrobe(), &cool, &OutfitPolicy::default()).unwrap();
        assert_eq!(outfit.selected_items[&Slot::Outerwear].id, "jacket");

        let rainy =
            RecommendationContext::new(75.0, Occasion::Casual, Some(WeatherCondition::Rainy));
        let outfit = assemble(wardrobe(), &rainy, &OutfitPolicy::default()).unwrap();
        assert!(outfit.selected_items.contains_key(&Slot::Outerwear));
    }

    #[test]
    fn test_missing_optional_outerwear_is_not_an_error() {
        let ctx = RecommendationContext::new(20.0, Occasion::Casual, None);
        let items: Vec<_> = wardrobe()
            .into_iter()
            .filter(|s| s.item.category != Category::Outerwear)
            .collect();
        let outfit = assemble(items, &ctx, &OutfitPolicy::default()).unwrap();
        assert!(!outfit.selected_items.contains_key(&Slot::Outerwear));
    }

    #[test]
    fn test_missing_mandatory_slot_fails() {
        let ctx = RecommendationContext::new(70.0, Occasion::Casual, None);
        let items: Vec<_> = wardrobe()
            .into_iter()
            .filter(|s| s.item.category != Category::Footwear)
            .collect();
        let err = assemble(items, &ctx, &OutfitPolicy::default()).unwrap_err();
        assert_eq!(err, EngineError::InsufficientInventory(Slot::Footwear));
    }

    #[test]
    fn test_accessory_margin() {
        let ctx = RecommendationContext::new(70.0, Occasion::Casual, None);

        let outfit = assemble(wardrobe(), &ctx, &OutfitPolicy::default()).unwrap();
        assert!(!outfit.selected_items.contains_key(&Slot::Accessory));

        let generous = OutfitPolicy {
            accessory_margin: 6.0,
            accessory_weight: 0.5,
        };
        let outfit = assemble(wardrobe(), &ctx, &generous).unwrap();
        assert_eq!(outfit.selected_items[&Slot::Accessory].id, "cap");
        assert_eq!(outfit.total_score, 33.0 + 3.0);
    }

    #[test]
    fn test_accessory_weight_policy() {
        let ctx = RecommendationContext::new(70.0, Occasion::Casual, None);
        let counted = OutfitPolicy {
            accessory_margin: 6.0,
            accessory_weight: 1.0,
        };
        let excluded = OutfitPolicy {
            accessory_weight: 0.0,
            ..counted
        };

        let full = assemble(wardrobe(), &ctx, &counted).unwrap();
        let none = assemble(wardrobe(), &ctx, &excluded).unwrap();
        assert_eq!(full.total_score, 39.0);
        assert_eq!(none.total_score, 33.0);
        assert!(none.selected_items.contains_key(&Slot::Accessory));
    }

    #[test]
    fn test_duplicate_ids_fill_one_slot_only() {
        let ctx = RecommendationContext::new(70.0, Occasion::Casual, None);
        let mut items = wardrobe();
        // Same id reused for a bottom; it may not be worn twice
        items.insert(1, scored("tee", Category::Bottom, 11.5));

        let outfit = assemble(items, &ctx, &OutfitPolicy::default()).unwrap();
        assert_eq!(outfit.selected_items[&Slot::Top].id, "tee");
        assert_eq!(outfit.selected_items[&Slot::Bottom].id, "jeans");
    }
}
