use std::cmp::Ordering;

use crate::models::ScoredItem;

/// Total order over scored items
///
/// 1. score, descending
/// 2. occasion component, descending
/// 3. name, ascending
/// 4. id, ascending (catalogs may repeat names)
pub fn compare(a: &ScoredItem, b: &ScoredItem) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.occasion_component.total_cmp(&a.occasion_component))
        .then_with(|| a.item.name.cmp(&b.item.name))
        .then_with(|| a.item.id.cmp(&b.item.id))
}

/// Rank scored items best-first
///
/// Deterministic for identical inputs and idempotent: ranking an
/// already-ranked list returns it unchanged.
pub fn rank(mut scored_items: Vec<ScoredItem>) -> Vec<ScoredItem> {
    scored_items.sort_by(compare);
    scored_items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityComfort, Category, ClothingItem, ScoreTier};
    use std::collections::BTreeSet;

    fn scored(id: &str, name: &str, score: f64, occasion: f64) -> ScoredItem {
        ScoredItem {
            item: ClothingItem {
                id: id.to_string(),
                name: name.to_string(),
                category: Category::Top,
                warmth_score: 3.0,
                formality: 2.0,
                activity_comfort: ActivityComfort::Low,
                weather_tags: BTreeSet::new(),
            },
            temp_component: 0.0,
            occasion_component: occasion,
            weather_component: 0.0,
            wet_penalty: 0.0,
            score,
            tier: ScoreTier::from_score(score),
        }
    }

    fn ids(items: &[ScoredItem]) -> Vec<&str> {
        items.iter().map(|s| s.item.id.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_score_desc() {
        let ranked = rank(vec![scored("a", "A", 3.0, 1.0), scored("b", "B", 9.0, 1.0)]);
        assert_eq!(ids(&ranked), vec!["b", "a"]);
    }

    #[test]
    fn test_occasion_breaks_score_ties() {
        let ranked = rank(vec![scored("a", "A", 8.0, 2.0), scored("b", "B", 8.0, 4.0)]);
        assert_eq!(ids(&ranked), vec!["b", "a"]);
    }

    #[test]
    fn test_name_then_id_break_remaining_ties() {
        let ranked = rank(vec![
            scored("3", "Sweater", 8.0, 2.0),
            scored("2", "Blouse", 8.0, 2.0),
            scored("1", "Sweater", 8.0, 2.0),
        ]);
        assert_eq!(ids(&ranked), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let once = rank(vec![
            scored("a", "A", 5.0, 1.0),
            scored("b", "B", 7.0, 3.0),
            scored("c", "C", 7.0, 3.0),
        ]);
        let twice = rank(once.clone());
        assert_eq!(once, twice);
    }
}
