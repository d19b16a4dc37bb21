use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::core::error::EngineError;

/// Garment category, which decides the outfit slot an item can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Category {
    Top,
    Bottom,
    Outerwear,
    Footwear,
    Accessory,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Outerwear => "outerwear",
            Category::Footwear => "footwear",
            Category::Accessory => "accessory",
        }
    }
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" | "tops" => Ok(Category::Top),
            "bottom" | "bottoms" => Ok(Category::Bottom),
            "outerwear" => Ok(Category::Outerwear),
            "footwear" | "shoes" => Ok(Category::Footwear),
            "accessory" | "accessories" => Ok(Category::Accessory),
            _ => Err(EngineError::UnknownLabel {
                kind: "category",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How well a garment copes with physical activity
///
/// Ordered: `Low < Medium < High`, so requirements compare with `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ActivityComfort {
    #[default]
    Low,
    Medium,
    High,
}

impl FromStr for ActivityComfort {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // indoor/outdoor/workout is the vocabulary older catalogs were written in
        match s.trim().to_lowercase().as_str() {
            "low" | "indoor" => Ok(ActivityComfort::Low),
            "medium" | "outdoor" => Ok(ActivityComfort::Medium),
            "high" | "workout" => Ok(ActivityComfort::High),
            _ => Err(EngineError::UnknownLabel {
                kind: "activity_comfort",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ActivityComfort {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Weather condition labels, both for request context and item tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rainy,
    Snowy,
}

impl WeatherCondition {
    /// Rain and snow count as precipitation
    #[inline]
    pub fn is_wet(self) -> bool {
        matches!(self, WeatherCondition::Rainy | WeatherCondition::Snowy)
    }

    /// Parse an optional condition; `None` and blank strings mean "unknown"
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, EngineError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

impl FromStr for WeatherCondition {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clear" | "sunny" => Ok(WeatherCondition::Clear),
            "cloudy" => Ok(WeatherCondition::Cloudy),
            "rainy" => Ok(WeatherCondition::Rainy),
            "snowy" => Ok(WeatherCondition::Snowy),
            _ => Err(EngineError::InvalidCondition(s.to_string())),
        }
    }
}

impl TryFrom<String> for WeatherCondition {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Social occasion the outfit is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Occasion {
    Casual,
    Workout,
    Formal,
    Date,
}

impl FromStr for Occasion {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "casual" | "casual_outing" => Ok(Occasion::Casual),
            "workout" => Ok(Occasion::Workout),
            // office wear is judged against the formal target
            "formal" | "formal_event" | "work_office" => Ok(Occasion::Formal),
            "date" => Ok(Occasion::Date),
            _ => Err(EngineError::InvalidOccasion(s.to_string())),
        }
    }
}

impl TryFrom<String> for Occasion {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Temperature band used for warmth targets and outerwear decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    /// [0, 40)
    Cold,
    /// [40, 60)
    Cool,
    /// [60, 80)
    Warm,
    /// [80, 120]
    Hot,
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(alias = "warmth")]
    pub warmth_score: f64,
    #[serde(default = "default_formality", deserialize_with = "deserialize_formality")]
    pub formality: f64,
    #[serde(default, alias = "activity")]
    pub activity_comfort: ActivityComfort,
    /// Empty means the item is fine in any weather
    #[serde(default)]
    pub weather_tags: BTreeSet<WeatherCondition>,
}

impl ClothingItem {
    pub const MIN_LEVEL: f64 = 0.0;
    pub const MAX_LEVEL: f64 = 10.0;

    /// Check the catalog invariants for this item
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.id.trim().is_empty() {
            return Err(self.invalid("id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(self.invalid("name", "must not be empty"));
        }
        if !in_level_range(self.warmth_score) {
            return Err(self.invalid(
                "warmth_score",
                format!("{} is outside [0, 10]", self.warmth_score),
            ));
        }
        if !in_level_range(self.formality) {
            return Err(self.invalid(
                "formality",
                format!("{} is outside [0, 10]", self.formality),
            ));
        }
        Ok(())
    }

    fn invalid(&self, field: &'static str, reason: impl Into<String>) -> EngineError {
        EngineError::InvalidItem {
            id: self.id.clone(),
            field,
            reason: reason.into(),
        }
    }
}

fn in_level_range(value: f64) -> bool {
    value.is_finite() && (ClothingItem::MIN_LEVEL..=ClothingItem::MAX_LEVEL).contains(&value)
}

fn default_formality() -> f64 {
    2.0
}

/// Map a categorical formality label onto the 0-10 scale
pub fn formality_from_label(label: &str) -> Option<f64> {
    match label.trim().to_lowercase().as_str() {
        "workout" | "athletic" => Some(1.0),
        "casual" => Some(2.0),
        "smart_casual" | "smart-casual" => Some(4.0),
        "business" => Some(6.0),
        "formal" => Some(9.0),
        _ => None,
    }
}

fn deserialize_formality<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Level(f64),
        Label(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Level(level) => Ok(level),
        Raw::Label(label) => formality_from_label(&label).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown formality label '{}'", label))
        }),
    }
}

/// Per-request weather input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherContext {
    pub temp_f: f64,
    pub condition: Option<WeatherCondition>,
}

impl WeatherContext {
    pub fn new(temp_f: f64, condition: Option<WeatherCondition>) -> Self {
        Self { temp_f, condition }
    }
}

/// Everything the engine needs to know about a request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationContext {
    pub weather: WeatherContext,
    pub occasion: Occasion,
}

impl RecommendationContext {
    pub fn new(temp_f: f64, occasion: Occasion, condition: Option<WeatherCondition>) -> Self {
        Self {
            weather: WeatherContext::new(temp_f, condition),
            occasion,
        }
    }
}

/// Echo of the request that produced a result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContextEcho {
    pub temp_f: f64,
    pub occasion: Occasion,
    pub condition: Option<WeatherCondition>,
    pub band: TemperatureBand,
}

/// Coarse rating of a total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Great,
    Good,
    Okay,
    Poor,
}

impl ScoreTier {
    pub const GREAT_THRESHOLD: f64 = 10.0;
    pub const GOOD_THRESHOLD: f64 = 5.0;

    pub fn from_score(score: f64) -> Self {
        if score >= Self::GREAT_THRESHOLD {
            ScoreTier::Great
        } else if score >= Self::GOOD_THRESHOLD {
            ScoreTier::Good
        } else if score > 0.0 {
            ScoreTier::Okay
        } else {
            ScoreTier::Poor
        }
    }
}

/// An item with its additive score breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item: ClothingItem,
    pub temp_component: f64,
    pub occasion_component: f64,
    pub weather_component: f64,
    /// Subtracted from the total; non-zero only for non-weatherproof items in precipitation
    pub wet_penalty: f64,
    pub score: f64,
    pub tier: ScoreTier,
}

/// Outfit slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Slot {
    Top,
    Bottom,
    Footwear,
    Outerwear,
    Accessory,
}

impl Slot {
    pub const MANDATORY: [Slot; 3] = [Slot::Top, Slot::Bottom, Slot::Footwear];

    /// Category of item that may fill this slot
    pub fn category(self) -> Category {
        match self {
            Slot::Top => Category::Top,
            Slot::Bottom => Category::Bottom,
            Slot::Footwear => Category::Footwear,
            Slot::Outerwear => Category::Outerwear,
            Slot::Accessory => Category::Accessory,
        }
    }

    pub fn is_mandatory(self) -> bool {
        Self::MANDATORY.contains(&self)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category().as_str())
    }
}

impl TryFrom<String> for Slot {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let slot = match value.parse::<Category>()? {
            Category::Top => Slot::Top,
            Category::Bottom => Slot::Bottom,
            Category::Footwear => Slot::Footwear,
            Category::Outerwear => Slot::Outerwear,
            Category::Accessory => Slot::Accessory,
        };
        Ok(slot)
    }
}

/// Assembled outfit plus the full ranked list it was drawn from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitResult {
    pub context: ContextEcho,
    pub selected_items: BTreeMap<Slot, ClothingItem>,
    pub total_score: f64,
    pub all_items_scored: Vec<ScoredItem>,
}
