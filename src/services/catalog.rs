use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::core::EngineError;
use crate::models::ClothingItem;

/// Errors that can occur while loading or replacing a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("Duplicate item id: {0}")]
    DuplicateId(String),

    #[error("Invalid item: {0}")]
    InvalidItem(#[from] EngineError),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<ClothingItem>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Bare(Vec<ClothingItem>),
    Wrapped(CatalogFile),
}

/// Validated, immutable catalog snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    revision: u64,
    items: Vec<ClothingItem>,
}

impl Catalog {
    /// Build a catalog at revision 1, validating every item
    pub fn new(items: Vec<ClothingItem>) -> Result<Self, CatalogError> {
        Self::with_revision(items, 1)
    }

    fn with_revision(items: Vec<ClothingItem>, revision: u64) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            item.validate()?;
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { revision, items })
    }

    pub fn empty() -> Self {
        Self {
            revision: 0,
            items: Vec::new(),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn items(&self) -> &[ClothingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parse `[[items]]` tables
    pub fn parse_toml(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.items)
    }

    /// Parse either a bare array or an `{"items": [...]}` object
    pub fn parse_json(content: &str) -> Result<Self, CatalogError> {
        let items = match serde_json::from_str::<JsonCatalog>(content)? {
            JsonCatalog::Bare(items) => items,
            JsonCatalog::Wrapped(file) => file.items,
        };
        Self::new(items)
    }

    /// Load a catalog file, choosing the parser by extension
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::parse_toml(&content),
            Some("json") => Self::parse_json(&content),
            other => Err(CatalogError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Source of catalog snapshots
///
/// A snapshot stays valid for as long as the caller holds it, even if the
/// provider swaps in a newer catalog meanwhile.
pub trait CatalogProvider: Send + Sync {
    fn snapshot(&self) -> Arc<Catalog>;
}

/// In-process catalog with copy-on-read snapshots
#[derive(Debug)]
pub struct InMemoryCatalog {
    current: RwLock<Arc<Catalog>>,
}

impl InMemoryCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Install a new catalog; returns its revision
    pub fn replace(&self, items: Vec<ClothingItem>) -> Result<u64, CatalogError> {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let next = Catalog::with_revision(items, guard.revision() + 1)?;
        let revision = next.revision();
        *guard = Arc::new(next);

        tracing::info!("Catalog replaced (revision {}, {} items)", revision, guard.len());
        Ok(revision)
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityComfort, Category, WeatherCondition};

    const SAMPLE_TOML: &str = r#"
[[items]]
id = "t1"
name = "T-Shirt"
category = "top"
warmth_score = 2
formality = "casual"
activity_comfort = "outdoor"
weather_tags = ["clear", "cloudy"]

[[items]]
id = "s1"
name = "Boots"
category = "shoes"
warmth_score = 5
formality = 3.5
activity_comfort = "medium"
"#;

    fn create_item(id: &str) -> ClothingItem {
        ClothingItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            category: Category::Top,
            warmth_score: 3.0,
            formality: 2.0,
            activity_comfort: ActivityComfort::Low,
            weather_tags: Default::default(),
        }
    }

    #[test]
    fn test_parse_toml() {
        let catalog = Catalog::parse_toml(SAMPLE_TOML).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.revision(), 1);
        let tee = &catalog.items()[0];
        assert_eq!(tee.formality, 2.0);
        assert!(tee.weather_tags.contains(&WeatherCondition::Cloudy));
        assert_eq!(catalog.items()[1].category, Category::Footwear);
    }

    #[test]
    fn test_parse_json_bare_and_wrapped() {
        let bare = r#"[{"id": "1", "name": "Hoodie", "category": "top", "warmth_score": 6}]"#;
        let wrapped =
            r#"{"items": [{"id": "1", "name": "Hoodie", "category": "top", "warmth_score": 6}]}"#;

        assert_eq!(Catalog::parse_json(bare).unwrap().len(), 1);
        assert_eq!(Catalog::parse_json(wrapped).unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = Catalog::new(vec![create_item("a"), create_item("a")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "a"));
    }

    #[test]
    fn test_rejects_out_of_range_item() {
        let mut item = create_item("a");
        item.warmth_score = 12.0;
        let err = Catalog::new(vec![item]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidItem(_)));
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let provider = InMemoryCatalog::new(Catalog::new(vec![create_item("a")]).unwrap());
        let before = provider.snapshot();

        let revision = provider.replace(vec![create_item("b"), create_item("c")]).unwrap();

        assert_eq!(revision, 2);
        assert_eq!(before.len(), 1);
        assert_eq!(provider.snapshot().len(), 2);
    }

    #[test]
    fn test_failed_replace_keeps_current() {
        let provider = InMemoryCatalog::new(Catalog::new(vec![create_item("a")]).unwrap());
        assert!(provider.replace(vec![create_item("x"), create_item("x")]).is_err());
        assert_eq!(provider.snapshot().revision(), 1);
    }

    #[test]
    fn test_unsupported_extension() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/src/lib.rs");
        let err = Catalog::load_from(path).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(ref ext) if ext == "rs"));
    }

    #[test]
    fn test_missing_file() {
        let err = Catalog::load_from("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
