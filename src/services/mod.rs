// Service exports
pub mod cache;
pub mod catalog;

pub use cache::{CacheError, CacheKey, RecommendationCache};
pub use catalog::{Catalog, CatalogError, CatalogProvider, InMemoryCatalog};
