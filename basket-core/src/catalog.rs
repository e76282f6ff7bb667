//! Product catalog and search.
//!
//! The catalog is a static, read-only list of products loaded once at startup,
//! either from the embedded `data/catalog.json` or from a file on disk.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub name: String,
    pub brand: String,
    pub price: f64,
}

/// Product lookup used by the dispatcher.
///
/// Implementations return matches in their native order; results are a fresh
/// snapshot and are never merged with a previous search.
pub trait ProductSearch: Send + Sync + fmt::Debug {
    /// Case-insensitive match on name or brand, optionally capped at `max_price`.
    fn search(&self, query: &str, max_price: Option<f64>) -> Vec<CatalogProduct>;
}

/// In-memory catalog searched with a linear substring scan.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<CatalogProduct>,
}

impl Catalog {
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Self { products }
    }

    /// The catalog bundled with the crate.
    pub fn embedded() -> Self {
        let json = include_str!("../../data/catalog.json");
        Self::from_json(json).expect("Failed to parse embedded catalog.json")
    }

    /// Parse a catalog from a JSON array of `{name, brand, price}` records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<CatalogProduct> = serde_json::from_str(json)?;

        if let Some(bad) = products
            .iter()
            .find(|p| !p.price.is_finite() || p.price < 0.0)
        {
            return Err(CatalogError::InvalidPrice {
                name: bad.name.clone(),
                price: bad.price,
            });
        }

        Ok(Self::new(products))
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Load from `path` when given, otherwise use the embedded catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::embedded()),
        }
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductSearch for Catalog {
    fn search(&self, query: &str, max_price: Option<f64>) -> Vec<CatalogProduct> {
        let query = query.to_lowercase();

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query) || p.brand.to_lowercase().contains(&query)
            })
            .filter(|p| max_price.map_or(true, |max| p.price <= max))
            .cloned()
            .collect()
    }
}
