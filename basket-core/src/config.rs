//! Assistant configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::speech::Locale;
use crate::suggestions::default_seasonal;

pub const CATALOG_PATH_VAR: &str = "BASKET_CATALOG_PATH";
pub const LOCALE_VAR: &str = "BASKET_LOCALE";
pub const SEASONAL_VAR: &str = "BASKET_SEASONAL";

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    /// Catalog JSON file. `None` uses the embedded catalog.
    pub catalog_path: Option<PathBuf>,
    /// Locale new sessions start in.
    pub locale: Locale,
    /// Seasonal items appended to every suggestion list.
    pub seasonal: Vec<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            locale: Locale::default(),
            seasonal: default_seasonal(),
        }
    }
}

impl AssistantConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `BASKET_CATALOG_PATH`: catalog JSON file (default: embedded catalog)
    /// - `BASKET_LOCALE`: en-IN, en-US or hi-IN (default: en-IN)
    /// - `BASKET_SEASONAL`: comma-separated seasonal items
    ///   (default: "Mangoes,Brown Bread,Toothpaste"; empty disables them)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog_path = lookup(CATALOG_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let locale = match lookup(LOCALE_VAR) {
            Some(tag) => tag.parse()?,
            None => Locale::default(),
        };

        let seasonal = lookup(SEASONAL_VAR)
            .map(|v| parse_list(&v))
            .unwrap_or_else(default_seasonal);

        Ok(Self {
            catalog_path,
            locale,
            seasonal,
        })
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
