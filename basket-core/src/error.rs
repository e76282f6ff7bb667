use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid price for {name}: {price}")]
    InvalidPrice { name: String, price: f64 },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ListError {
    #[error("No list entry at index {index} (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported locale: {0} (expected one of en-IN, en-US, hi-IN)")]
    UnsupportedLocale(String),
}
