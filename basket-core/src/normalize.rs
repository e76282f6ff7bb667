//! Item name normalization.
//!
//! Names coming out of the command parser carry whatever the speaker said,
//! including pack sizes like "500ml" or "1kg". The list engine compares names
//! only after they have been through [`normalize_name`].

use regex::Regex;
use std::sync::LazyLock;

/// A pack-size token: digits immediately followed by a metric unit.
static SIZE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+(?:l|kg|g|ml)\b").expect("size token pattern is valid")
});

/// Strip pack-size tokens and collapse whitespace.
///
/// `"500ml  Milk"` becomes `"Milk"`. Casing is preserved.
pub fn normalize_name(raw: &str) -> String {
    let stripped = SIZE_TOKEN.replace_all(raw, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive name comparison used for list lookups.
pub fn same_item(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
