//! Smart suggestions from add history plus a fixed seasonal list.

use std::collections::{HashMap, HashSet};

use crate::history::HistoryLog;
use crate::normalize::capitalize_first;

/// Maximum number of history-derived suggestions.
pub const MAX_FREQUENT: usize = 6;

/// Seasonal items suggested when nothing overrides them.
pub const DEFAULT_SEASONAL: &[&str] = &["Mangoes", "Brown Bread", "Toothpaste"];

pub fn default_seasonal() -> Vec<String> {
    DEFAULT_SEASONAL.iter().map(|s| s.to_string()).collect()
}

/// The most frequently added names, lowercased, most frequent first.
///
/// Equal counts keep the order in which names first appear in the
/// most-recent-first history, so a recent item beats an older one.
pub fn frequent_items(history: &HistoryLog, limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for name in history.iter() {
        let key = name.to_lowercase();
        match slots.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(name, _)| name).collect()
}

/// Frequent items followed by the seasonal list, de-duplicated ignoring case
/// and formatted for display ("brown bread" -> "Brown bread").
pub fn suggest(history: &HistoryLog, seasonal: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();

    frequent_items(history, MAX_FREQUENT)
        .into_iter()
        .chain(seasonal.iter().map(|s| s.trim().to_lowercase()))
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .map(|name| capitalize_first(&name))
        .collect()
}
