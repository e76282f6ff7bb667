//! The shopping list engine.
//!
//! Holds the ordered list entries for one session together with the add
//! history that feeds suggestions. Every name is normalized before it is
//! compared, and comparisons are case-insensitive, so the list never holds
//! two entries for the same item.

use serde::{Deserialize, Serialize};

use crate::categorizer::{categorize, Category};
use crate::error::ListError;
use crate::history::HistoryLog;
use crate::normalize::{normalize_name, same_item};

/// One line of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
    pub qty: u32,
    pub category: Category,
}

/// What an operation did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// A new entry was appended.
    Created,
    /// An existing entry's quantity was increased; carries the new total.
    Merged { total: u32 },
    /// An existing entry's quantity was set.
    QuantitySet,
    Removed,
    /// No entry matched. Remove and modify still report success.
    NotFound,
    /// The name was empty after normalization; nothing happened.
    Ignored,
}

/// Result of a list operation: the normalized name it acted on and what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUpdate {
    pub name: String,
    pub change: ListChange,
}

impl ListUpdate {
    fn new(name: String, change: ListChange) -> Self {
        Self { name, change }
    }

    pub fn is_ignored(&self) -> bool {
        self.change == ListChange::Ignored
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    entries: Vec<ListEntry>,
    history: HistoryLog,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in display order (insertion order).
    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ListEntry> {
        self.entries.get(index)
    }

    /// Find an entry by name, normalizing and ignoring case.
    pub fn find(&self, name: &str) -> Option<&ListEntry> {
        let name = normalize_name(name);
        self.entries.iter().find(|e| same_item(&e.name, &name))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| same_item(&e.name, name))
    }

    /// Add `qty` of an item, merging into an existing entry when the name
    /// matches. The first spelling of a name is the one kept for display.
    pub fn add(&mut self, raw_name: &str, qty: u32) -> ListUpdate {
        let name = normalize_name(raw_name);
        if name.is_empty() {
            tracing::debug!(raw_name, "ignoring add with empty item name");
            return ListUpdate::new(name, ListChange::Ignored);
        }
        let qty = qty.max(1);

        let change = match self.position(&name) {
            Some(idx) => {
                let entry = &mut self.entries[idx];
                entry.qty = entry.qty.saturating_add(qty);
                ListChange::Merged { total: entry.qty }
            }
            None => {
                self.entries.push(ListEntry {
                    name: name.clone(),
                    qty,
                    category: categorize(&name),
                });
                ListChange::Created
            }
        };

        self.history.record(name.clone());
        ListUpdate::new(name, change)
    }

    /// Remove an item. Removing something that isn't on the list is a no-op.
    pub fn remove(&mut self, raw_name: &str) -> ListUpdate {
        let name = normalize_name(raw_name);
        if name.is_empty() {
            return ListUpdate::new(name, ListChange::Ignored);
        }
        let before = self.entries.len();
        self.entries.retain(|e| !same_item(&e.name, &name));

        let change = if self.entries.len() < before {
            ListChange::Removed
        } else {
            tracing::debug!(%name, "remove for item not on the list");
            ListChange::NotFound
        };
        ListUpdate::new(name, change)
    }

    /// Set an item's quantity. Modifying something that isn't on the list is a no-op.
    pub fn modify(&mut self, raw_name: &str, qty: u32) -> ListUpdate {
        let name = normalize_name(raw_name);
        if name.is_empty() {
            return ListUpdate::new(name, ListChange::Ignored);
        }

        let change = match self.position(&name) {
            Some(idx) => {
                self.entries[idx].qty = qty.max(1);
                ListChange::QuantitySet
            }
            None => {
                tracing::debug!(%name, "modify for item not on the list");
                ListChange::NotFound
            }
        };
        ListUpdate::new(name, change)
    }

    /// Direct edit of the quantity at `index` from user-typed text.
    ///
    /// See [`parse_quantity_input`] for how the text is read.
    pub fn set_quantity_from_input(&mut self, index: usize, input: &str) -> Result<u32, ListError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(ListError::IndexOutOfRange { index, len })?;
        entry.qty = parse_quantity_input(input);
        Ok(entry.qty)
    }

    /// The +1 affordance: routes through [`ShoppingList::modify`].
    pub fn increment(&mut self, index: usize) -> Result<(ListUpdate, u32), ListError> {
        let entry = self.entry_at(index)?;
        let (name, qty) = (entry.name.clone(), entry.qty.saturating_add(1));
        Ok((self.modify(&name, qty), qty))
    }

    /// The -1 affordance: routes through [`ShoppingList::modify`], never below 1.
    pub fn decrement(&mut self, index: usize) -> Result<(ListUpdate, u32), ListError> {
        let entry = self.entry_at(index)?;
        let (name, qty) = (entry.name.clone(), entry.qty.saturating_sub(1).max(1));
        Ok((self.modify(&name, qty), qty))
    }

    /// The remove button: routes through [`ShoppingList::remove`].
    pub fn remove_at(&mut self, index: usize) -> Result<ListUpdate, ListError> {
        let name = self.entry_at(index)?.name.clone();
        Ok(self.remove(&name))
    }

    fn entry_at(&self, index: usize) -> Result<&ListEntry, ListError> {
        self.entries.get(index).ok_or(ListError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }
}

/// Read a typed quantity the way a number input would: leading whitespace
/// and an optional `+` are skipped, then the leading digits are used.
/// Empty, non-numeric, negative, zero or overflowing input reads as 1.
pub fn parse_quantity_input(input: &str) -> u32 {
    let s = input.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits_end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());

    s[..digits_end]
        .parse::<u32>()
        .ok()
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_creates_entry_with_category() {
        let mut list = ShoppingList::new();
        let update = list.add("Whole Milk", 2);
        assert_eq!(update.change, ListChange::Created);
        assert_eq!(
            list.entries(),
            &[ListEntry {
                name: "Whole Milk".to_string(),
                qty: 2,
                category: Category::Dairy,
            }]
        );
    }

    #[test]
    fn test_add_merges_case_insensitively() {
        let mut list = ShoppingList::new();
        list.add("Apples", 2);
        let update = list.add("apples", 3);
        assert_eq!(update.change, ListChange::Merged { total: 5 });
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].name, "Apples");
        assert_eq!(list.entries()[0].qty, 5);
    }

    #[test]
    fn test_add_normalizes_pack_sizes() {
        let mut list = ShoppingList::new();
        list.add("500ml milk", 1);
        list.add("milk 1L", 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].name, "milk");
        assert_eq!(list.entries()[0].qty, 2);
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut list = ShoppingList::new();
        list.add("bread", 1);
        list.add("soap", 1);
        list.add("bread", 1);
        let names: Vec<&str> = list.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["bread", "soap"]);
    }

    #[test]
    fn test_add_records_history_every_time() {
        let mut list = ShoppingList::new();
        list.add("bread", 1);
        list.add("Bread", 4);
        assert_eq!(list.history().iter().collect::<Vec<_>>(), vec!["Bread", "bread"]);
    }

    #[test]
    fn test_add_empty_name_is_ignored() {
        let mut list = ShoppingList::new();
        let update = list.add("500ml", 1);
        assert!(update.is_ignored());
        assert!(list.is_empty());
        assert!(list.history().is_empty());
        assert!(list.remove(" 1kg ").is_ignored());
        assert!(list.modify("", 3).is_ignored());
    }

    #[test]
    fn test_remove() {
        let mut list = ShoppingList::new();
        list.add("Milk", 1);
        list.add("bread", 1);
        assert_eq!(list.remove("MILK").change, ListChange::Removed);
        assert_eq!(list.len(), 1);
        assert!(list.find("milk").is_none());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut list = ShoppingList::new();
        list.add("bread", 1);
        let update = list.remove("caviar");
        assert_eq!(update.change, ListChange::NotFound);
        assert_eq!(update.name, "caviar");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_modify_sets_absolute_quantity() {
        let mut list = ShoppingList::new();
        list.add("apples", 2);
        list.modify("Apples", 7);
        list.modify("Apples", 7);
        assert_eq!(list.find("apples").map(|e| e.qty), Some(7));
    }

    #[test]
    fn test_modify_missing_is_noop() {
        let mut list = ShoppingList::new();
        list.add("apples", 2);
        assert_eq!(list.modify("pears", 3).change, ListChange::NotFound);
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].qty, 2);
    }

    #[test]
    fn test_modify_does_not_touch_history() {
        let mut list = ShoppingList::new();
        list.add("apples", 2);
        list.modify("apples", 4);
        assert_eq!(list.history().len(), 1);
    }

    #[test]
    fn test_set_quantity_from_input() {
        let mut list = ShoppingList::new();
        list.add("apples", 2);
        assert_eq!(list.set_quantity_from_input(0, "12"), Ok(12));
        assert_eq!(list.set_quantity_from_input(0, "abc"), Ok(1));
        assert_eq!(list.set_quantity_from_input(0, ""), Ok(1));
        assert_eq!(
            list.set_quantity_from_input(3, "4"),
            Err(ListError::IndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_increment_and_decrement_floor_at_one() {
        let mut list = ShoppingList::new();
        list.add("apples", 1);

        let (_, qty) = list.increment(0).unwrap();
        assert_eq!(qty, 2);
        list.decrement(0).unwrap();
        let (update, qty) = list.decrement(0).unwrap();
        assert_eq!(qty, 1);
        assert_eq!(update.change, ListChange::QuantitySet);
        assert_eq!(list.entries()[0].qty, 1);
    }

    #[test]
    fn test_remove_at() {
        let mut list = ShoppingList::new();
        list.add("apples", 1);
        list.add("bread", 1);
        let update = list.remove_at(0).unwrap();
        assert_eq!(update.name, "apples");
        assert_eq!(list.entries()[0].name, "bread");
        assert!(list.remove_at(5).is_err());
    }

    #[test]
    fn test_parse_quantity_input() {
        assert_eq!(parse_quantity_input("3"), 3);
        assert_eq!(parse_quantity_input(" 42 "), 42);
        assert_eq!(parse_quantity_input("7kg"), 7);
        assert_eq!(parse_quantity_input("+5"), 5);
        assert_eq!(parse_quantity_input("-2"), 1);
        assert_eq!(parse_quantity_input("0"), 1);
        assert_eq!(parse_quantity_input("x"), 1);
        assert_eq!(parse_quantity_input(""), 1);
    }
}
