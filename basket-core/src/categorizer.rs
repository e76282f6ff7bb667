//! Item categorization for shopping list grouping.
//!
//! Maps item names to store categories based on keyword matching.
//! Category data is loaded from `data/categories.json` at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Store category used to group list entries for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Dairy,
    Produce,
    Bakery,
    Snacks,
    Beverages,
    Household,
    Other,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::Dairy,
        Category::Produce,
        Category::Bakery,
        Category::Snacks,
        Category::Beverages,
        Category::Household,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dairy => "Dairy",
            Category::Produce => "Produce",
            Category::Bakery => "Bakery",
            Category::Snacks => "Snacks",
            Category::Beverages => "Beverages",
            Category::Household => "Household",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category and the keywords that select it.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryKeywords {
    pub category: Category,
    pub keywords: Vec<String>,
}

/// The raw JSON structure for the categories data file.
#[derive(Deserialize)]
struct CategoriesData {
    categories: Vec<CategoryKeywords>,
}

/// Keyword sets in file order. Order is significant: the first category
/// with a matching keyword wins.
static CATEGORY_KEYWORDS: LazyLock<Vec<CategoryKeywords>> = LazyLock::new(|| {
    let json = include_str!("../../data/categories.json");
    let data: CategoriesData =
        serde_json::from_str(json).expect("Failed to parse categories.json");

    data.categories
        .into_iter()
        .map(|set| CategoryKeywords {
            category: set.category,
            keywords: set.keywords.iter().map(|k| k.to_lowercase()).collect(),
        })
        .collect()
});

/// The ordered keyword sets used by [`categorize`].
pub fn keyword_sets() -> &'static [CategoryKeywords] {
    &CATEGORY_KEYWORDS
}

/// Categorize an item by name.
///
/// Matching is case-insensitive and looks for keyword containment.
/// Returns [`Category::Other`] if nothing matches.
pub fn categorize(item: &str) -> Category {
    let lower = item.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|set| set.keywords.iter().any(|k| lower.contains(k.as_str())))
        .map(|set| set.category)
        .unwrap_or(Category::Other)
}
