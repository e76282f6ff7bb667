//! Print the category keyword table.

use basket_core::categorizer::keyword_sets;
use basket_core::Category;

pub fn print() {
    println!("Categories (checked in order):");
    for set in keyword_sets() {
        println!("  {}: {}", set.category, set.keywords.join(", "));
    }
    println!("  {}: anything else", Category::Other);
}
