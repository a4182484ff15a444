//! `options` command handler.

use newsapp_core::forms::{Category, SEED_PREFERENCES};

pub fn list() {
    println!("Categories:");
    for category in Category::all() {
        println!("  {category}");
    }
    println!("Preferences:");
    for preference in SEED_PREFERENCES {
        println!("  {preference}");
    }
}
