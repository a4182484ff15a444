//! Selectable options for the signup multi-selects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Preference values offered before the user adds any of their own.
pub const SEED_PREFERENCES: [&str; 9] = [
    "Business",
    "Current Affairs",
    "Education",
    "Entertainment",
    "Environment & Nature",
    "Health & Wellness",
    "Science & Technology",
    "Sports",
    "World News",
];

/// News category accepted by the backend.
///
/// Closed set; serialized as the lowercase literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Crime,
    Domestic,
    Education,
    Entertainment,
    Environment,
    Food,
    Health,
    Lifestyle,
    Other,
    Politics,
    Science,
    Sports,
    Technology,
    Top,
    Tourism,
    World,
}

impl Category {
    /// Returns all categories in display order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Business,
            Category::Crime,
            Category::Domestic,
            Category::Education,
            Category::Entertainment,
            Category::Environment,
            Category::Food,
            Category::Health,
            Category::Lifestyle,
            Category::Other,
            Category::Politics,
            Category::Science,
            Category::Sports,
            Category::Technology,
            Category::Top,
            Category::Tourism,
            Category::World,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Crime => "crime",
            Category::Domestic => "domestic",
            Category::Education => "education",
            Category::Entertainment => "entertainment",
            Category::Environment => "environment",
            Category::Food => "food",
            Category::Health => "health",
            Category::Lifestyle => "lifestyle",
            Category::Other => "other",
            Category::Politics => "politics",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
            Category::Top => "top",
            Category::Tourism => "tourism",
            Category::World => "world",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| {
                let valid: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
                format!(
                    "Unknown category '{needle}'. Expected one of: {}",
                    valid.join(", ")
                )
            })
    }
}

/// Ordered, unique, append-only list of preference choices.
///
/// Seeded with [`SEED_PREFERENCES`]; grows when the user adds a custom value
/// and never shrinks for the lifetime of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceOptions {
    values: Vec<String>,
}

impl Default for PreferenceOptions {
    fn default() -> Self {
        Self {
            values: SEED_PREFERENCES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PreferenceOptions {
    /// Appends `value` unless an identical (case-sensitive) entry exists.
    ///
    /// Returns true if the list grew.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.contains(value) {
            return false;
        }
        self.values.push(value.to_string());
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
