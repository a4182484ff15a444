//! Signup form field store.

use std::collections::BTreeSet;

use indexmap::IndexSet;
use serde::Serialize;

use super::options::{Category, PreferenceOptions};

/// Snapshot of every field of one signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// Selected preferences in the order they were picked.
    pub preferences: IndexSet<String>,
    pub categories: BTreeSet<Category>,
}

/// New value for exactly one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Email(String),
    Password(String),
    FullName(String),
    Categories(BTreeSet<Category>),
    Preferences(IndexSet<String>),
}

/// Signup form session: field values, the dynamic preference list and the
/// transient "custom preference" input buffer.
///
/// Dropping the form drops any user-added options with it.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    state: FormState,
    preference_options: PreferenceOptions,
    custom_preference: String,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field values.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Replaces one field's value, leaving every other field untouched.
    pub fn set_field(&mut self, value: FieldValue) {
        match value {
            FieldValue::Email(v) => self.state.email = v,
            FieldValue::Password(v) => self.state.password = v,
            FieldValue::FullName(v) => self.state.full_name = v,
            FieldValue::Categories(v) => self.state.categories = v,
            FieldValue::Preferences(v) => self.state.preferences = v,
        }
    }

    /// Selects or deselects a category.
    pub fn toggle_category(&mut self, category: Category) {
        let mut categories = self.state.categories.clone();
        if !categories.remove(&category) {
            categories.insert(category);
        }
        self.set_field(FieldValue::Categories(categories));
    }

    /// Selects or deselects a preference that is present in the option list.
    ///
    /// Values outside the option list are ignored.
    pub fn toggle_preference(&mut self, preference: &str) {
        if !self.preference_options.contains(preference) {
            return;
        }
        let mut preferences = self.state.preferences.clone();
        if !preferences.shift_remove(preference) {
            preferences.insert(preference.to_string());
        }
        self.set_field(FieldValue::Preferences(preferences));
    }

    /// Selectable preference values, seeds first, custom additions after.
    pub fn preference_options(&self) -> &PreferenceOptions {
        &self.preference_options
    }

    /// Contents of the custom preference input.
    pub fn custom_preference(&self) -> &str {
        &self.custom_preference
    }

    pub fn set_custom_preference(&mut self, value: impl Into<String>) {
        self.custom_preference = value.into();
    }

    /// Adds the buffered custom preference and clears the buffer on success.
    pub fn add_custom_preference(&mut self) -> bool {
        let raw = std::mem::take(&mut self.custom_preference);
        let added = self.add_custom_option(&raw);
        if !added {
            self.custom_preference = raw;
        }
        added
    }

    /// Adds a user-supplied preference.
    ///
    /// The value is trimmed; blank input is a no-op. A non-blank value is
    /// selected immediately and appended to the option list if new. The
    /// custom preference buffer is cleared after a successful add.
    ///
    /// Returns true if the value was added.
    pub fn add_custom_option(&mut self, raw: &str) -> bool {
        let value = raw.trim();
        if value.is_empty() {
            return false;
        }

        let mut preferences = self.state.preferences.clone();
        preferences.insert(value.to_string());
        self.set_field(FieldValue::Preferences(preferences));

        if self.preference_options.insert(value) {
            tracing::debug!(preference = value, "added custom preference option");
        }
        self.custom_preference.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::SEED_PREFERENCES;

    #[test]
    fn test_set_field_replaces_only_that_field() {
        let mut form = SignupForm::new();
        form.set_field(FieldValue::Email("a@b.co".to_string()));
        form.set_field(FieldValue::FullName("Yael Korach".to_string()));

        let before = form.state().clone();
        form.set_field(FieldValue::Password("secret1".to_string()));

        let after = form.state();
        assert_eq!(after.password, "secret1");
        assert_eq!(after.email, before.email);
        assert_eq!(after.full_name, before.full_name);
        assert_eq!(after.categories, before.categories);
        assert_eq!(after.preferences, before.preferences);
    }

    #[test]
    fn test_toggle_category() {
        let mut form = SignupForm::new();
        form.toggle_category(Category::Sports);
        form.toggle_category(Category::World);
        form.toggle_category(Category::Sports);

        let expected: BTreeSet<Category> = [Category::World].into_iter().collect();
        assert_eq!(form.state().categories, expected);
    }

    #[test]
    fn test_toggle_preference_ignores_unknown_values() {
        let mut form = SignupForm::new();
        form.toggle_preference("Sports");
        form.toggle_preference("Knitting");

        assert!(form.state().preferences.contains("Sports"));
        assert!(!form.state().preferences.contains("Knitting"));
    }

    #[test]
    fn test_preferences_keep_selection_order() {
        let mut form = SignupForm::new();
        form.toggle_preference("World News");
        form.toggle_preference("Business");
        form.add_custom_option("Climate");
        form.toggle_preference("Sports");
        form.toggle_preference("Business");
        form.toggle_preference("Business");

        let picked: Vec<&str> = form.state().preferences.iter().map(String::as_str).collect();
        assert_eq!(picked, ["World News", "Climate", "Sports", "Business"]);

        let json = serde_json::to_value(form.state()).unwrap();
        assert_eq!(
            json["preferences"],
            serde_json::json!(["World News", "Climate", "Sports", "Business"])
        );
    }

    #[test]
    fn test_blank_custom_option_is_noop() {
        let mut form = SignupForm::new();

        assert!(!form.add_custom_option(""));
        assert!(!form.add_custom_option("   "));

        assert!(form.state().preferences.is_empty());
        assert_eq!(form.preference_options(), &PreferenceOptions::default());
    }

    #[test]
    fn test_custom_option_is_trimmed_selected_and_appended() {
        let mut form = SignupForm::new();

        assert!(form.add_custom_option("  Climate  "));

        assert!(form.state().preferences.contains("Climate"));
        let options = form.preference_options().as_slice();
        assert_eq!(options.len(), SEED_PREFERENCES.len() + 1);
        assert_eq!(options[..SEED_PREFERENCES.len()], SEED_PREFERENCES);
        assert_eq!(options.last().map(String::as_str), Some("Climate"));
    }

    #[test]
    fn test_custom_option_added_twice_appears_once() {
        let mut form = SignupForm::new();

        form.add_custom_option("Climate");
        form.add_custom_option("Climate");

        let count = form
            .preference_options()
            .as_slice()
            .iter()
            .filter(|v| *v == "Climate")
            .count();
        assert_eq!(count, 1);
        assert_eq!(form.state().preferences.len(), 1);
    }

    #[test]
    fn test_existing_option_is_selected_without_growing_list() {
        let mut form = SignupForm::new();

        assert!(form.add_custom_option(" Sports"));

        assert!(form.state().preferences.contains("Sports"));
        assert_eq!(form.preference_options().len(), SEED_PREFERENCES.len());
    }

    #[test]
    fn test_add_custom_preference_consumes_buffer() {
        let mut form = SignupForm::new();
        form.set_custom_preference("  Local Politics ");

        assert!(form.add_custom_preference());
        assert_eq!(form.custom_preference(), "");
        assert!(form.state().preferences.contains("Local Politics"));
    }

    #[test]
    fn test_add_custom_preference_keeps_blank_buffer() {
        let mut form = SignupForm::new();
        form.set_custom_preference("   ");

        assert!(!form.add_custom_preference());
        assert_eq!(form.custom_preference(), "   ");
    }

    #[test]
    fn test_form_state_serializes_with_wire_names() {
        let mut form = SignupForm::new();
        form.set_field(FieldValue::Email("a@b.co".to_string()));
        form.set_field(FieldValue::Password("secret1".to_string()));
        form.set_field(FieldValue::FullName("Yael".to_string()));
        form.toggle_category(Category::Top);
        form.toggle_preference("Sports");

        let json = serde_json::to_value(form.state()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "a@b.co",
                "password": "secret1",
                "fullName": "Yael",
                "preferences": ["Sports"],
                "categories": ["top"],
            })
        );
    }
}
