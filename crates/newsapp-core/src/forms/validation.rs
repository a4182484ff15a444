//! Field validation.
//!
//! Validators are pure: the same snapshot always yields the same `ErrorMap`,
//! and every rule runs on every call.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::Field;
use super::login::LoginFormState;
use super::signup::FormState;

/// Loose syntactic check: something, '@', something, '.', something.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex"));

const MIN_PASSWORD_CHARS: usize = 6;

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    InvalidEmail,
    TooShort,
    Required,
}

impl FieldError {
    /// Message shown next to `field`.
    pub fn message(self, field: Field) -> &'static str {
        match (field, self) {
            (Field::Email, FieldError::InvalidEmail) => "Please enter a valid email address.",
            (Field::Email, _) => "Email is required.",
            (Field::Password, FieldError::TooShort) => {
                "Password must be at least 6 characters long."
            }
            (Field::Password, _) => "Password is required.",
            (Field::FullName, _) => "Full name is required.",
            (Field::Categories, _) => "Please select at least one category.",
            (Field::Preferences, _) => "Please select at least one preference.",
        }
    }
}

/// Failing fields of one validation pass. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    errors: BTreeMap<Field, FieldError>,
}

impl ErrorMap {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Message for `field`, if it failed.
    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|error| error.message(field))
    }

    /// Failing fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    /// `(field, message)` pairs in form order.
    pub fn messages(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors
            .iter()
            .map(|(field, error)| (*field, error.message(*field)))
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, message) in self.messages() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validates a signup form snapshot.
pub fn validate(state: &FormState) -> ErrorMap {
    let mut errors = ErrorMap::default();

    if !is_valid_email(&state.email) {
        errors.insert(Field::Email, FieldError::InvalidEmail);
    }

    if state.password.chars().count() < MIN_PASSWORD_CHARS {
        errors.insert(Field::Password, FieldError::TooShort);
    }

    // No trimming: a name of only spaces passes.
    if state.full_name.is_empty() {
        errors.insert(Field::FullName, FieldError::Required);
    }

    if state.categories.is_empty() {
        errors.insert(Field::Categories, FieldError::Required);
    }

    if state.preferences.is_empty() {
        errors.insert(Field::Preferences, FieldError::Required);
    }

    errors
}

/// Validates a login form snapshot: both fields are required.
pub fn validate_login(state: &LoginFormState) -> ErrorMap {
    let mut errors = ErrorMap::default();

    if state.email.is_empty() {
        errors.insert(Field::Email, FieldError::Required);
    }

    if state.password.is_empty() {
        errors.insert(Field::Password, FieldError::Required);
    }

    errors
}
