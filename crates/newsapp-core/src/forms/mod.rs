//! Form state for the signup and login pages.
//!
//! - `signup`: field store for the registration form plus the custom
//!   preference buffer
//! - `options`: closed category set and the append-only preference list
//! - `validation`: pure validators producing an `ErrorMap`
//! - `login`: field store for the login form

mod login;
mod options;
mod signup;
mod validation;

use std::fmt;

pub use login::{LoginFieldValue, LoginForm, LoginFormState};
pub use options::{Category, PreferenceOptions, SEED_PREFERENCES};
pub use signup::{FieldValue, FormState, SignupForm};
pub use validation::{ErrorMap, FieldError, validate, validate_login};

/// Identifies a single form field.
///
/// Ordering follows the on-screen layout of the signup form, so iterating an
/// `ErrorMap` yields errors top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    Email,
    Password,
    Categories,
    Preferences,
}

impl Field {
    /// Wire name of the field (matches the JSON key).
    pub fn name(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Password => "password",
            Field::Categories => "categories",
            Field::Preferences => "preferences",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::Categories => "Categories",
            Field::Preferences => "Preferences",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
