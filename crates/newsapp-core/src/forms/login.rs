//! Login form field store.

use serde::Serialize;

/// Snapshot of the login form; also the `/news/login` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginFormState {
    pub email: String,
    pub password: String,
}

/// New value for one login field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFieldValue {
    Email(String),
    Password(String),
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    state: LoginFormState,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoginFormState {
        &self.state
    }

    /// Replaces one field's value, leaving the other untouched.
    pub fn set_field(&mut self, value: LoginFieldValue) {
        match value {
            LoginFieldValue::Email(v) => self.state.email = v,
            LoginFieldValue::Password(v) => self.state.password = v,
        }
    }
}
