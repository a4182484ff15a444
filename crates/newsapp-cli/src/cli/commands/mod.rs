//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod options;
pub mod register;
pub mod tui;

use newsapp_core::forms::ErrorMap;

/// One validation message per line, in form order.
pub(crate) fn validation_report(errors: &ErrorMap) -> String {
    errors
        .messages()
        .map(|(_, message)| message)
        .collect::<Vec<_>>()
        .join("\n")
}
