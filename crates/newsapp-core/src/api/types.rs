//! Wire types for the news API.

use serde::{Deserialize, Serialize};

use crate::forms::FormState;

/// Body of `POST /news/register`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub user_to_register: &'a FormState,
}

/// Success body of `POST /news/login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
}

/// Failure body returned with non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extracts a non-empty `message` from a raw body, if it is JSON.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
