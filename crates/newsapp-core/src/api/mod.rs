//! HTTP client for the news API.
//!
//! Plain JSON over HTTP: one POST per call, no auth header, no retries.

mod types;

use std::fmt;

pub use types::{ErrorBody, LoginResponse, RegisterRequest};

use crate::forms::{FormState, LoginFormState};
use crate::session::SessionToken;

/// User-Agent header sent with every request.
pub const USER_AGENT: &str = concat!("newsapp/", env!("CARGO_PKG_VERSION"));

pub const REGISTER_PATH: &str = "/news/register";
pub const LOGIN_PATH: &str = "/news/login";

/// Categories of API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Non-2xx response.
    HttpStatus,
    /// The request never produced a response (connect, DNS, reset, ...).
    Network,
    /// A 2xx response whose body could not be understood.
    Parse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured API error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP status for `HttpStatus` errors.
    pub status: Option<u16>,
    /// One-line summary suitable for display.
    pub message: String,
    /// `message` field of the server's error body, when present.
    pub server_message: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            server_message: None,
        }
    }

    /// Creates an HTTP status error from the raw response body.
    pub fn http_status(status: u16, body: &str) -> Self {
        let server_message = ErrorBody::message_from(body);
        let message = match &server_message {
            Some(msg) => format!("HTTP {status}: {msg}"),
            None => format!("HTTP {status}"),
        };
        Self {
            kind: ApiErrorKind::HttpStatus,
            status: Some(status),
            message,
            server_message,
        }
    }

    pub fn network(err: &reqwest::Error) -> Self {
        Self::new(ApiErrorKind::Network, err.to_string())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// News API client.
#[derive(Debug, Clone)]
pub struct NewsClient {
    base_url: String,
    http: reqwest::Client,
}

impl NewsClient {
    /// Creates a client for `base_url` (as resolved by `ApiConfig`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers a new subscriber.
    ///
    /// Returns the (arbitrary) JSON body of the success response; an empty
    /// body yields `null`.
    ///
    /// # Errors
    /// Returns an `ApiError` for non-2xx statuses, transport failures and
    /// non-JSON success bodies.
    pub async fn register(&self, form: &FormState) -> ApiResult<serde_json::Value> {
        let body = self
            .post_json(
                REGISTER_PATH,
                &RegisterRequest {
                    user_to_register: form,
                },
            )
            .await?;

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| ApiError::parse(format!("Invalid registration response: {e}")))
    }

    /// Exchanges credentials for a session token.
    ///
    /// # Errors
    /// Returns an `ApiError` for non-2xx statuses, transport failures and
    /// success bodies without a `token`.
    pub async fn login(&self, credentials: &LoginFormState) -> ApiResult<SessionToken> {
        let body = self.post_json(LOGIN_PATH, credentials).await?;

        let response: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse(format!("Invalid login response: {e}")))?;

        response
            .token
            .filter(|t| !t.is_empty())
            .map(SessionToken::new)
            .ok_or_else(|| ApiError::parse("Login response did not include a token"))
    }

    /// Sends one JSON POST and returns the body of a 2xx response.
    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<String> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "POST");

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::network(&e))?;
        tracing::debug!(%url, status = status.as_u16(), "response received");

        if status.is_success() {
            Ok(text)
        } else {
            Err(ApiError::http_status(status.as_u16(), &text))
        }
    }
}
