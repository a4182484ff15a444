//! Submission controller: validate → send → interpret, once per user action.
//!
//! Each form owns a `SubmissionState`. While it is `Pending` further submits
//! are rejected without touching the network. A failed submission leaves the
//! form values in place so the user can retry.

use std::fmt;

use crate::api::{ApiError, ApiErrorKind, ApiResult, NewsClient};
use crate::forms::{ErrorMap, LoginForm, SignupForm, validate, validate_login};
use crate::session::{SessionContext, SessionToken};

/// Fallback shown when a failed registration carries no server message.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Fallback shown when a failed login carries no server message.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Shown after the server accepted a registration.
pub const REGISTRATION_SUCCESS: &str = "Registration successful!";

/// Lifecycle of one form's submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed {
        message: String,
    },
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }

    /// Whether the submit trigger is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_pending()
    }

    /// User-facing failure text of the last attempt.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Moves to `Pending`.
    ///
    /// # Errors
    /// Returns `SubmitError::InFlight` if a submission is already pending.
    pub fn start(&mut self) -> Result<(), SubmitError> {
        if self.is_pending() {
            return Err(SubmitError::InFlight);
        }
        *self = SubmissionState::Pending;
        Ok(())
    }

    /// Records the outcome of the request started by [`start`](Self::start).
    ///
    /// `describe` turns an API error into the text shown to the user.
    ///
    /// # Errors
    /// Returns `SubmitError::Api` when `result` is an error.
    pub fn settle<T>(
        &mut self,
        result: ApiResult<T>,
        describe: fn(&ApiError) -> String,
    ) -> Result<T, SubmitError> {
        match result {
            Ok(value) => {
                *self = SubmissionState::Succeeded;
                Ok(value)
            }
            Err(err) => {
                *self = SubmissionState::Failed {
                    message: describe(&err),
                };
                Err(SubmitError::Api(err))
            }
        }
    }
}

/// Why a submission did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Field validation failed; nothing was sent.
    Validation(ErrorMap),
    /// A previous submission is still pending; nothing was sent.
    InFlight,
    /// The request failed (server or network).
    Api(ApiError),
    /// The token could not be persisted.
    Session(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Validation(errors) => write!(f, "{errors}"),
            SubmitError::InFlight => write!(f, "A submission is already in progress."),
            SubmitError::Api(err) => write!(f, "{err}"),
            SubmitError::Session(msg) => write!(f, "Failed to store session: {msg}"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Failure text for a registration attempt.
pub fn registration_failure_message(err: &ApiError) -> String {
    let detail = match err.kind {
        ApiErrorKind::HttpStatus => err.server_message.as_deref().unwrap_or(UNKNOWN_ERROR),
        ApiErrorKind::Network | ApiErrorKind::Parse => err.message.as_str(),
    };
    format!("Registration failed: {detail}")
}

/// Failure text for a login attempt.
pub fn login_failure_message(err: &ApiError) -> String {
    match err.kind {
        ApiErrorKind::HttpStatus => err
            .server_message
            .clone()
            .unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
        ApiErrorKind::Network | ApiErrorKind::Parse => err.message.clone(),
    }
}

/// Checks that a registration may be sent and marks it pending.
///
/// # Errors
/// `InFlight` while pending, `Validation` when any field fails. The state is
/// left unchanged in both cases.
pub fn begin_registration(
    form: &SignupForm,
    state: &mut SubmissionState,
) -> Result<(), SubmitError> {
    if state.is_pending() {
        return Err(SubmitError::InFlight);
    }
    let errors = validate(form.state());
    if !errors.is_empty() {
        return Err(SubmitError::Validation(errors));
    }
    state.start()
}

/// Checks that a login may be sent and marks it pending.
///
/// # Errors
/// `InFlight` while pending, `Validation` when a field is empty.
pub fn begin_login(form: &LoginForm, state: &mut SubmissionState) -> Result<(), SubmitError> {
    if state.is_pending() {
        return Err(SubmitError::InFlight);
    }
    let errors = validate_login(form.state());
    if !errors.is_empty() {
        return Err(SubmitError::Validation(errors));
    }
    state.start()
}

/// Validates and sends the signup form.
///
/// Returns the server's JSON body on success.
///
/// # Errors
/// See [`SubmitError`]. Validation failures never reach the network.
pub async fn submit_registration(
    client: &NewsClient,
    form: &SignupForm,
    state: &mut SubmissionState,
) -> Result<serde_json::Value, SubmitError> {
    begin_registration(form, state)?;

    let result = client.register(form.state()).await;
    match &result {
        Ok(_) => tracing::info!("registration succeeded"),
        Err(err) => tracing::warn!(kind = %err.kind, error = %err, "registration failed"),
    }
    state.settle(result, registration_failure_message)
}

/// Validates and sends the login form; on success stores the token in
/// `session` and returns it.
///
/// # Errors
/// See [`SubmitError`]. The session is untouched unless the server accepted
/// the credentials.
pub async fn submit_login(
    client: &NewsClient,
    session: &SessionContext,
    form: &LoginForm,
    state: &mut SubmissionState,
) -> Result<SessionToken, SubmitError> {
    begin_login(form, state)?;

    let result = client.login(form.state()).await;
    if let Err(err) = &result {
        tracing::warn!(kind = %err.kind, error = %err, "login failed");
    }
    let token = state.settle(result, login_failure_message)?;

    if let Err(err) = session.set_token(Some(token.clone())) {
        let message = format!("{err:#}");
        *state = SubmissionState::Failed {
            message: format!("Failed to store session: {message}"),
        };
        return Err(SubmitError::Session(message));
    }
    tracing::info!("logged in");
    Ok(token)
}
