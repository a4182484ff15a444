//! Login page: email + password, submitted to `/news/login`.

mod render;

use crossterm::event::{KeyCode, KeyEvent};
use newsapp_core::api::ApiResult;
use newsapp_core::forms::{ErrorMap, LoginFieldValue, LoginForm};
use newsapp_core::routes::Route;
use newsapp_core::session::SessionToken;
use newsapp_core::submission::{SubmissionState, SubmitError, begin_login, login_failure_message};
pub use render::render_login_page;

use super::{PageUpdate, TextEdit, paste_edit};
use crate::common::{TaskId, TaskSeq};
use crate::effects::UiEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginFocus {
    #[default]
    Email,
    Password,
    Submit,
}

impl LoginFocus {
    const ORDER: [LoginFocus; 3] = [LoginFocus::Email, LoginFocus::Password, LoginFocus::Submit];

    fn cycle(self, forward: bool) -> Self {
        let len = Self::ORDER.len();
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        Self::ORDER[next]
    }
}

#[derive(Debug, Default)]
pub struct LoginPageState {
    pub form: LoginForm,
    pub focus: LoginFocus,
    /// Field errors from the last submit attempt.
    pub errors: ErrorMap,
    pub submission: SubmissionState,
    /// Request this page is waiting for.
    pub in_flight: Option<TaskId>,
}

impl LoginPageState {
    pub fn handle_key(&mut self, tasks: &mut TaskSeq, key: KeyEvent) -> PageUpdate {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.cycle(true);
                PageUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.cycle(false);
                PageUpdate::stay()
            }
            // Enter anywhere in the form submits it.
            KeyCode::Enter => self.submit(tasks),
            _ => match TextEdit::from_key(&key) {
                Some(edit) => {
                    self.edit_focused(&edit);
                    PageUpdate::stay()
                }
                None => PageUpdate::stay(),
            },
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.edit_focused(&paste_edit(text));
    }

    fn edit_focused(&mut self, edit: &TextEdit) {
        let state = self.form.state();
        let value = match self.focus {
            LoginFocus::Email => LoginFieldValue::Email(edit.apply(&state.email)),
            LoginFocus::Password => LoginFieldValue::Password(edit.apply(&state.password)),
            LoginFocus::Submit => return,
        };
        self.form.set_field(value);
    }

    /// Validates and, when clean, issues exactly one login request.
    pub fn submit(&mut self, tasks: &mut TaskSeq) -> PageUpdate {
        match begin_login(&self.form, &mut self.submission) {
            Ok(()) => {
                self.errors = ErrorMap::default();
                let task = tasks.next_id();
                self.in_flight = Some(task);
                PageUpdate::stay().with_effects(vec![UiEffect::Login {
                    task,
                    credentials: self.form.state().clone(),
                }])
            }
            Err(SubmitError::Validation(errors)) => {
                self.errors = errors;
                PageUpdate::stay()
            }
            Err(err) => {
                tracing::debug!(error = %err, "login submit ignored");
                PageUpdate::stay()
            }
        }
    }

    /// Interprets the login response. A token is handed to the runtime for
    /// storage; navigation waits until it is stored.
    pub fn on_result(&mut self, result: ApiResult<SessionToken>) -> Vec<UiEffect> {
        self.in_flight = None;
        match self.submission.settle(result, login_failure_message) {
            Ok(token) => vec![UiEffect::StoreToken { token }],
            Err(err) => {
                tracing::warn!(error = %err, "login failed");
                vec![]
            }
        }
    }

    /// Records the outcome of storing the token.
    pub fn on_session_stored(&mut self, result: Result<(), String>) -> PageUpdate {
        match result {
            Ok(()) => {
                *self = Self::default();
                PageUpdate::navigate(Route::Dashboard)
            }
            Err(message) => {
                tracing::warn!(error = %message, "failed to store session");
                self.submission = SubmissionState::Failed {
                    message: format!("Failed to store session: {message}"),
                };
                PageUpdate::stay()
            }
        }
    }
}
