//! Signup page: profile fields, category and preference multi-selects, and
//! the custom-preference input.

mod render;

use crossterm::event::{KeyCode, KeyEvent};
use newsapp_core::api::ApiResult;
use newsapp_core::forms::{Category, ErrorMap, FieldValue, SignupForm};
use newsapp_core::routes::Route;
use newsapp_core::submission::{
    REGISTRATION_SUCCESS, SubmissionState, SubmitError, begin_registration,
    registration_failure_message,
};
pub use render::render_signup_page;

use super::{PageUpdate, TextEdit, paste_edit, step_cursor};
use crate::common::{TaskId, TaskSeq};
use crate::effects::UiEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupFocus {
    #[default]
    FullName,
    Email,
    Password,
    Categories,
    Preferences,
    CustomPreference,
    Submit,
}

impl SignupFocus {
    const ORDER: [SignupFocus; 7] = [
        SignupFocus::FullName,
        SignupFocus::Email,
        SignupFocus::Password,
        SignupFocus::Categories,
        SignupFocus::Preferences,
        SignupFocus::CustomPreference,
        SignupFocus::Submit,
    ];

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

    fn is_text(self) -> bool {
        matches!(
            self,
            SignupFocus::FullName
                | SignupFocus::Email
                | SignupFocus::Password
                | SignupFocus::CustomPreference
        )
    }
}

#[derive(Debug, Default)]
pub struct SignupPageState {
    pub form: SignupForm,
    pub focus: SignupFocus,
    pub category_cursor: usize,
    pub preference_cursor: usize,
    /// Field errors from the last submit attempt.
    pub errors: ErrorMap,
    pub submission: SubmissionState,
    /// Request this page is waiting for.
    pub in_flight: Option<TaskId>,
}

impl SignupPageState {
    pub fn handle_key(&mut self, tasks: &mut TaskSeq, key: KeyEvent) -> PageUpdate {
        match key.code {
            KeyCode::Esc => return PageUpdate::navigate(Route::Login),
            KeyCode::Tab => {
                self.focus = self.focus.cycle(true);
                return PageUpdate::stay();
            }
            KeyCode::BackTab => {
                self.focus = self.focus.cycle(false);
                return PageUpdate::stay();
            }
            _ => {}
        }

        match self.focus {
            SignupFocus::Categories => self.handle_category_key(key.code),
            SignupFocus::Preferences => self.handle_preference_key(key.code),
            SignupFocus::Submit => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    return self.submit(tasks);
                }
            }
            SignupFocus::CustomPreference if key.code == KeyCode::Enter => {
                self.add_custom_preference();
            }
            text if text.is_text() => {
                if key.code == KeyCode::Enter {
                    self.focus = self.focus.cycle(true);
                } else if let Some(edit) = TextEdit::from_key(&key) {
                    self.edit_focused(&edit);
                }
            }
            _ => {}
        }
        PageUpdate::stay()
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.focus.is_text() {
            self.edit_focused(&paste_edit(text));
        }
    }

    fn handle_category_key(&mut self, code: KeyCode) {
        let all = Category::all();
        match code {
            KeyCode::Up => {
                self.category_cursor = step_cursor(self.category_cursor, all.len(), false);
            }
            KeyCode::Down => {
                self.category_cursor = step_cursor(self.category_cursor, all.len(), true);
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(category) = all.get(self.category_cursor) {
                    self.form.toggle_category(*category);
                }
            }
            _ => {}
        }
    }

    fn handle_preference_key(&mut self, code: KeyCode) {
        let len = self.form.preference_options().len();
        match code {
            KeyCode::Up => self.preference_cursor = step_cursor(self.preference_cursor, len, false),
            KeyCode::Down => {
                self.preference_cursor = step_cursor(self.preference_cursor, len, true);
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(option) = self
                    .form
                    .preference_options()
                    .get(self.preference_cursor)
                    .map(str::to_string)
                {
                    self.form.toggle_preference(&option);
                }
            }
            _ => {}
        }
    }

    fn edit_focused(&mut self, edit: &TextEdit) {
        let state = self.form.state();
        let value = match self.focus {
            SignupFocus::FullName => FieldValue::FullName(edit.apply(&state.full_name)),
            SignupFocus::Email => FieldValue::Email(edit.apply(&state.email)),
            SignupFocus::Password => FieldValue::Password(edit.apply(&state.password)),
            SignupFocus::CustomPreference => {
                let next = edit.apply(self.form.custom_preference());
                self.form.set_custom_preference(next);
                return;
            }
            _ => return,
        };
        self.form.set_field(value);
    }

    /// Adds the buffered custom preference and moves the list cursor onto it.
    fn add_custom_preference(&mut self) {
        let value = self.form.custom_preference().trim().to_string();
        if self.form.add_custom_preference()
            && let Some(idx) = self
                .form
                .preference_options()
                .as_slice()
                .iter()
                .position(|option| *option == value)
        {
            self.preference_cursor = idx;
        }
    }

    /// Validates and, when clean, issues exactly one registration request.
    pub fn submit(&mut self, tasks: &mut TaskSeq) -> PageUpdate {
        match begin_registration(&self.form, &mut self.submission) {
            Ok(()) => {
                self.errors = ErrorMap::default();
                let task = tasks.next_id();
                self.in_flight = Some(task);
                PageUpdate::stay().with_effects(vec![UiEffect::Register {
                    task,
                    form: self.form.state().clone(),
                }])
            }
            Err(SubmitError::Validation(errors)) => {
                self.errors = errors;
                PageUpdate::stay()
            }
            Err(err) => {
                tracing::debug!(error = %err, "registration submit ignored");
                PageUpdate::stay()
            }
        }
    }

    pub fn on_result(&mut self, result: ApiResult<serde_json::Value>) {
        self.in_flight = None;
        if let Err(err) = self.submission.settle(result, registration_failure_message) {
            tracing::warn!(error = %err, "registration failed");
        }
    }

    /// Banner text for the last attempt.
    pub fn notice(&self) -> Option<&str> {
        match &self.submission {
            SubmissionState::Succeeded => Some(REGISTRATION_SUCCESS),
            other => other.failure_message(),
        }
    }
}
