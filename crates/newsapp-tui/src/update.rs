//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use newsapp_core::routes::{NavAction, Route};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::PageUpdate;
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            if app.tasks.is_any_running() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if !app.tasks.state_mut(kind).finish_if_active(completed.id) {
                tracing::debug!(?kind, id = completed.id.0, "ignoring stale task result");
                return vec![];
            }
            if !app.awaits(kind, completed.id) {
                tracing::debug!(?kind, id = completed.id.0, "dropping result for a left page");
                return vec![];
            }
            update(app, *completed.result)
        }
        UiEvent::RegisterFinished(result) => {
            app.signup.on_result(result);
            vec![]
        }
        UiEvent::LoginFinished(result) => app.login.on_result(result),
        UiEvent::SessionStored(result) => {
            let page_update = app.login.on_session_stored(result);
            apply_page_update(app, page_update)
        }
        UiEvent::SessionCleared(result) => {
            match result {
                Ok(()) => app.navigate(Route::Login),
                Err(message) => {
                    tracing::warn!(error = %message, "logout failed");
                    app.status = Some(format!("Logout failed: {message}"));
                }
            }
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => {
            match app.page() {
                Route::Login => app.login.handle_paste(&text),
                Route::Signup => app.signup.handle_paste(&text),
                Route::Dashboard => {}
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        match key.code {
            KeyCode::Char('c') => return vec![UiEffect::Quit],
            KeyCode::Char('n') => return handle_nav_action(app),
            _ => {}
        }
    }

    let page_update = match app.page() {
        Route::Login => app.login.handle_key(&mut app.task_seq, key),
        Route::Signup => app.signup.handle_key(&mut app.task_seq, key),
        Route::Dashboard => PageUpdate::stay(),
    };
    apply_page_update(app, page_update)
}

fn handle_nav_action(app: &mut AppState) -> Vec<UiEffect> {
    match NavAction::for_session(&app.session) {
        NavAction::Logout => vec![UiEffect::Logout],
        NavAction::SignUp => {
            app.navigate(Route::Signup);
            vec![]
        }
    }
}

fn apply_page_update(app: &mut AppState, page_update: PageUpdate) -> Vec<UiEffect> {
    if let Some(route) = page_update.navigate {
        app.navigate(route);
    }
    page_update.effects
}

#[cfg(test)]
mod tests {
    use newsapp_core::api::{ApiError, ApiResult};
    use newsapp_core::forms::{Field, LoginFormState, SEED_PREFERENCES};
    use newsapp_core::session::{SessionContext, SessionToken};
    use newsapp_core::submission::{REGISTRATION_SUCCESS, SubmissionState};

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
    use crate::features::signup::SignupFocus;

    fn app() -> AppState {
        AppState::new(SessionContext::in_memory(), "http://localhost:3007")
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            assert!(update(app, key(KeyCode::Char(c))).is_empty());
        }
    }

    fn fill_login(app: &mut AppState) {
        type_text(app, "reader@example.com");
        update(app, key(KeyCode::Tab));
        type_text(app, "hunter22");
    }

    fn completed(kind: TaskKind, id: TaskId, inner: UiEvent) -> UiEvent {
        UiEvent::TaskCompleted {
            kind,
            completed: TaskCompleted {
                id,
                result: Box::new(inner),
            },
        }
    }

    fn started(kind: TaskKind, id: TaskId) -> UiEvent {
        UiEvent::TaskStarted {
            kind,
            started: TaskStarted { id },
        }
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        assert_eq!(update(&mut app, ctrl('c')), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_invalid_login_submit_has_no_effect() {
        let mut app = app();
        type_text(&mut app, "reader@example.com");

        let effects = update(&mut app, key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert!(app.login.errors.contains(Field::Password));
        assert_eq!(app.login.submission, SubmissionState::Idle);
    }

    #[test]
    fn test_valid_login_submit_emits_one_request() {
        let mut app = app();
        fill_login(&mut app);

        let effects = update(&mut app, key(KeyCode::Enter));

        assert_eq!(
            effects,
            vec![UiEffect::Login {
                task: TaskId(0),
                credentials: LoginFormState {
                    email: "reader@example.com".to_string(),
                    password: "hunter22".to_string(),
                },
            }]
        );
        assert!(app.login.submission.is_pending());

        // The trigger is disabled while pending.
        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn test_login_success_stores_token_then_navigates() {
        let mut app = app();
        fill_login(&mut app);
        update(&mut app, key(KeyCode::Enter));
        update(&mut app, started(TaskKind::Login, TaskId(0)));

        let token = SessionToken::new("tok-1");
        let effects = update(
            &mut app,
            completed(
                TaskKind::Login,
                TaskId(0),
                UiEvent::LoginFinished(Ok(token.clone())),
            ),
        );
        assert_eq!(effects, vec![UiEffect::StoreToken { token: token.clone() }]);
        assert!(!app.tasks.is_any_running());

        // Runtime writes the token, then reports back.
        app.session.set_token(Some(token)).unwrap();
        update(&mut app, UiEvent::SessionStored(Ok(())));

        assert_eq!(app.route, Route::Dashboard);
        assert_eq!(app.page(), Route::Dashboard);
        assert_eq!(app.login.form.state(), &LoginFormState::default());
    }

    #[test]
    fn test_login_failure_shows_message_and_keeps_values() {
        let mut app = app();
        fill_login(&mut app);
        update(&mut app, key(KeyCode::Enter));

        let result: ApiResult<SessionToken> = Err(ApiError::http_status(401, ""));
        let effects = update(&mut app, UiEvent::LoginFinished(result));

        assert!(effects.is_empty());
        assert_eq!(
            app.login.submission.failure_message(),
            Some("Invalid credentials")
        );
        assert_eq!(app.login.form.state().email, "reader@example.com");
        assert_eq!(app.page(), Route::Login);
    }

    #[test]
    fn test_stale_task_result_is_ignored() {
        let mut app = app();
        fill_login(&mut app);
        update(&mut app, key(KeyCode::Enter));
        update(&mut app, started(TaskKind::Login, TaskId(0)));

        let effects = update(
            &mut app,
            completed(
                TaskKind::Login,
                TaskId(7),
                UiEvent::LoginFinished(Ok(SessionToken::new("old"))),
            ),
        );

        assert!(effects.is_empty());
        assert!(app.login.submission.is_pending());
    }

    #[test]
    fn test_nav_action_without_session_opens_signup() {
        let mut app = app();
        assert!(update(&mut app, ctrl('n')).is_empty());
        assert_eq!(app.page(), Route::Signup);

        update(&mut app, key(KeyCode::Esc));
        assert_eq!(app.page(), Route::Login);
    }

    #[test]
    fn test_nav_action_with_session_logs_out() {
        let mut app = app();
        app.session
            .set_token(Some(SessionToken::new("tok")))
            .unwrap();
        app.navigate(Route::Dashboard);

        assert_eq!(update(&mut app, ctrl('n')), vec![UiEffect::Logout]);

        app.session.logout().unwrap();
        update(&mut app, UiEvent::SessionCleared(Ok(())));
        assert_eq!(app.route, Route::Login);
    }

    #[test]
    fn test_dashboard_is_guarded() {
        let mut app = app();
        app.navigate(Route::Dashboard);
        assert_eq!(app.page(), Route::Login);
    }

    #[test]
    fn test_invalid_signup_submit_has_no_effect() {
        let mut app = app();
        app.navigate(Route::Signup);
        app.signup.focus = SignupFocus::Submit;

        let effects = update(&mut app, key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert_eq!(app.signup.errors.len(), 5);
        assert_eq!(app.signup.submission, SubmissionState::Idle);
    }

    #[test]
    fn test_signup_flow_emits_register_effect() {
        let mut app = app();
        app.navigate(Route::Signup);

        type_text(&mut app, "Yael Korach");
        update(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "reader@example.com");
        update(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "hunter22");
        update(&mut app, key(KeyCode::Tab));
        assert_eq!(app.signup.focus, SignupFocus::Categories);
        update(&mut app, key(KeyCode::Down));
        update(&mut app, key(KeyCode::Char(' ')));
        update(&mut app, key(KeyCode::Tab));
        update(&mut app, key(KeyCode::Tab));
        assert_eq!(app.signup.focus, SignupFocus::CustomPreference);
        type_text(&mut app, "  Climate ");
        update(&mut app, key(KeyCode::Enter));
        update(&mut app, key(KeyCode::Tab));
        assert_eq!(app.signup.focus, SignupFocus::Submit);

        let effects = update(&mut app, key(KeyCode::Enter));

        let [UiEffect::Register { form, .. }] = effects.as_slice() else {
            panic!("expected one register effect, got {effects:?}");
        };
        assert_eq!(form.full_name, "Yael Korach");
        assert_eq!(form.categories.len(), 1);
        assert!(form.preferences.contains("Climate"));
        assert!(app.signup.submission.is_pending());
        assert_eq!(app.signup.form.custom_preference(), "");

        update(
            &mut app,
            UiEvent::RegisterFinished(Ok(serde_json::Value::Null)),
        );
        assert_eq!(app.signup.notice(), Some(REGISTRATION_SUCCESS));
    }

    #[test]
    fn test_signup_failure_keeps_values() {
        let mut app = app();
        app.navigate(Route::Signup);
        type_text(&mut app, "Yael");
        app.signup.submission = SubmissionState::Pending;

        update(
            &mut app,
            UiEvent::RegisterFinished(Err(ApiError::http_status(
                409,
                r#"{"message":"Email already registered"}"#,
            ))),
        );

        assert_eq!(
            app.signup.notice(),
            Some("Registration failed: Email already registered")
        );
        assert_eq!(app.signup.form.state().full_name, "Yael");
    }

    #[test]
    fn test_leaving_signup_discards_custom_options() {
        let mut app = app();
        update(&mut app, ctrl('n'));
        app.signup.focus = SignupFocus::CustomPreference;
        type_text(&mut app, "Climate");
        update(&mut app, key(KeyCode::Enter));
        assert_eq!(
            app.signup.form.preference_options().len(),
            SEED_PREFERENCES.len() + 1
        );

        update(&mut app, key(KeyCode::Esc));
        update(&mut app, ctrl('n'));

        assert_eq!(app.page(), Route::Signup);
        assert_eq!(
            app.signup.form.preference_options().len(),
            SEED_PREFERENCES.len()
        );
        assert!(app.signup.form.state().preferences.is_empty());
        assert_eq!(app.signup.focus, SignupFocus::FullName);
    }

    #[test]
    fn test_leaving_login_discards_typed_values() {
        let mut app = app();
        fill_login(&mut app);

        update(&mut app, ctrl('n'));
        update(&mut app, key(KeyCode::Esc));

        assert_eq!(app.login.form.state(), &LoginFormState::default());
    }

    #[test]
    fn test_result_for_left_page_is_dropped() {
        let mut app = app();
        fill_login(&mut app);
        update(&mut app, key(KeyCode::Enter));
        update(&mut app, started(TaskKind::Login, TaskId(0)));

        update(&mut app, ctrl('n'));
        update(&mut app, key(KeyCode::Esc));

        let effects = update(
            &mut app,
            completed(
                TaskKind::Login,
                TaskId(0),
                UiEvent::LoginFinished(Ok(SessionToken::new("tok-1"))),
            ),
        );

        assert!(effects.is_empty());
        assert_eq!(app.login.submission, SubmissionState::Idle);
        assert!(!app.tasks.is_any_running());
    }

    #[test]
    fn test_paste_goes_to_focused_field() {
        let mut app = app();
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("reader@example.com\n".to_string())),
        );
        assert_eq!(app.login.form.state().email, "reader@example.com");
    }
}
