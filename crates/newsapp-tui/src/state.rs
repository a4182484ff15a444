//! Application state composition.
//!
//! ```text
//! AppState
//! ├── route: Route             (requested page, guarded on read)
//! ├── session: SessionContext  (shared token handle)
//! ├── login: LoginPageState
//! ├── signup: SignupPageState
//! ├── task_seq: TaskSeq        (async task id generator)
//! └── tasks: Tasks             (task lifecycle state)
//! ```

use newsapp_core::routes::Route;
use newsapp_core::session::SessionContext;

use crate::common::{TaskId, TaskKind, TaskSeq, Tasks};
use crate::features::login::LoginPageState;
use crate::features::signup::SignupPageState;

pub struct AppState {
    /// Route the user navigated to. Read through [`AppState::page`].
    pub route: Route,
    pub session: SessionContext,
    pub login: LoginPageState,
    pub signup: SignupPageState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// API base URL, shown in the footer.
    pub api_base_url: String,
    /// Transient message for the footer (logout failures and the like).
    pub status: Option<String>,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(session: SessionContext, api_base_url: impl Into<String>) -> Self {
        Self {
            route: Route::default(),
            session,
            login: LoginPageState::default(),
            signup: SignupPageState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            api_base_url: api_base_url.into(),
            status: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    /// The page actually shown: the requested route after the session guard.
    pub fn page(&self) -> Route {
        self.route.guard(&self.session)
    }

    /// Switches pages. The form page being left is discarded, so coming
    /// back starts from a fresh form and a fresh option list.
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.route, to = %route, "navigate");
        let leaving = self.page();
        self.route = route;
        self.status = None;

        if self.page() != leaving {
            match leaving {
                Route::Login => self.login = LoginPageState::default(),
                Route::Signup => self.signup = SignupPageState::default(),
                Route::Dashboard => {}
            }
        }
    }

    /// Whether the page that issued a request of `kind` is still waiting for
    /// the result with `id`.
    pub fn awaits(&self, kind: TaskKind, id: TaskId) -> bool {
        let in_flight = match kind {
            TaskKind::Register => self.signup.in_flight,
            TaskKind::Login => self.login.in_flight,
        };
        in_flight == Some(id)
    }
}
