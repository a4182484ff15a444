//! UI events consumed by the reducer.

use crossterm::event::Event;
use newsapp_core::api::ApiResult;
use newsapp_core::session::SessionToken;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Everything that can change `AppState`.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; drives the spinner and rendering cadence.
    Tick,
    /// Raw terminal input.
    Terminal(Event),

    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// `POST /news/register` finished.
    RegisterFinished(ApiResult<serde_json::Value>),
    /// `POST /news/login` finished.
    LoginFinished(ApiResult<SessionToken>),

    /// The token from a successful login was written to the session store.
    SessionStored(Result<(), String>),
    /// The session store was cleared after a logout.
    SessionCleared(Result<(), String>),
}
