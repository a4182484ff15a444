//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover network requests and session persistence; the reducer never
//! performs I/O itself.

use newsapp_core::forms::{FormState, LoginFormState};
use newsapp_core::session::SessionToken;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Send a registration request.
    Register { task: TaskId, form: FormState },

    /// Send a login request.
    Login {
        task: TaskId,
        credentials: LoginFormState,
    },

    /// Write the token through the session context.
    StoreToken { token: SessionToken },

    /// Clear the session.
    Logout,
}
