//! Full-screen TUI for NewsApp.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use newsapp_core::api::NewsClient;
use newsapp_core::session::SessionContext;
pub use runtime::TuiRuntime;

use crate::state::AppState;

/// Runs the interactive client until the user quits.
///
/// Must be called from within a multi-threaded tokio runtime; requests are
/// spawned onto it while the event loop runs on the calling thread.
///
/// # Errors
/// Returns an error if stderr is not a terminal or the terminal fails.
pub fn run(session: SessionContext, client: NewsClient) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive client requires a terminal.\n\
             Use `newsapp login` or `newsapp register` for non-interactive use."
        );
    }

    tracing::info!(api = client.base_url(), "starting TUI");
    let state = AppState::new(session, client.base_url());
    let mut runtime = TuiRuntime::new(state, client)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
