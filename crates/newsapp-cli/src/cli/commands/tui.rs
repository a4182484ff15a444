//! Default command: the interactive client.

use anyhow::Result;
use newsapp_core::api::NewsClient;

#[cfg(feature = "tui")]
pub fn run(client: NewsClient) -> Result<()> {
    use anyhow::Context;
    use newsapp_core::session::SessionContext;

    let session = SessionContext::from_default_location().context("load session")?;
    newsapp_tui::run(session, client)
}

#[cfg(not(feature = "tui"))]
pub fn run(_client: NewsClient) -> Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
