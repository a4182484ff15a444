//! Session command handlers.

use anyhow::{Context, Result};
use newsapp_core::api::NewsClient;
use newsapp_core::forms::{LoginFieldValue, LoginForm};
use newsapp_core::session::SessionContext;
use newsapp_core::submission::{SubmissionState, SubmitError, submit_login};

use super::validation_report;

pub async fn login(client: &NewsClient, email: String, password: String) -> Result<()> {
    let session = SessionContext::from_default_location().context("load session")?;

    let mut form = LoginForm::new();
    form.set_field(LoginFieldValue::Email(email));
    form.set_field(LoginFieldValue::Password(password));

    let mut state = SubmissionState::default();
    match submit_login(client, &session, &form, &mut state).await {
        Ok(_) => {
            println!("Logged in.");
            Ok(())
        }
        Err(SubmitError::Validation(errors)) => anyhow::bail!(validation_report(&errors)),
        Err(err) => {
            let message = state
                .failure_message()
                .map_or_else(|| err.to_string(), str::to_string);
            anyhow::bail!(message)
        }
    }
}

pub fn logout() -> Result<()> {
    let session = SessionContext::from_default_location().context("load session")?;
    session.logout().context("clear session")?;
    println!("Logged out.");
    Ok(())
}

pub fn status() -> Result<()> {
    let session = SessionContext::from_default_location().context("load session")?;
    if session.is_authenticated() {
        println!("Logged in");
    } else {
        println!("Not logged in");
    }
    Ok(())
}
