//! Effect handlers. Each returns the `UiEvent` that reports its outcome.

use newsapp_core::api::NewsClient;
use newsapp_core::forms::{FormState, LoginFormState};
use newsapp_core::session::{SessionContext, SessionToken};

use crate::events::UiEvent;

pub async fn register(client: NewsClient, form: FormState) -> UiEvent {
    UiEvent::RegisterFinished(client.register(&form).await)
}

pub async fn login(client: NewsClient, credentials: LoginFormState) -> UiEvent {
    UiEvent::LoginFinished(client.login(&credentials).await)
}

pub fn store_token(session: &SessionContext, token: SessionToken) -> UiEvent {
    let result = session.set_token(Some(token)).map_err(|e| format!("{e:#}"));
    if result.is_ok() {
        tracing::info!("logged in");
    }
    UiEvent::SessionStored(result)
}

pub fn logout(session: &SessionContext) -> UiEvent {
    UiEvent::SessionCleared(session.logout().map_err(|e| format!("{e:#}")))
}
