use tdx_core::api::{ApiError, ApiResult};

use super::Services;
use crate::events::UiEvent;

/// Logs in and stores the returned session.
pub async fn login(services: Services, username: String, password: String) -> UiEvent {
    UiEvent::LoginFinished(login_and_store(&services, &username, &password).await)
}

async fn login_and_store(services: &Services, username: &str, password: &str) -> ApiResult<()> {
    let session = services.auth.login(username, password).await?;
    services.session.set(&session).map_err(|err| {
        tracing::error!("storing session failed: {err:#}");
        ApiError::request_failed(format!("Could not save session: {err:#}"))
    })
}

pub async fn register(
    services: Services,
    email: String,
    username: String,
    password: String,
) -> UiEvent {
    UiEvent::RegisterFinished(services.auth.register(&email, &username, &password).await)
}

/// Notifies the server. Without a stored session there is nothing to revoke.
pub async fn logout(services: Services, epoch: u64) -> UiEvent {
    let result = match services.session.get() {
        Ok(Some(session)) => services.auth.logout(&session).await,
        Ok(None) => Ok(()),
        Err(err) => Err(ApiError::request_failed(format!(
            "Could not read session: {err:#}"
        ))),
    };
    UiEvent::LogoutFinished { epoch, result }
}
