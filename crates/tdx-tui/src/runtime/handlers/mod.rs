//! Effect handlers for the TUI runtime.
//!
//! Handlers are async functions that perform I/O and return a `UiEvent`.
//! The runtime spawns them with `spawn_effect` and forwards the result to
//! the inbox. They never touch `AppState`.

pub mod auth;
pub mod tasks;

use std::sync::Arc;

use tdx_core::api::{ApiError, ApiResult, AuthClient, TaskClient};
use tdx_core::session::{Session, SessionStore};

pub use auth::*;
pub use tasks::*;

/// Clients and storage shared by every handler.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthClient,
    pub tasks: TaskClient,
    pub session: Arc<dyn SessionStore>,
}

impl Services {
    pub fn new(auth: AuthClient, tasks: TaskClient, session: Arc<dyn SessionStore>) -> Self {
        Self {
            auth,
            tasks,
            session,
        }
    }

    /// The stored session. A missing session reads as an expired one.
    pub(crate) fn current_session(&self) -> ApiResult<Session> {
        match self.session.get() {
            Ok(Some(session)) => Ok(session),
            Ok(None) => Err(ApiError::Unauthorized),
            Err(err) => Err(ApiError::request_failed(format!(
                "Could not read session: {err:#}"
            ))),
        }
    }
}
