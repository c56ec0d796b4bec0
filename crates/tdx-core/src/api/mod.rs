//! HTTP clients for the to-do API.
//!
//! - `auth`: register / login / logout
//! - `tasks`: list / create / update / delete
//!
//! Both share [`ApiClient`] and report failures as [`ApiError`] values. An
//! expired credential is an ordinary `Err(ApiError::Unauthorized)`; what
//! happens next (clearing the session, showing the login screen) is up to
//! the caller.

pub mod auth;
pub mod tasks;

use std::fmt;
use std::time::Duration;

use anyhow::Context;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;

pub use auth::AuthClient;
pub use tasks::TaskClient;

/// Standard User-Agent header for tdx API requests.
pub const USER_AGENT: &str = concat!("tdx/", env!("CARGO_PKG_VERSION"));

/// Error code the server returns for an invalid or expired access token.
pub const TOKEN_NOT_VALID_CODE: &str = "token_not_valid";

/// Failure categories surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A required field was empty; no request was sent.
    Validation(String),
    /// The server rejected the access token.
    Unauthorized,
    /// Any other network or server failure. The message is user-facing.
    RequestFailed(String),
}

impl ApiError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        ApiError::RequestFailed(message.into())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) | ApiError::RequestFailed(msg) => write!(f, "{msg}"),
            ApiError::Unauthorized => write!(f, "Your session has expired. Please log in again."),
        }
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Checks the registration form. All three fields are required.
pub fn validate_registration(email: &str, username: &str, password: &str) -> ApiResult<()> {
    if is_blank(email) || is_blank(username) || is_blank(password) {
        return Err(ApiError::Validation(
            "Email, Username, and Password are required.".to_string(),
        ));
    }
    Ok(())
}

/// Checks the login form.
pub fn validate_login(username: &str, password: &str) -> ApiResult<()> {
    if is_blank(username) || is_blank(password) {
        return Err(ApiError::Validation(
            "Username and password are required.".to_string(),
        ));
    }
    Ok(())
}

/// Checks a new task before it is sent.
pub fn validate_new_task(title: &str, description: &str) -> ApiResult<()> {
    if is_blank(title) || is_blank(description) {
        return Err(ApiError::Validation(
            "Both title and description are required.".to_string(),
        ));
    }
    Ok(())
}

/// Error body shape used by the server (`{"detail": ..., "code": ...}`).
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
}

/// Classifies a non-success response.
fn classify_failure(status: StatusCode, body: &str) -> ApiError {
    let code = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.code);

    if status == StatusCode::UNAUTHORIZED || code.as_deref() == Some(TOKEN_NOT_VALID_CODE) {
        ApiError::Unauthorized
    } else {
        ApiError::RequestFailed(format!("HTTP {}", status.as_u16()))
    }
}

/// Shared HTTP plumbing bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url` with an optional request timeout.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path))
    }

    /// Sends a request and maps any non-2xx status to an [`ApiError`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await.map_err(|err| {
            tracing::warn!(error = %err, "request failed to send");
            ApiError::request_failed(format!("Could not reach server: {err}"))
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(url = %response.url().path(), status = status.as_u16(), "request ok");
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let error = classify_failure(status, &body);
        tracing::debug!(url = %path, status = status.as_u16(), body = %body, ?error, "request rejected");
        Err(error)
    }

    /// Sends a request and decodes a JSON success body.
    pub(crate) async fn send_json<T>(&self, request: RequestBuilder) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(|err| {
            tracing::warn!(error = %err, "unexpected response body");
            ApiError::request_failed("Unexpected response from server.")
        })
    }
}
