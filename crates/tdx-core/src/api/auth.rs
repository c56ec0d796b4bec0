//! Auth endpoints: register, login, logout.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, ApiResult, validate_login, validate_registration};
use crate::session::Session;

const REGISTER_PATH: &str = "/api/auth/register/";
const LOGIN_PATH: &str = "/api/auth/login/";
const LOGOUT_PATH: &str = "/api/auth/logout/";

const REGISTER_FAILED: &str = "Registration failed. Try again.";
const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

#[derive(Serialize)]
struct LogoutRequest<'a> {
    refresh_token: Option<&'a str>,
}

/// Client for the account endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Creates an account. Remote failures collapse into one generic message.
    pub async fn register(&self, email: &str, username: &str, password: &str) -> ApiResult<()> {
        validate_registration(email, username, password)?;

        let request = self.api.post(REGISTER_PATH).json(&RegisterRequest {
            email,
            username,
            password,
        });
        match self.api.send(request).await {
            Ok(_) => {
                tracing::info!("registration accepted");
                Ok(())
            }
            Err(err) => {
                tracing::info!(error = %err, "registration rejected");
                Err(ApiError::request_failed(REGISTER_FAILED))
            }
        }
    }

    /// Exchanges credentials for a session.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        validate_login(username, password)?;

        let request = self
            .api
            .post(LOGIN_PATH)
            .json(&LoginRequest { username, password });
        let response: LoginResponse = self.api.send_json(request).await.map_err(|err| {
            tracing::info!(error = %err, "login rejected");
            ApiError::request_failed(LOGIN_FAILED)
        })?;

        if response.access.is_empty() {
            return Err(ApiError::request_failed(LOGIN_FAILED));
        }

        tracing::info!("login succeeded");
        Ok(Session {
            access: response.access,
            refresh: response.refresh,
        })
    }

    /// Tells the server the session is over.
    pub async fn logout(&self, session: &Session) -> ApiResult<()> {
        let request = self
            .api
            .post(LOGOUT_PATH)
            .bearer_auth(&session.access)
            .json(&LogoutRequest {
                refresh_token: session.refresh.as_deref(),
            });
        self.api.send(request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client(server: &MockServer) -> AuthClient {
        AuthClient::new(ApiClient::new(&server.uri(), None).unwrap())
    }

    #[tokio::test]
    async fn test_register_with_empty_field_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REGISTER_PATH))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server).await.register("", "alice", "pw").await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_posts_all_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REGISTER_PATH))
            .and(body_json(json!({
                "email": "alice@example.com",
                "username": "alice",
                "password": "pw"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .register("alice@example.com", "alice", "pw")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_register_failure_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REGISTER_PATH))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"username": ["A user with that username already exists."]})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .register("alice@example.com", "alice", "pw")
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::RequestFailed(REGISTER_FAILED.to_string()));
    }

    #[tokio::test]
    async fn test_login_returns_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .and(body_json(json!({"username": "alice", "password": "pw"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access": "acc", "refresh": "ref"})),
            )
            .mount(&server)
            .await;

        let session = client(&server).await.login("alice", "pw").await.unwrap();
        assert_eq!(session, Session::new("acc").with_refresh("ref"));
    }

    #[tokio::test]
    async fn test_login_401_is_not_session_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "No active account found with the given credentials"})),
            )
            .mount(&server)
            .await;

        let err = client(&server).await.login("alice", "bad").await.unwrap_err();
        assert_eq!(err, ApiError::RequestFailed(LOGIN_FAILED.to_string()));
    }

    #[tokio::test]
    async fn test_logout_sends_bearer_and_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGOUT_PATH))
            .and(header("authorization", "Bearer acc"))
            .and(body_json(json!({"refresh_token": "ref"})))
            .respond_with(ResponseTemplate::new(205))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .logout(&Session::new("acc").with_refresh("ref"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_logout_without_refresh_sends_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGOUT_PATH))
            .and(body_json(json!({"refresh_token": null})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .logout(&Session::new("acc"))
            .await
            .unwrap();
    }
}
