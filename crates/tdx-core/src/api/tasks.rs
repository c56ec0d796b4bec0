//! Task endpoints. Every call carries the access token as a bearer header.

use super::{ApiClient, ApiResult, validate_new_task};
use crate::task::{NewTask, Task, TaskId};

const LIST_PATH: &str = "/api/todos/";
const ADD_PATH: &str = "/api/todos/add/";

fn update_path(id: TaskId) -> String {
    format!("/api/todos/update/{id}/")
}

fn delete_path(id: TaskId) -> String {
    format!("/api/todos/delete/{id}/")
}

/// Client for the task endpoints.
#[derive(Debug, Clone)]
pub struct TaskClient {
    api: ApiClient,
}

impl TaskClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetches every task, in server order.
    pub async fn list(&self, token: &str) -> ApiResult<Vec<Task>> {
        let request = self.api.get(LIST_PATH).bearer_auth(token);
        let tasks: Vec<Task> = self.api.send_json(request).await?;
        tracing::debug!(count = tasks.len(), "tasks fetched");
        Ok(tasks)
    }

    /// Creates a task. The returned task carries the server-assigned id.
    pub async fn create(&self, token: &str, title: &str, description: &str) -> ApiResult<Task> {
        validate_new_task(title, description)?;

        let request = self
            .api
            .post(ADD_PATH)
            .bearer_auth(token)
            .json(&NewTask::new(title, description));
        let task: Task = self.api.send_json(request).await?;
        tracing::debug!(id = %task.id, "task created");
        Ok(task)
    }

    /// Replaces the task `id` with `task` (full object, not a patch).
    pub async fn update(&self, token: &str, id: TaskId, task: &Task) -> ApiResult<Task> {
        let request = self.api.put(&update_path(id)).bearer_auth(token).json(task);
        let updated: Task = self.api.send_json(request).await?;
        tracing::debug!(id = %updated.id, "task updated");
        Ok(updated)
    }

    /// Deletes the task `id`. Any 2xx counts as success; the body is ignored.
    pub async fn delete(&self, token: &str, id: TaskId) -> ApiResult<()> {
        let request = self.api.delete(&delete_path(id)).bearer_auth(token);
        self.api.send(request).await?;
        tracing::debug!(%id, "task deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::ApiError;

    const TOKEN: &str = "fake-jwt-token";

    fn client(server: &MockServer) -> TaskClient {
        TaskClient::new(ApiClient::new(&server.uri(), None).unwrap())
    }

    #[tokio::test]
    async fn test_list_sends_bearer_and_parses_tasks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/todos/"))
            .and(header("authorization", "Bearer fake-jwt-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "title": "Test Task", "description": "Test Desc", "completed": false}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let tasks = client(&server).list(TOKEN).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Test Task");
    }

    #[tokio::test]
    async fn test_list_token_not_valid_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/todos/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "detail": "Given token not valid for any token type",
                "code": "token_not_valid"
            })))
            .mount(&server)
            .await;

        let err = client(&server).list(TOKEN).await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
    }

    #[tokio::test]
    async fn test_list_server_error_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/todos/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server).list(TOKEN).await.unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn test_create_returns_server_task() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/todos/add/"))
            .and(body_json(json!({
                "title": "New Task",
                "description": "New Task Desc",
                "completed": false
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 2, "title": "New Task", "description": "New Task Desc", "completed": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let task = client(&server)
            .create(TOKEN, "New Task", "New Task Desc")
            .await
            .unwrap();
        assert_eq!(task.id, TaskId(2));
    }

    #[tokio::test]
    async fn test_create_blank_title_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/todos/add/"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server).create(TOKEN, " ", "desc").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_puts_full_object() {
        let server = MockServer::start().await;
        let desired = Task {
            id: TaskId(3),
            title: "Updated Task".to_string(),
            description: "Updated Desc".to_string(),
            completed: true,
        };
        Mock::given(method("PUT"))
            .and(path("/api/todos/update/3/"))
            .and(body_json(json!({
                "id": 3, "title": "Updated Task", "description": "Updated Desc", "completed": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "title": "Updated Task", "description": "Updated Desc", "completed": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let updated = client(&server)
            .update(TOKEN, TaskId(3), &desired)
            .await
            .unwrap();
        assert_eq!(updated, desired);
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/todos/delete/4/"))
            .and(header("authorization", "Bearer fake-jwt-token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).delete(TOKEN, TaskId(4)).await.unwrap();
    }
}
