use tdx_core::api::ApiResult;
use tdx_core::task::{Task, TaskId};

use super::Services;
use crate::events::UiEvent;

pub async fn fetch_tasks(services: Services, epoch: u64) -> UiEvent {
    UiEvent::TasksLoaded {
        epoch,
        result: list(&services).await,
    }
}

async fn list(services: &Services) -> ApiResult<Vec<Task>> {
    let session = services.current_session()?;
    services.tasks.list(&session.access).await
}

pub async fn create_task(
    services: Services,
    epoch: u64,
    title: String,
    description: String,
) -> UiEvent {
    let result = match services.current_session() {
        Ok(session) => {
            services
                .tasks
                .create(&session.access, &title, &description)
                .await
        }
        Err(err) => Err(err),
    };
    UiEvent::TaskCreated { epoch, result }
}

pub async fn update_task(services: Services, epoch: u64, task: Task) -> UiEvent {
    let id = task.id;
    let result = match services.current_session() {
        Ok(session) => services.tasks.update(&session.access, id, &task).await,
        Err(err) => Err(err),
    };
    UiEvent::TaskUpdated { epoch, id, result }
}

pub async fn delete_task(services: Services, epoch: u64, id: TaskId) -> UiEvent {
    let result = match services.current_session() {
        Ok(session) => services.tasks.delete(&session.access, id).await,
        Err(err) => Err(err),
    };
    UiEvent::TaskDeleted { epoch, id, result }
}
