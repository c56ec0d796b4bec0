//! Task command handlers.

use anyhow::{Context, Result, anyhow, bail};
use tdx_core::api::ApiError;
use tdx_core::task::{Task, TaskId};

use crate::cli::App;

const NOT_LOGGED_IN: &str = "Not logged in. Run `tdx login` first.";

/// Requested edits; `None` leaves the field as stored on the server.
#[derive(Debug, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TaskChanges {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

fn access_token(app: &App) -> Result<String> {
    let session = app.session.get().context("read session")?;
    session.map(|s| s.access).context(NOT_LOGGED_IN)
}

/// Converts a client error, forgetting the session when the server rejected it.
fn api_error(app: &App, err: ApiError) -> anyhow::Error {
    if err.is_unauthorized()
        && let Err(clear_err) = app.session.clear()
    {
        tracing::error!("clearing session failed: {clear_err:#}");
    }
    anyhow!(err)
}

fn format_task(task: &Task) -> String {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    format!("#{} {mark} {} - {}", task.id, task.title, task.description)
}

pub async fn list(app: &App) -> Result<()> {
    let token = access_token(app)?;
    let tasks = app
        .tasks
        .list(&token)
        .await
        .map_err(|err| api_error(app, err))?;

    if tasks.is_empty() {
        println!("No tasks found.");
    } else {
        for task in &tasks {
            println!("{}", format_task(task));
        }
    }
    Ok(())
}

pub async fn add(app: &App, title: &str, description: &str) -> Result<()> {
    let token = access_token(app)?;
    let task = app
        .tasks
        .create(&token, title, description)
        .await
        .map_err(|err| api_error(app, err))?;
    println!("Created {}", format_task(&task));
    Ok(())
}

/// Updates are full replacements, so the current task is fetched first.
pub async fn edit(app: &App, id: TaskId, changes: TaskChanges) -> Result<()> {
    if changes.is_empty() {
        bail!("Nothing to change. Pass --title, --description or --completed.");
    }
    let token = access_token(app)?;

    let tasks = app
        .tasks
        .list(&token)
        .await
        .map_err(|err| api_error(app, err))?;
    let Some(mut task) = tasks.into_iter().find(|t| t.id == id) else {
        bail!("Task #{id} not found.");
    };
    changes.apply(&mut task);

    let updated = app
        .tasks
        .update(&token, id, &task)
        .await
        .map_err(|err| api_error(app, err))?;
    println!("Updated {}", format_task(&updated));
    Ok(())
}

pub async fn delete(app: &App, id: TaskId) -> Result<()> {
    let token = access_token(app)?;
    app.tasks
        .delete(&token, id)
        .await
        .map_err(|err| api_error(app, err))?;
    println!("Deleted #{id}.");
    Ok(())
}
