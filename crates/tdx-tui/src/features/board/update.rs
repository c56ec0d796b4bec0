//! Board reducer.
//!
//! Key handling follows the active mode: delete confirmation first, then
//! the edit row, then the composer, then list navigation. Server results
//! are applied here, except for an expired session which the top-level
//! reducer handles before delegating.

use crossterm::event::{KeyCode, KeyEvent};
use tdx_core::api::{ApiError, ApiResult, validate_new_task};
use tdx_core::task::{Task, TaskId};

use super::state::{BoardState, DraftField};
use crate::effects::UiEffect;

const FETCH_FAILED: &str = "Failed to fetch tasks. Please try again.";
const CREATE_FAILED: &str = "Failed to add task. Please try again.";
const UPDATE_FAILED: &str = "Failed to update task.";
const DELETE_FAILED: &str = "Failed to delete task.";

pub fn handle_board_key(board: &mut BoardState, key: KeyEvent) -> Vec<UiEffect> {
    if board.confirm_delete.is_some() {
        return handle_confirm_key(board, key);
    }
    if board.editing.is_some() {
        return handle_edit_key(board, key);
    }
    if board.composing {
        return handle_composer_key(board, key);
    }
    handle_list_key(board, key)
}

fn handle_confirm_key(board: &mut BoardState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => board
            .confirm_delete
            .take()
            .map(|id| {
                vec![UiEffect::DeleteTask {
                    epoch: board.epoch,
                    id,
                }]
            })
            .unwrap_or_default(),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => {
            board.confirm_delete = None;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_edit_key(board: &mut BoardState, key: KeyEvent) -> Vec<UiEffect> {
    let Some(draft) = board.editing.as_mut() else {
        return vec![];
    };

    match key.code {
        KeyCode::Esc => {
            board.editing = None;
            vec![]
        }
        KeyCode::Enter => vec![UiEffect::UpdateTask {
            epoch: board.epoch,
            task: draft.to_task(),
        }],
        KeyCode::Tab | KeyCode::Down => {
            draft.focus_next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            draft.focus_prev();
            vec![]
        }
        _ => {
            match draft.focus {
                DraftField::Title => {
                    draft.title.handle_key(key);
                }
                DraftField::Description => {
                    draft.description.handle_key(key);
                }
                DraftField::Completed => {
                    if matches!(key.code, KeyCode::Char(' ' | 'x')) {
                        draft.completed = !draft.completed;
                    }
                }
            }
            vec![]
        }
    }
}

fn handle_composer_key(board: &mut BoardState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            board.composing = false;
            vec![]
        }
        KeyCode::Tab | KeyCode::BackTab => {
            board.composer.toggle_focus();
            vec![]
        }
        KeyCode::Enter => {
            let title = board.composer.title.value().to_string();
            let description = board.composer.description.value().to_string();
            if let Err(err) = validate_new_task(&title, &description) {
                board.error = Some(err.to_string());
                return vec![];
            }
            board.error = None;
            vec![UiEffect::CreateTask {
                epoch: board.epoch,
                title,
                description,
            }]
        }
        _ => {
            board.composer.focused_mut().handle_key(key);
            vec![]
        }
    }
}

fn handle_list_key(board: &mut BoardState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            board.select_prev();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            board.select_next();
            vec![]
        }
        KeyCode::Char('a' | 'n') => {
            board.composing = true;
            vec![]
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = board.selected_task().map(|t| t.id) {
                board.start_editing(id);
            }
            vec![]
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            board.confirm_delete = board.selected_task().map(|t| t.id);
            vec![]
        }
        KeyCode::Char('x' | ' ') => match board.selected_task() {
            Some(task) => vec![UiEffect::UpdateTask {
                epoch: board.epoch,
                task: Task {
                    completed: !task.completed,
                    ..task.clone()
                },
            }],
            None => vec![],
        },
        KeyCode::Char('r') => {
            board.loading = true;
            vec![UiEffect::FetchTasks { epoch: board.epoch }]
        }
        KeyCode::Char('l') => vec![UiEffect::Logout { epoch: board.epoch }],
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => vec![],
    }
}

fn failure_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Validation(message) => message.clone(),
        _ => fallback.to_string(),
    }
}

/// Replaces the local list with the server's.
pub fn handle_tasks_loaded(board: &mut BoardState, result: ApiResult<Vec<Task>>) {
    board.loading = false;
    match result {
        Ok(tasks) => {
            board.tasks.replace_all(tasks);
            board.clamp_selection();
            board.error = None;
        }
        Err(err) => {
            tracing::warn!(error = %err, "fetching tasks failed");
            board.error = Some(failure_message(&err, FETCH_FAILED));
        }
    }
}

/// Appends the created task and resets the composer.
pub fn handle_task_created(board: &mut BoardState, result: ApiResult<Task>) {
    match result {
        Ok(task) => {
            board.tasks.append(task);
            board.composer.clear();
            board.error = None;
        }
        Err(err) => {
            tracing::warn!(error = %err, "creating task failed");
            board.error = Some(failure_message(&err, CREATE_FAILED));
        }
    }
}

/// Swaps in the server's copy. The edit row closes only on success.
pub fn handle_task_updated(board: &mut BoardState, id: TaskId, result: ApiResult<Task>) {
    match result {
        Ok(task) => {
            if board.is_editing(id) {
                board.editing = None;
            }
            board.tasks.replace(task);
            board.error = None;
        }
        Err(err) => {
            tracing::warn!(error = %err, %id, "updating task failed");
            board.error = Some(failure_message(&err, UPDATE_FAILED));
        }
    }
}

pub fn handle_task_deleted(board: &mut BoardState, id: TaskId, result: ApiResult<()>) {
    match result {
        Ok(()) => {
            board.tasks.remove(id);
            if board.is_editing(id) {
                board.editing = None;
            }
            board.clamp_selection();
            board.error = None;
        }
        Err(err) => {
            tracing::warn!(error = %err, %id, "deleting task failed");
            board.error = Some(failure_message(&err, DELETE_FAILED));
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn task(id: u64, title: &str, completed: bool) -> Task {
        Task {
            id: TaskId(id),
            title: title.to_string(),
            description: format!("{title} Desc"),
            completed,
        }
    }

    fn press(board: &mut BoardState, code: KeyCode) -> Vec<UiEffect> {
        handle_board_key(board, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(board: &mut BoardState, text: &str) {
        for c in text.chars() {
            press(board, KeyCode::Char(c));
        }
    }

    const EPOCH: u64 = 7;

    fn board_with(tasks: Vec<Task>) -> BoardState {
        let mut board = BoardState::with_epoch(EPOCH);
        board.tasks.replace_all(tasks);
        board
    }

    #[test]
    fn test_composer_submit_emits_create() {
        let mut board = BoardState::with_epoch(EPOCH);
        press(&mut board, KeyCode::Char('a'));
        type_text(&mut board, "New Task");
        press(&mut board, KeyCode::Tab);
        type_text(&mut board, "New Task Desc");

        let effects = press(&mut board, KeyCode::Enter);
        assert_eq!(
            effects,
            vec![UiEffect::CreateTask {
                epoch: EPOCH,
                title: "New Task".to_string(),
                description: "New Task Desc".to_string(),
            }]
        );
    }

    #[test]
    fn test_composer_blank_description_blocks_request() {
        let mut board = BoardState::new();
        press(&mut board, KeyCode::Char('a'));
        type_text(&mut board, "New Task");

        assert!(press(&mut board, KeyCode::Enter).is_empty());
        assert_eq!(
            board.error.as_deref(),
            Some("Both title and description are required.")
        );
    }

    #[test]
    fn test_created_task_is_appended_and_composer_cleared() {
        let mut board = board_with(vec![task(1, "Test Task", false)]);
        board.composer.title.set("New Task");
        board.composer.description.set("New Task Desc");

        handle_task_created(&mut board, Ok(task(2, "New Task", false)));

        let titles: Vec<_> = board.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Test Task", "New Task"]);
        assert!(board.composer.title.is_empty());
        assert!(board.composer.description.is_empty());
    }

    #[test]
    fn test_create_failure_keeps_inputs() {
        let mut board = BoardState::new();
        board.composer.title.set("New Task");
        board.composer.description.set("Desc");

        handle_task_created(&mut board, Err(ApiError::request_failed("HTTP 500")));

        assert_eq!(board.composer.title.value(), "New Task");
        assert_eq!(board.error.as_deref(), Some(CREATE_FAILED));
        assert!(board.tasks.is_empty());
    }

    #[test]
    fn test_edit_cancel_discards_draft() {
        let mut board = board_with(vec![task(3, "Task 3", false)]);
        press(&mut board, KeyCode::Char('e'));
        press(&mut board, KeyCode::Char('!'));
        assert_eq!(
            board.editing.as_ref().map(|d| d.title.value().to_string()),
            Some("Task 3!".to_string())
        );

        assert!(press(&mut board, KeyCode::Esc).is_empty());
        assert!(board.editing.is_none());
        assert_eq!(board.tasks.get(TaskId(3)).map(|t| t.title.as_str()), Some("Task 3"));
    }

    #[test]
    fn test_edit_save_sends_full_object() {
        let mut board = board_with(vec![task(3, "Task 3", false)]);
        press(&mut board, KeyCode::Enter);
        if let Some(draft) = board.editing.as_mut() {
            draft.title.set("Updated Task");
            draft.description.set("Updated Desc");
        }
        press(&mut board, KeyCode::Tab);
        press(&mut board, KeyCode::Tab);
        press(&mut board, KeyCode::Char(' '));

        let effects = press(&mut board, KeyCode::Enter);
        assert_eq!(
            effects,
            vec![UiEffect::UpdateTask {
                epoch: EPOCH,
                task: Task {
                    id: TaskId(3),
                    title: "Updated Task".to_string(),
                    description: "Updated Desc".to_string(),
                    completed: true,
                }
            }]
        );
        // Draft stays open until the server answers.
        assert!(board.is_editing(TaskId(3)));
    }

    #[test]
    fn test_update_success_replaces_in_place_and_closes_editor() {
        let mut board = board_with(vec![task(1, "A", false), task(3, "Task 3", false)]);
        board.start_editing(TaskId(3));

        handle_task_updated(&mut board, TaskId(3), Ok(task(3, "Updated Task", true)));

        assert!(board.editing.is_none());
        assert_eq!(board.tasks.position(TaskId(3)), Some(1));
        assert_eq!(
            board.tasks.get(TaskId(3)).map(|t| t.title.as_str()),
            Some("Updated Task")
        );
    }

    #[test]
    fn test_update_failure_keeps_draft() {
        let mut board = board_with(vec![task(3, "Task 3", false)]);
        board.start_editing(TaskId(3));

        handle_task_updated(
            &mut board,
            TaskId(3),
            Err(ApiError::request_failed("HTTP 500")),
        );

        assert!(board.is_editing(TaskId(3)));
        assert_eq!(board.error.as_deref(), Some(UPDATE_FAILED));
        assert_eq!(board.tasks.get(TaskId(3)).map(|t| t.title.as_str()), Some("Task 3"));
    }

    #[test]
    fn test_quick_toggle_sends_flipped_completion_without_local_change() {
        let mut board = board_with(vec![task(1, "Test Task", false)]);
        let effects = press(&mut board, KeyCode::Char('x'));
        assert_eq!(
            effects,
            vec![UiEffect::UpdateTask {
                epoch: EPOCH,
                task: task(1, "Test Task", true)
            }]
        );
        assert_eq!(board.tasks.get(TaskId(1)).map(|t| t.completed), Some(false));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut board = board_with(vec![task(4, "Task to Delete", false)]);
        assert!(press(&mut board, KeyCode::Char('d')).is_empty());
        assert_eq!(board.confirm_delete, Some(TaskId(4)));

        assert!(press(&mut board, KeyCode::Char('n')).is_empty());
        assert!(board.confirm_delete.is_none());

        press(&mut board, KeyCode::Char('d'));
        assert_eq!(
            press(&mut board, KeyCode::Char('y')),
            vec![UiEffect::DeleteTask {
                epoch: EPOCH,
                id: TaskId(4)
            }]
        );
    }

    #[test]
    fn test_delete_success_removes_task() {
        let mut board = board_with(vec![task(1, "A", false), task(4, "Task to Delete", false)]);
        board.selected = 1;

        handle_task_deleted(&mut board, TaskId(4), Ok(()));

        assert!(board.tasks.get(TaskId(4)).is_none());
        assert_eq!(board.selected, 0);
    }

    #[test]
    fn test_delete_failure_keeps_task() {
        let mut board = board_with(vec![task(4, "Task to Delete", false)]);
        handle_task_deleted(
            &mut board,
            TaskId(4),
            Err(ApiError::request_failed("HTTP 500")),
        );
        assert_eq!(board.tasks.len(), 1);
        assert_eq!(board.error.as_deref(), Some(DELETE_FAILED));
    }

    #[test]
    fn test_fetch_failure_keeps_previous_list() {
        let mut board = board_with(vec![task(1, "Test Task", false)]);
        board.loading = true;
        handle_tasks_loaded(&mut board, Err(ApiError::request_failed("HTTP 500")));
        assert!(!board.loading);
        assert_eq!(board.tasks.len(), 1);
        assert_eq!(board.error.as_deref(), Some(FETCH_FAILED));
    }

    #[test]
    fn test_list_keys() {
        let mut board = board_with(vec![task(1, "A", false)]);
        assert_eq!(
            press(&mut board, KeyCode::Char('r')),
            vec![UiEffect::FetchTasks { epoch: EPOCH }]
        );
        assert!(board.loading);
        assert_eq!(
            press(&mut board, KeyCode::Char('l')),
            vec![UiEffect::Logout { epoch: EPOCH }]
        );
        assert_eq!(press(&mut board, KeyCode::Char('q')), vec![UiEffect::Quit]);
    }
}
