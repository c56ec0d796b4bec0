//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Board results carry the epoch of the sign-in that requested them. Results
//! whose epoch no longer matches the current board (for example a task list
//! that lands after logging out and back in) are dropped.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tdx_core::api::{ApiError, ApiResult};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{auth, board};
use crate::state::{AppState, View};

const LOGOUT_FAILED: &str = "Error logging out. Please try again.";

/// Effects to run once when the app starts.
///
/// A stored session loads the task list exactly once; a fresh start
/// requests nothing.
pub fn mount(app: &mut AppState) -> Vec<UiEffect> {
    match app.board_mut() {
        Some(board) => {
            board.loading = true;
            vec![UiEffect::FetchTasks { epoch: board.epoch }]
        }
        None => vec![],
    }
}

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),

        UiEvent::LoginFinished(result) => {
            let Some(form) = app.auth_mut() else {
                return vec![];
            };
            if auth::handle_login_result(form, result) {
                app.sign_in();
                mount(app)
            } else {
                vec![]
            }
        }
        UiEvent::RegisterFinished(result) => {
            if let Some(form) = app.auth_mut() {
                auth::handle_register_result(form, result);
            }
            vec![]
        }
        UiEvent::LogoutFinished { epoch, result } => handle_logout_result(app, epoch, result),

        UiEvent::TasksLoaded { epoch, result } => {
            on_board(app, epoch, result, board::handle_tasks_loaded)
        }
        UiEvent::TaskCreated { epoch, result } => {
            on_board(app, epoch, result, board::handle_task_created)
        }
        UiEvent::TaskUpdated { epoch, id, result } => {
            on_board(app, epoch, result, |state, result| {
                board::handle_task_updated(state, id, result);
            })
        }
        UiEvent::TaskDeleted { epoch, id, result } => {
            on_board(app, epoch, result, |state, result| {
                board::handle_task_deleted(state, id, result);
            })
        }
    }
}

/// Routes a task result to the board, handling an expired session first.
fn on_board<T>(
    app: &mut AppState,
    epoch: u64,
    result: ApiResult<T>,
    apply: impl FnOnce(&mut board::BoardState, ApiResult<T>),
) -> Vec<UiEffect> {
    if app.board_for(epoch).is_none() {
        tracing::debug!(epoch, current = app.epoch, "dropping stale task result");
        return vec![];
    }
    if matches!(result, Err(ApiError::Unauthorized)) {
        tracing::info!("session rejected by server");
        app.sign_out(Some(&ApiError::Unauthorized.to_string()));
        return vec![UiEffect::ClearSession];
    }
    if let Some(board) = app.board_for(epoch) {
        apply(board, result);
    }
    vec![]
}

fn handle_logout_result(app: &mut AppState, epoch: u64, result: ApiResult<()>) -> Vec<UiEffect> {
    if app.board_for(epoch).is_none() {
        tracing::debug!(epoch, current = app.epoch, "dropping stale logout result");
        return vec![];
    }
    match result {
        Ok(()) | Err(ApiError::Unauthorized) => {
            app.sign_out(None);
            vec![UiEffect::ClearSession]
        }
        Err(err) => {
            tracing::warn!(error = %err, "logout failed");
            if let Some(board) = app.board_for(epoch) {
                board.error = Some(LOGOUT_FAILED.to_string());
            }
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }
    match &mut app.view {
        View::Unauthenticated(state) => auth::handle_auth_key(state, key),
        View::Authenticated(state) => board::handle_board_key(state, key),
    }
}

fn handle_paste(app: &mut AppState, text: &str) {
    match &mut app.view {
        View::Unauthenticated(state) => state.focused_mut().paste(text),
        View::Authenticated(state) => {
            if let Some(draft) = state.editing.as_mut() {
                match draft.focus {
                    board::DraftField::Title => draft.title.paste(text),
                    board::DraftField::Description => draft.description.paste(text),
                    board::DraftField::Completed => {}
                }
            } else if state.composing {
                state.composer.focused_mut().paste(text);
            }
        }
    }
}
