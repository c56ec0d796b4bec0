//! Task board (the signed-in side of the app).

mod render;
mod state;
mod update;

pub use render::render_board;
pub use state::{BoardState, Composer, ComposerField, DraftField, TaskDraft};
pub use update::{
    handle_board_key, handle_task_created, handle_task_deleted, handle_task_updated,
    handle_tasks_loaded,
};
