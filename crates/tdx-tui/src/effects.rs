//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only; the reducer never sends requests or touches
//! the session store itself.
//!
//! Requests made on behalf of a signed-in board carry the board's `epoch`
//! so their results can be matched back to the sign-in that sent them.

use tdx_core::task::{Task, TaskId};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Exchange credentials for a session and store it.
    Login { username: String, password: String },

    /// Create an account.
    Register {
        email: String,
        username: String,
        password: String,
    },

    /// Notify the server that the session ends.
    Logout { epoch: u64 },

    /// Remove the stored session.
    ClearSession,

    /// Load the full task list.
    FetchTasks { epoch: u64 },

    /// Create a task.
    CreateTask {
        epoch: u64,
        title: String,
        description: String,
    },

    /// Replace a task with the given full object.
    UpdateTask { epoch: u64, task: Task },

    /// Delete a task.
    DeleteTask { epoch: u64, id: TaskId },
}
