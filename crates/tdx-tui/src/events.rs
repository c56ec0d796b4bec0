//! Events consumed by the reducer.
//!
//! Terminal input and ticks come from the event loop; every other variant
//! is the outcome of an effect, sent back through the runtime inbox.
//! Board results echo the `epoch` of the effect that produced them.

use tdx_core::api::ApiResult;
use tdx_core::task::{Task, TaskId};

#[derive(Debug)]
pub enum UiEvent {
    /// Animation/housekeeping tick.
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    /// Login finished; on success the session is already stored.
    LoginFinished(ApiResult<()>),
    RegisterFinished(ApiResult<()>),
    LogoutFinished {
        epoch: u64,
        result: ApiResult<()>,
    },

    TasksLoaded {
        epoch: u64,
        result: ApiResult<Vec<Task>>,
    },
    TaskCreated {
        epoch: u64,
        result: ApiResult<Task>,
    },
    TaskUpdated {
        epoch: u64,
        id: TaskId,
        result: ApiResult<Task>,
    },
    TaskDeleted {
        epoch: u64,
        id: TaskId,
        result: ApiResult<()>,
    },
}
