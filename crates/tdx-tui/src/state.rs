//! Application state composition.
//!
//! ```text
//! AppState
//! ├── view: View
//! │   ├── Unauthenticated(AuthState)  (login / register forms)
//! │   └── Authenticated(BoardState)   (task list, composer, edit row)
//! ├── epoch
//! ├── should_quit
//! └── spinner_frame
//! ```
//!
//! Which variant is active is decided by the presence of a stored session
//! at startup, and afterwards only by the reducer.

use crate::features::auth::AuthState;
use crate::features::board::BoardState;

/// Top-level screen.
#[derive(Debug, Clone)]
pub enum View {
    Unauthenticated(AuthState),
    Authenticated(BoardState),
}

impl View {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, View::Authenticated(_))
    }
}

/// Combined application state for the TUI.
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    /// Bumped on every sign-in and sign-out. A board remembers the value it
    /// was created with, and results tagged with another value are stale.
    pub epoch: u64,
    pub should_quit: bool,
    /// Advanced on every tick; drives the loading indicator.
    pub spinner_frame: usize,
}

impl AppState {
    /// Starts on the board when a session is stored, on the login form otherwise.
    pub fn new(has_session: bool) -> Self {
        let view = if has_session {
            View::Authenticated(BoardState::new())
        } else {
            View::Unauthenticated(AuthState::login())
        };
        Self {
            view,
            epoch: 0,
            should_quit: false,
            spinner_frame: 0,
        }
    }

    /// The board, if it belongs to the sign-in identified by `epoch`.
    pub fn board_for(&mut self, epoch: u64) -> Option<&mut BoardState> {
        self.board_mut().filter(|board| board.epoch == epoch)
    }

    pub fn board_mut(&mut self) -> Option<&mut BoardState> {
        match &mut self.view {
            View::Authenticated(board) => Some(board),
            View::Unauthenticated(_) => None,
        }
    }

    pub fn auth_mut(&mut self) -> Option<&mut AuthState> {
        match &mut self.view {
            View::Unauthenticated(auth) => Some(auth),
            View::Authenticated(_) => None,
        }
    }

    /// Enters the signed-in view with an empty board.
    pub fn sign_in(&mut self) {
        self.epoch += 1;
        self.view = View::Authenticated(BoardState::with_epoch(self.epoch));
    }

    /// Returns to the login form, optionally showing why.
    pub fn sign_out(&mut self, error: Option<&str>) {
        self.epoch += 1;
        self.view = View::Unauthenticated(match error {
            Some(error) => AuthState::login_with_error(error),
            None => AuthState::login(),
        });
    }
}
