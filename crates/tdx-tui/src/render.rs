//! Pure view functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;

use crate::features::{auth, board};
use crate::state::{AppState, View};

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    match &app.view {
        View::Unauthenticated(state) => auth::render_auth(frame, state, area),
        View::Authenticated(state) => board::render_board(frame, state, area, app.spinner_frame),
    }
}
