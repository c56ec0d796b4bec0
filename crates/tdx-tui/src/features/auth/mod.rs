//! Login and registration screens (the signed-out side of the app).

mod render;
mod state;
mod update;

pub use render::render_auth;
pub use state::{AuthField, AuthMode, AuthState};
pub use update::{handle_auth_key, handle_login_result, handle_register_result};
