//! Runtime execution modes.
//!
//! - commands: one request per invocation (stdout/stderr)
//! - `tui`: full-screen interactive terminal UI (optional feature)

#[cfg(feature = "tui")]
pub fn run_interactive(
    auth: tdx_core::api::AuthClient,
    tasks: tdx_core::api::TaskClient,
    session: std::sync::Arc<dyn tdx_core::session::SessionStore>,
) -> anyhow::Result<()> {
    tdx_tui::run_interactive(tdx_tui::Services::new(auth, tasks, session))
}

#[cfg(not(feature = "tui"))]
pub fn run_interactive(
    _auth: tdx_core::api::AuthClient,
    _tasks: tdx_core::api::TaskClient,
    _session: std::sync::Arc<dyn tdx_core::session::SessionStore>,
) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
