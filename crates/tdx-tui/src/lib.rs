//! Full-screen TUI for tdx.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use runtime::{Services, TuiRuntime};

/// Runs the interactive to-do app until the user quits.
///
/// Must be called from within a Tokio runtime.
pub fn run_interactive(services: Services) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive app requires a terminal.\n\
             Use `tdx tasks list` and friends for non-interactive use."
        );
    }

    let mut runtime = TuiRuntime::new(services)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
