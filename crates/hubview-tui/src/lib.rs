//! Full-screen TUI for the GitHub OAuth demo backend.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;
pub mod view;

use std::io::{IsTerminal, Write, stderr, stdout};

use anyhow::Result;
pub use features::{repos, session};
use hubview_core::api::ApiClient;
use hubview_core::config::Config;
pub use runtime::{HeadlessRuntime, TuiRuntime};

/// Runs the interactive TUI until the user quits.
///
/// Must be called with a multi-threaded tokio runtime entered: the event loop
/// blocks this thread while request tasks run on the runtime's workers.
pub fn run_interactive(config: &Config) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive view requires a terminal.\n\
             Use `hubview status` or `hubview repos` for non-interactive output."
        );
    }

    let client = ApiClient::new(config)?;
    let mut runtime = TuiRuntime::new(client)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
