// ABOUTME: Command module aggregator for the limani CLI.
// ABOUTME: Re-exports check, list, push, and remove command handlers.

mod check;
mod list;
mod push;
mod remove;

pub use check::check;
pub use list::list;
pub use push::{push, PushArgs};
pub use remove::remove;

use limani::error::{Error, Result};
use limani::executor::{CliEngine, Engine};

/// Refuse to proceed when the configured engine command cannot run.
async fn ensure_engine(engine: &CliEngine) -> Result<()> {
    if engine.available().await {
        Ok(())
    } else {
        Err(Error::EngineUnavailable {
            engine: engine.command_name().to_string(),
        })
    }
}
