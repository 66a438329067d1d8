//! Transfigure replay shell
//!
//! Loads a session script, feeds it through an editor and reports the
//! resulting document.

mod args;
mod replay;

pub use args::Args;
pub use replay::{ReplayError, ReplayOutcome, ReplayResult, Script, load_config, replay};

use transfigure_core::config::EditorConfig;

/// Run a replay and return the outcome as JSON.
pub fn run(args: &Args) -> ReplayResult<String> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EditorConfig::default(),
    };
    let script = Script::load(&args.script)?;
    log::info!(
        "Replaying {} event(s) over {} shape(s)",
        script.events.len(),
        script.shapes.len()
    );

    let outcome = replay(config, script);
    let json = if args.compact {
        serde_json::to_string(&outcome)?
    } else {
        serde_json::to_string_pretty(&outcome)?
    };
    Ok(json)
}
