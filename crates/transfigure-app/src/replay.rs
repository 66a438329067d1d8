//! Session scripts and their replay through an editor.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;
use transfigure_core::config::{ConfigError, EditorConfig};
use transfigure_core::editor::Editor;
use transfigure_core::input::InputEvent;
use transfigure_core::shape::{Shape, ShapeId};
use transfigure_render::{DriverRegistry, render_scene};

/// Errors that end a replay run.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Initial shapes and the inputs to feed the editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl Script {
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> ReplayResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

/// Load and validate an editor config file.
pub fn load_config(path: &Path) -> ReplayResult<EditorConfig> {
    Ok(EditorConfig::from_json(&std::fs::read_to_string(path)?)?)
}

/// What a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutcome {
    /// Canonical shapes after the last event.
    pub shapes: Vec<Shape>,
    /// Selection at the end, in selection order.
    pub selected: Vec<ShapeId>,
    /// How many times the change callback fired.
    pub changes: usize,
    /// Events the editor rejected.
    pub rejected: usize,
    /// Drawable nodes in the final scene.
    pub drawable_nodes: usize,
}

/// Feed every scripted event to a fresh editor.
///
/// Events the editor rejects, such as a zero zoom, are logged and skipped.
pub fn replay(config: EditorConfig, script: Script) -> ReplayOutcome {
    let changes = Rc::new(Cell::new(0usize));
    let mut editor = Editor::new(config).with_shapes(script.shapes);
    let counter = Rc::clone(&changes);
    editor.on_changed(move |shapes| {
        counter.set(counter.get() + 1);
        log::debug!("Store now holds {} shape(s)", shapes.len());
    });

    let mut rejected = 0;
    for (index, event) in script.events.into_iter().enumerate() {
        if let Err(e) = editor.handle(event) {
            log::warn!("Event {} rejected: {}", index, e);
            rejected += 1;
        }
    }
    if editor.is_gesture_active() {
        log::warn!("Script ended during a gesture; staged edits were not committed");
    }

    let registry = DriverRegistry::with_defaults();
    let scene = render_scene(&editor, &registry);

    ReplayOutcome {
        shapes: editor.shapes().to_vec(),
        selected: editor.selection().ids().to_vec(),
        changes: changes.get(),
        rejected,
        drawable_nodes: scene.drawable_count(),
    }
}
