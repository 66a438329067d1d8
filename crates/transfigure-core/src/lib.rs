//! Transfigure Core Library
//!
//! Platform-agnostic engine for selecting, moving, resizing and rotating
//! rectangular shapes with a pointer. Rendering lives in `transfigure-render`.

pub mod affine;
pub mod appender;
pub mod config;
pub mod editor;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod handles;
pub mod input;
pub mod selection;
pub mod shape;
pub mod view;

pub use appender::Appender;
pub use config::{ConfigError, EditorConfig, MissingShapePolicy};
pub use editor::{ChangeCallback, Editor};
pub use events::{EventSink, HandleRoute, ShapeEvent, ShapeEventBus, ShapeEventRoute};
pub use geometry::{Command, MIN_SHAPE_SIZE, ResizeHandle};
pub use gesture::{GestureController, GestureSession, GestureState};
pub use handles::{HandleKind, HandleRef, PointerTarget};
pub use input::{InputEvent, Modifiers};
pub use selection::{SelectionEntry, SelectionError, SelectionManager};
pub use shape::{SerializableColor, Shape, ShapeId, ShapeStyle};
pub use view::{ViewError, ViewTransform};
