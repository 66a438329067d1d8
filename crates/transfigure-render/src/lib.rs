//! Transfigure Render Library
//!
//! Shape drivers and a backend-neutral scene description. Hosts walk the
//! resulting [`ViewNode`] tree with whatever graphics stack they use.

pub mod driver;
pub mod node;
pub mod overlay;
pub mod registry;
pub mod scene;

pub use driver::{RectDriver, ShapeDriver};
pub use node::{Paint, Route, ViewNode};
pub use overlay::{OverlayStyle, selection_overlay};
pub use registry::{DriverRegistry, RegistryError};
pub use scene::{SceneContext, render_scene};
