//! Pointer targets and the handle layout of a selected shape.

use crate::config::EditorConfig;
use crate::geometry::{Command, ResizeHandle};
use crate::shape::{Shape, ShapeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Kind of interactive handle drawn around a selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "handle")]
pub enum HandleKind {
    Resize(ResizeHandle),
    /// Circular affordance above the top edge.
    Rotate,
}

impl HandleKind {
    /// Gesture command started by pressing this handle.
    pub fn command(self) -> Command {
        match self {
            HandleKind::Resize(handle) => Command::Resize(handle),
            HandleKind::Rotate => Command::Rotate,
        }
    }

    pub fn cursor(self) -> &'static str {
        match self {
            HandleKind::Resize(handle) => handle.cursor(),
            HandleKind::Rotate => "move",
        }
    }
}

/// A handle of a specific shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleRef {
    pub shape_id: ShapeId,
    pub kind: HandleKind,
}

impl HandleRef {
    pub fn new(shape_id: impl Into<ShapeId>, kind: HandleKind) -> Self {
        Self {
            shape_id: shape_id.into(),
            kind,
        }
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PointerTarget {
    /// The body of a shape.
    Shape { id: ShapeId },
    Handle(HandleRef),
    /// Empty canvas.
    Canvas,
}

impl PointerTarget {
    pub fn shape(id: impl Into<ShapeId>) -> Self {
        PointerTarget::Shape { id: id.into() }
    }

    pub fn handle(shape_id: impl Into<ShapeId>, kind: HandleKind) -> Self {
        PointerTarget::Handle(HandleRef::new(shape_id, kind))
    }

    /// Shape the target belongs to, if any.
    pub fn shape_id(&self) -> Option<&str> {
        match self {
            PointerTarget::Shape { id } => Some(id.as_str()),
            PointerTarget::Handle(handle) => Some(handle.shape_id.as_str()),
            PointerTarget::Canvas => None,
        }
    }
}

/// A handle with its position.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in document coordinates, rotation applied.
    pub position: Point,
    pub kind: HandleKind,
    /// Hit radius in document units.
    pub radius: f64,
}

impl Handle {
    /// Check if a document point hits this handle.
    pub fn hit_test(&self, point: Point) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Center of the rotate affordance on the unrotated box.
pub fn rotate_handle_local(rect: Rect, offset: f64) -> Point {
    Point::new(rect.center().x, rect.y0 - offset)
}

/// Every handle of a selected shape: eight resize handles then the rotate
/// affordance.
pub fn shape_handles(shape: &Shape, config: &EditorConfig) -> Vec<Handle> {
    let rect = shape.as_rect();
    let transform = shape.transform();
    let mut handles: Vec<Handle> = ResizeHandle::ALL
        .into_iter()
        .map(|handle| Handle {
            position: transform * handle.position(rect),
            kind: HandleKind::Resize(handle),
            radius: config.handle_radius,
        })
        .collect();
    handles.push(Handle {
        position: transform * rotate_handle_local(rect, config.rotate_handle_offset),
        kind: HandleKind::Rotate,
        radius: config.rotate_handle_radius,
    });
    handles
}

/// Find the handle of `shape` under a document point.
pub fn hit_test_handles(shape: &Shape, point: Point, config: &EditorConfig) -> Option<HandleKind> {
    shape_handles(shape, config)
        .into_iter()
        .find(|handle| handle.hit_test(point))
        .map(|handle| handle.kind)
}
