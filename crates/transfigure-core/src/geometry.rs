//! Rotation-aware move, resize and rotate geometry.
//!
//! Every function takes the gesture baseline and two pointer samples in
//! document space. Results never depend on a previous frame, so a long
//! pointer-move stream cannot accumulate error.

use crate::affine;
use crate::shape::Shape;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Smallest width or height an edit may produce, in document units.
pub const MIN_SHAPE_SIZE: f64 = 30.0;

/// One of the eight resize handles on a shape's unrotated box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    Nw,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
}

/// Error returned when parsing an unknown handle tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown resize handle: {0}")]
pub struct UnknownHandle(pub String);

impl ResizeHandle {
    /// All handles, clockwise from the top-left corner.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Nw,
        ResizeHandle::N,
        ResizeHandle::Ne,
        ResizeHandle::E,
        ResizeHandle::Se,
        ResizeHandle::S,
        ResizeHandle::Sw,
        ResizeHandle::W,
    ];

    pub fn is_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    pub fn is_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    pub fn is_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    pub fn is_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Whether this handle sits on a corner rather than an edge midpoint.
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Nw | Self::Ne | Self::Se | Self::Sw)
    }

    /// Compass tag, e.g. `"nw"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nw => "nw",
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
        }
    }

    /// CSS cursor name shown over this handle.
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw => "nw-resize",
            Self::N => "n-resize",
            Self::Ne => "ne-resize",
            Self::E => "e-resize",
            Self::Se => "se-resize",
            Self::S => "s-resize",
            Self::Sw => "sw-resize",
            Self::W => "w-resize",
        }
    }

    /// Corner of `rect` that must stay fixed on screen while this handle is dragged.
    pub fn anchor_point(self, rect: Rect) -> Point {
        match self {
            Self::Nw => Point::new(rect.x1, rect.y1),
            Self::N | Self::Ne => Point::new(rect.x0, rect.y1),
            Self::E | Self::Se | Self::S => Point::new(rect.x0, rect.y0),
            Self::Sw | Self::W => Point::new(rect.x1, rect.y0),
        }
    }

    /// Where the handle is drawn on the unrotated `rect`.
    pub fn position(self, rect: Rect) -> Point {
        let center = rect.center();
        match self {
            Self::Nw => Point::new(rect.x0, rect.y0),
            Self::N => Point::new(center.x, rect.y0),
            Self::Ne => Point::new(rect.x1, rect.y0),
            Self::E => Point::new(rect.x1, center.y),
            Self::Se => Point::new(rect.x1, rect.y1),
            Self::S => Point::new(center.x, rect.y1),
            Self::Sw => Point::new(rect.x0, rect.y1),
            Self::W => Point::new(rect.x0, center.y),
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeHandle {
    type Err = UnknownHandle;

    /// Accepts the compass tag or its cursor name (`"se"` or `"se-resize"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.strip_suffix("-resize").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|handle| handle.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| UnknownHandle(s.to_string()))
    }
}

/// The operation a gesture performs on every selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "handle")]
pub enum Command {
    Move,
    Resize(ResizeHandle),
    Rotate,
}

/// Translate the baseline by the pointer delta.
pub fn apply_move(original: &Shape, anchor: Point, current: Point) -> Shape {
    let delta = current - anchor;
    let mut moved = original.clone();
    moved.left = original.left + delta.x;
    moved.top = original.top + delta.y;
    moved
}

/// Turn the baseline by the angle the pointer swept around its center.
pub fn apply_rotate(original: &Shape, anchor: Point, current: Point) -> Shape {
    let mut rotated = original.clone();
    rotated.angle = original.angle + affine::angle_between(original.center(), anchor, current);
    rotated
}

/// Resize the baseline from `handle`, working in the shape's own rotated frame.
///
/// An axis whose new size would fall below `min_size` keeps its baseline size
/// and position for this frame. The handle's anchor corner keeps its
/// document-space position.
pub fn apply_resize(
    original: &Shape,
    handle: ResizeHandle,
    anchor: Point,
    current: Point,
    min_size: f64,
) -> Shape {
    let local_anchor = affine::to_local(anchor, original);
    let local_current = affine::to_local(current, original);

    let dx = if handle.is_east() {
        local_current.x - local_anchor.x
    } else if handle.is_west() {
        local_anchor.x - local_current.x
    } else {
        0.0
    };
    let dy = if handle.is_north() {
        local_anchor.y - local_current.y
    } else if handle.is_south() {
        local_current.y - local_anchor.y
    } else {
        0.0
    };

    let mut resized = original.clone();

    let width = original.width + dx;
    if width >= min_size {
        resized.width = width;
        if handle.is_west() {
            resized.left = original.left + dx;
        }
    }

    let height = original.height + dy;
    if height >= min_size {
        resized.height = height;
        if handle.is_north() {
            resized.top = original.top + dy;
        }
    }

    let before = affine::rotate_about_point(
        handle.anchor_point(original.as_rect()),
        original.angle,
        original.center(),
    );
    let after = affine::rotate_about_point(
        handle.anchor_point(resized.as_rect()),
        original.angle,
        resized.center(),
    );
    resized.left -= after.x - before.x;
    resized.top -= after.y - before.y;

    resized
}

/// Dispatch `command` against the baseline.
pub fn apply_command(
    original: &Shape,
    command: Command,
    anchor: Point,
    current: Point,
    min_size: f64,
) -> Shape {
    match command {
        Command::Move => apply_move(original, anchor, current),
        Command::Resize(handle) => apply_resize(original, handle, anchor, current, min_size),
        Command::Rotate => apply_rotate(original, anchor, current),
    }
}
