//! Shape definitions for the canvas.

use crate::affine;
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = String;

/// Kind tag rendered by the built-in rectangle driver.
pub const RECT_KIND: &str = "rect";

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties for shapes.
///
/// The transformation engine never reads these; they are carried through
/// every edit untouched and consumed by shape drivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Fill color.
    pub background_color: SerializableColor,
    /// Outline color.
    pub line_color: SerializableColor,
    /// Outline width in document units.
    #[serde(default = "default_line_width")]
    pub line_width: f64,
}

fn default_line_width() -> f64 {
    1.0
}

impl ShapeStyle {
    /// Create a style with the same color for fill and outline.
    pub fn solid(color: SerializableColor) -> Self {
        Self {
            background_color: color,
            line_color: color,
            line_width: default_line_width(),
        }
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Color {
        self.background_color.into()
    }

    /// Get the outline color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.line_color.into()
    }

    pub fn set_fill(&mut self, color: Color) {
        self.background_color = color.into();
    }

    pub fn set_stroke(&mut self, color: Color) {
        self.line_color = color.into();
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            background_color: SerializableColor::white(),
            line_color: SerializableColor::black(),
            line_width: default_line_width(),
        }
    }
}

/// A positioned, sized, rotated rectangle.
///
/// `left/top/width/height` describe the box before rotation. The rotation is
/// applied about the box center at render time and inside geometry math; the
/// stored box is never pre-rotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    /// Kind tag used to pick a driver.
    pub kind: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees about the box center. Never normalized.
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub style: ShapeStyle,
    /// Passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl Shape {
    /// Create a new unrotated shape with a fresh id.
    pub fn new(kind: impl Into<String>, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: kind.into(),
            left,
            top,
            width,
            height,
            angle: 0.0,
            style: ShapeStyle::default(),
            group_id: None,
        }
    }

    /// Create a rectangle shape.
    pub fn rect(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(RECT_KIND, left, top, width, height)
    }

    pub fn with_id(mut self, id: impl Into<ShapeId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the id with a new unique identifier.
    pub fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4().to_string();
    }

    /// The unrotated box.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center of the box, which is also the rotation pivot.
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Transform from the shape's local (unrotated) frame to document space.
    pub fn transform(&self) -> Affine {
        affine::rotation_about(self.angle, self.center())
    }

    /// Corners in document space: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let rect = self.as_rect();
        let transform = self.transform();
        [
            transform * Point::new(rect.x0, rect.y0),
            transform * Point::new(rect.x1, rect.y0),
            transform * Point::new(rect.x1, rect.y1),
            transform * Point::new(rect.x0, rect.y1),
        ]
    }

    /// Axis-aligned bounding box of the rotated shape.
    pub fn bounds(&self) -> Rect {
        let corners = self.corners();
        let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Check if a document-space point hits the rotated box.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let local = affine::to_local(point, self);
        let rect = self.as_rect().inflate(tolerance, tolerance);
        local.x >= rect.x0 && local.x <= rect.x1 && local.y >= rect.y0 && local.y <= rect.y1
    }
}
