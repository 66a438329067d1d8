//! Shape driver trait and the built-in rectangle driver.

use crate::node::{Paint, Route, ViewNode};
use transfigure_core::events::ShapeEventRoute;
use transfigure_core::shape::{RECT_KIND, Shape};

/// Renders one kind of shape.
///
/// Drivers only draw and forward raw pointer events through the route they
/// are given. They never interpret coordinates or gestures.
pub trait ShapeDriver {
    /// Kind tag this driver is registered under.
    fn kind(&self) -> &str;

    /// Whether this driver can render `shape`.
    fn accepts(&self, shape: &Shape) -> bool {
        shape.kind == self.kind()
    }

    /// Produce the scene node for `shape`.
    fn render(&self, shape: &Shape, route: ShapeEventRoute) -> ViewNode;
}

/// Draws `rect` shapes as a filled, outlined box rotated about its center.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectDriver;

impl ShapeDriver for RectDriver {
    fn kind(&self) -> &str {
        RECT_KIND
    }

    fn render(&self, shape: &Shape, route: ShapeEventRoute) -> ViewNode {
        ViewNode::Rect {
            rect: shape.as_rect(),
            transform: shape.transform(),
            paint: Paint::fill(shape.style.fill())
                .with_stroke(shape.style.stroke(), shape.style.line_width),
            cursor: None,
            route: Some(Route::Shape(route)),
        }
    }
}
