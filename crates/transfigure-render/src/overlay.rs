//! Selection overlay: frame, resize handles and rotate affordance.

use crate::node::{Paint, Route, ViewNode};
use kurbo::{Affine, Point};
use peniko::Color;
use transfigure_core::config::EditorConfig;
use transfigure_core::events::ShapeEventBus;
use transfigure_core::geometry::ResizeHandle;
use transfigure_core::handles::{self, HandleKind, HandleRef};
use transfigure_core::shape::Shape;

/// Colors and sizes of the selection overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub frame_color: Color,
    pub handle_fill: Color,
    pub handle_stroke: Color,
    pub handle_radius: f64,
    /// Distance from the top edge to the rotate affordance center.
    pub rotate_offset: f64,
    pub rotate_radius: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl OverlayStyle {
    /// Sizes taken from the editor config so drawing and hit testing agree.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            frame_color: Color::from_rgba8(244, 104, 96, 255),
            handle_fill: Color::from_rgba8(255, 255, 255, 255),
            handle_stroke: Color::from_rgba8(0, 0, 0, 255),
            handle_radius: config.handle_radius,
            rotate_offset: config.rotate_handle_offset,
            rotate_radius: config.rotate_handle_radius,
        }
    }

    pub fn with_frame_color(mut self, color: Color) -> Self {
        self.frame_color = color;
        self
    }

    /// Length of the stem between the top edge and the rotate affordance.
    pub fn stem_length(&self) -> f64 {
        (self.rotate_offset - self.rotate_radius).max(0.0)
    }
}

/// Overlay for one selected shape, drawn in its rotated frame.
pub fn selection_overlay(shape: &Shape, bus: &ShapeEventBus, style: &OverlayStyle) -> ViewNode {
    let rect = shape.as_rect();
    let handle_paint = Paint::fill(style.handle_fill).with_stroke(style.handle_stroke, 1.0);

    let mut children = Vec::with_capacity(ResizeHandle::ALL.len() + 3);
    children.push(ViewNode::Rect {
        rect,
        transform: Affine::IDENTITY,
        paint: Paint::stroke(style.frame_color, 1.0),
        cursor: None,
        route: None,
    });

    for handle in ResizeHandle::ALL {
        let kind = HandleKind::Resize(handle);
        children.push(ViewNode::Circle {
            center: handle.position(rect),
            radius: style.handle_radius,
            transform: Affine::IDENTITY,
            paint: handle_paint,
            cursor: Some(kind.cursor()),
            route: Some(Route::Handle(bus.handle_route(HandleRef::new(shape.id.clone(), kind)))),
        });
    }

    let rotate_center = handles::rotate_handle_local(rect, style.rotate_offset);
    let stem_top = Point::new(rotate_center.x, rect.y0 - style.stem_length());
    children.push(ViewNode::Line {
        from: stem_top,
        to: Point::new(rotate_center.x, rect.y0),
        transform: Affine::IDENTITY,
        paint: Paint::stroke(style.handle_stroke, 1.0),
    });
    children.push(ViewNode::Circle {
        center: rotate_center,
        radius: style.rotate_radius,
        transform: Affine::IDENTITY,
        paint: handle_paint,
        cursor: Some(HandleKind::Rotate.cursor()),
        route: Some(Route::Handle(
            bus.handle_route(HandleRef::new(shape.id.clone(), HandleKind::Rotate)),
        )),
    });

    ViewNode::Group {
        transform: shape.transform(),
        cursor: None,
        children,
    }
}
