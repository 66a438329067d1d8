//! Placement of new shapes from an armed template.

use crate::shape::Shape;
use crate::view::ViewTransform;
use kurbo::Point;

/// Holds the template the next canvas click will place.
#[derive(Debug, Clone, Default)]
pub struct Appender {
    pending: Option<Shape>,
}

impl Appender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a template, replacing any pending one.
    pub fn arm(&mut self, template: Shape) {
        log::debug!("Armed {} template", template.kind);
        self.pending = Some(template);
    }

    /// Drop the pending template, returning it.
    pub fn disarm(&mut self) -> Option<Shape> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&Shape> {
        self.pending.as_ref()
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Place the pending template at a client point and disarm.
    ///
    /// Returns `None` when nothing is armed.
    pub fn place(&mut self, client: Point, view: &ViewTransform) -> Option<Shape> {
        let template = self.pending.take()?;
        Some(instantiate(&template, view.to_document(client)))
    }
}

/// Copy `template` to a document position under a fresh id.
pub fn instantiate(template: &Shape, at: Point) -> Shape {
    let mut shape = template.clone();
    shape.left = at.x;
    shape.top = at.y;
    shape.regenerate_id();
    shape
}
