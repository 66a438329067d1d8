//! Shape event bus.
//!
//! Rendered shapes and handles do not interpret pointer input. They forward
//! raw events through a route into this queue, and the editor drains it.

use crate::handles::{HandleRef, PointerTarget};
use crate::input::Modifiers;
use crate::shape::ShapeId;
use kurbo::Point;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Raw event forwarded by a rendered shape or handle, in client coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEvent {
    PointerDown {
        target: PointerTarget,
        client: Point,
        modifiers: Modifiers,
    },
    Click {
        shape_id: ShapeId,
        client: Point,
    },
    ContextMenu {
        shape_id: ShapeId,
        client: Point,
    },
}

/// Receiver of raw shape events.
pub trait EventSink {
    fn emit(&self, event: ShapeEvent);
}

/// Single-threaded event queue. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct ShapeEventBus {
    queue: Rc<RefCell<VecDeque<ShapeEvent>>>,
}

impl ShapeEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<ShapeEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Route for the body of one shape.
    pub fn route(&self, shape_id: impl Into<ShapeId>) -> ShapeEventRoute {
        ShapeEventRoute {
            bus: self.clone(),
            shape_id: shape_id.into(),
        }
    }

    /// Route for one handle of a selected shape.
    pub fn handle_route(&self, handle: HandleRef) -> HandleRoute {
        HandleRoute {
            bus: self.clone(),
            handle,
        }
    }
}

impl EventSink for ShapeEventBus {
    fn emit(&self, event: ShapeEvent) {
        self.queue.borrow_mut().push_back(event);
    }
}

/// Event route handed to a shape driver.
#[derive(Debug, Clone)]
pub struct ShapeEventRoute {
    bus: ShapeEventBus,
    shape_id: ShapeId,
}

impl ShapeEventRoute {
    pub fn shape_id(&self) -> &str {
        &self.shape_id
    }

    pub fn pointer_down(&self, client: Point, modifiers: Modifiers) {
        self.bus.emit(ShapeEvent::PointerDown {
            target: PointerTarget::shape(self.shape_id.clone()),
            client,
            modifiers,
        });
    }

    pub fn click(&self, client: Point) {
        self.bus.emit(ShapeEvent::Click {
            shape_id: self.shape_id.clone(),
            client,
        });
    }

    pub fn context_menu(&self, client: Point) {
        self.bus.emit(ShapeEvent::ContextMenu {
            shape_id: self.shape_id.clone(),
            client,
        });
    }
}

/// Event route attached to a selection handle.
#[derive(Debug, Clone)]
pub struct HandleRoute {
    bus: ShapeEventBus,
    handle: HandleRef,
}

impl HandleRoute {
    pub fn handle(&self) -> &HandleRef {
        &self.handle
    }

    pub fn pointer_down(&self, client: Point, modifiers: Modifiers) {
        self.bus.emit(ShapeEvent::PointerDown {
            target: PointerTarget::Handle(self.handle.clone()),
            client,
            modifiers,
        });
    }
}
