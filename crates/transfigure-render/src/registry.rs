//! Driver lookup by shape kind.

use crate::driver::{RectDriver, ShapeDriver};
use crate::node::ViewNode;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use transfigure_core::events::ShapeEventBus;
use transfigure_core::shape::Shape;

/// Registry errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("A driver for kind {0:?} is already registered")]
    DuplicateKind(String),
}

/// Shape drivers keyed by kind. At most one driver per kind.
#[derive(Default)]
pub struct DriverRegistry {
    drivers: HashMap<String, Box<dyn ShapeDriver>>,
}

impl fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds = self.kinds();
        kinds.sort_unstable();
        f.debug_struct("DriverRegistry").field("kinds", &kinds).finish()
    }
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in drivers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(RectDriver);
        registry
    }

    /// Register a driver, returning the one it replaced.
    pub fn register<D: ShapeDriver + 'static>(&mut self, driver: D) -> Option<Box<dyn ShapeDriver>> {
        let kind = driver.kind().to_string();
        let replaced = self.drivers.insert(kind.clone(), Box::new(driver));
        if replaced.is_some() {
            log::debug!("Replaced driver for kind {}", kind);
        }
        replaced
    }

    /// Register a driver unless its kind is taken.
    pub fn try_register<D: ShapeDriver + 'static>(&mut self, driver: D) -> Result<(), RegistryError> {
        if self.drivers.contains_key(driver.kind()) {
            return Err(RegistryError::DuplicateKind(driver.kind().to_string()));
        }
        self.register(driver);
        Ok(())
    }

    /// Driver that accepts `shape`, if any.
    pub fn driver_for(&self, shape: &Shape) -> Option<&dyn ShapeDriver> {
        self.drivers
            .get(&shape.kind)
            .map(|driver| &**driver)
            .filter(|driver| driver.accepts(shape))
    }

    /// Render `shape`, or `ViewNode::Empty` when no driver accepts it.
    pub fn render(&self, shape: &Shape, bus: &ShapeEventBus) -> ViewNode {
        match self.driver_for(shape) {
            Some(driver) => driver.render(shape, bus.route(shape.id.clone())),
            None => {
                log::trace!("No driver for kind {}, skipping {}", shape.kind, shape.id);
                ViewNode::Empty
            }
        }
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.drivers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Paint;
    use kurbo::{Affine, Point};
    use peniko::Color;
    use transfigure_core::events::ShapeEventRoute;

    /// Draws every shape as a dot; used to check replacement.
    struct DotDriver {
        kind: &'static str,
        radius: f64,
    }

    impl ShapeDriver for DotDriver {
        fn kind(&self) -> &str {
            self.kind
        }

        fn render(&self, shape: &Shape, _route: ShapeEventRoute) -> ViewNode {
            ViewNode::Circle {
                center: shape.center(),
                radius: self.radius,
                transform: Affine::IDENTITY,
                paint: Paint::fill(Color::from_rgba8(0, 0, 0, 255)),
                cursor: None,
                route: None,
            }
        }
    }

    /// Accepts nothing, even for its own kind.
    struct PickyDriver;

    impl ShapeDriver for PickyDriver {
        fn kind(&self) -> &str {
            "picky"
        }

        fn accepts(&self, _shape: &Shape) -> bool {
            false
        }

        fn render(&self, _shape: &Shape, _route: ShapeEventRoute) -> ViewNode {
            ViewNode::Empty
        }
    }

    #[test]
    fn test_unknown_kind_renders_empty() {
        let registry = DriverRegistry::with_defaults();
        let bus = ShapeEventBus::new();
        let node = registry.render(&Shape::new("hexagon", 0.0, 0.0, 10.0, 10.0), &bus);
        assert!(node.is_empty());
    }

    #[test]
    fn test_default_rect_driver() {
        let registry = DriverRegistry::with_defaults();
        let bus = ShapeEventBus::new();
        assert_eq!(registry.len(), 1);
        let node = registry.render(&Shape::rect(0.0, 0.0, 10.0, 10.0), &bus);
        assert!(matches!(node, ViewNode::Rect { .. }));
    }

    #[test]
    fn test_register_replaces_same_kind() {
        let mut registry = DriverRegistry::new();
        assert!(registry.register(DotDriver { kind: "dot", radius: 1.0 }).is_none());
        assert!(registry.register(DotDriver { kind: "dot", radius: 7.0 }).is_some());
        assert_eq!(registry.len(), 1);

        let bus = ShapeEventBus::new();
        match registry.render(&Shape::new("dot", 0.0, 0.0, 10.0, 10.0), &bus) {
            ViewNode::Circle { radius, center, .. } => {
                assert!((radius - 7.0).abs() < f64::EPSILON);
                assert_eq!(center, Point::new(5.0, 5.0));
            }
            other => panic!("unexpected node: {:?}", other),
        }
    }

    #[test]
    fn test_try_register_rejects_duplicates() {
        let mut registry = DriverRegistry::with_defaults();
        assert_eq!(
            registry.try_register(RectDriver),
            Err(RegistryError::DuplicateKind("rect".to_string()))
        );
        assert!(registry.try_register(DotDriver { kind: "dot", radius: 1.0 }).is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_accepts_is_checked() {
        let mut registry = DriverRegistry::new();
        registry.register(PickyDriver);
        let shape = Shape::new("picky", 0.0, 0.0, 10.0, 10.0);
        assert!(registry.driver_for(&shape).is_none());
        assert!(registry.render(&shape, &ShapeEventBus::new()).is_empty());
    }
}
