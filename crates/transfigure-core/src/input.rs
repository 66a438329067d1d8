//! Input events consumed by the editor.

use crate::handles::PointerTarget;
use crate::shape::Shape;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

/// A host input, in client coordinates.
///
/// `PointerMove` and `PointerUp` carry no target: they are observed for the
/// whole window while a gesture runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum InputEvent {
    PointerDown {
        target: PointerTarget,
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    /// Pointer-down whose target is resolved by hit testing.
    PointerPress {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    ContainerResize {
        width: f64,
        height: f64,
    },
    ZoomChanged {
        percent: f64,
    },
    ArmTemplate {
        template: Shape,
    },
    CanvasClick {
        x: f64,
        y: f64,
    },
}

impl InputEvent {
    /// Client position carried by the event, if any.
    pub fn client_point(&self) -> Option<Point> {
        match self {
            InputEvent::PointerDown { x, y, .. }
            | InputEvent::PointerPress { x, y, .. }
            | InputEvent::PointerMove { x, y }
            | InputEvent::CanvasClick { x, y } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        let events: Vec<InputEvent> = serde_json::from_str(
            r#"[
                {"event":"pointer_down","target":{"type":"shape","id":"a"},"x":1,"y":2},
                {"event":"pointer_move","x":3,"y":4},
                {"event":"pointer_up"},
                {"event":"zoom_changed","percent":150},
                {"event":"pointer_press","x":5,"y":6,"shift":true}
            ]"#,
        )
        .unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(
            events[0],
            InputEvent::PointerDown {
                target: PointerTarget::shape("a"),
                x: 1.0,
                y: 2.0,
                shift: false,
            }
        );
        assert_eq!(events[1].client_point(), Some(Point::new(3.0, 4.0)));
        assert_eq!(events[2], InputEvent::PointerUp);
        assert_eq!(events[3].client_point(), None);
        assert_eq!(
            events[4],
            InputEvent::PointerPress {
                x: 5.0,
                y: 6.0,
                shift: true,
            }
        );
    }

    #[test]
    fn test_modifiers() {
        assert!(Modifiers::shift().shift);
        assert!(!Modifiers::default().shift);
    }
}
