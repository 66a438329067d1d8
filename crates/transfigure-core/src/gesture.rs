//! Pointer gesture state machine.

use crate::config::{EditorConfig, MissingShapePolicy};
use crate::geometry::{self, Command};
use crate::handles::PointerTarget;
use crate::selection::SelectionManager;
use crate::shape::{Shape, ShapeId};
use crate::view::ViewTransform;
use kurbo::Point;
use std::collections::HashSet;

/// A running gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub command: Command,
    /// Pointer position at pointer-down, in client coordinates.
    pub anchor: Point,
}

/// Gesture state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Active(GestureSession),
}

/// Turns pointer down/move/up into staged and committed shape edits.
///
/// The controller holds no shapes itself. Callers pass the canonical shape
/// sequence and the selection on every event.
#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    min_shape_size: f64,
    missing_shape_policy: MissingShapePolicy,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl GestureController {
    pub fn new(min_shape_size: f64, missing_shape_policy: MissingShapePolicy) -> Self {
        Self {
            state: GestureState::Idle,
            min_shape_size,
            missing_shape_policy,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.min_shape_size, config.missing_shape_policy)
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn session(&self) -> Option<&GestureSession> {
        match &self.state {
            GestureState::Active(session) => Some(session),
            GestureState::Idle => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Active(_))
    }

    /// Resolve a pointer-down and open a session when it hit a shape or handle.
    ///
    /// Returns `true` when a session was opened.
    pub fn pointer_down(
        &mut self,
        target: &PointerTarget,
        client: Point,
        shift: bool,
        shapes: &[Shape],
        selection: &mut SelectionManager,
    ) -> bool {
        if let GestureState::Active(session) = &self.state {
            log::warn!(
                "Ignoring pointer-down while a {:?} gesture is active",
                session.command
            );
            return false;
        }

        let command = match target {
            PointerTarget::Canvas => {
                if !selection.is_empty() {
                    log::debug!("Canvas pressed, clearing {} selected shape(s)", selection.len());
                }
                selection.clear();
                return false;
            }
            PointerTarget::Shape { id } => {
                if !selection.contains(id) {
                    let Some(shape) = shapes.iter().find(|shape| &shape.id == id) else {
                        log::warn!("Ignoring pointer-down on unknown shape {}", id);
                        return false;
                    };
                    if shift {
                        selection.append_selection([shape]);
                    } else {
                        selection.set_selection([shape]);
                    }
                }
                Command::Move
            }
            PointerTarget::Handle(handle) => {
                if !selection.contains(&handle.shape_id) {
                    log::warn!(
                        "Ignoring pointer-down on a handle of unselected shape {}",
                        handle.shape_id
                    );
                    return false;
                }
                handle.kind.command()
            }
        };

        log::debug!(
            "Starting {:?} gesture over {} shape(s)",
            command,
            selection.len()
        );
        self.state = GestureState::Active(GestureSession {
            command,
            anchor: client,
        });
        true
    }

    /// Recompute every working copy from its baseline.
    ///
    /// Returns how many entries were restaged. A no-op while idle.
    pub fn pointer_move(
        &mut self,
        client: Point,
        view: &ViewTransform,
        shapes: &[Shape],
        selection: &mut SelectionManager,
    ) -> usize {
        let GestureState::Active(session) = self.state else {
            return 0;
        };
        let anchor = view.to_document(session.anchor);
        let current = view.to_document(client);

        let canonical: HashSet<&str> = shapes.iter().map(|shape| shape.id.as_str()).collect();
        let ids: Vec<ShapeId> = selection.ids().to_vec();
        let mut staged = 0;

        for id in ids {
            if !canonical.contains(id.as_str()) {
                match self.missing_shape_policy {
                    MissingShapePolicy::Skip => {
                        log::warn!("Selected shape {} is gone, skipping it", id);
                        continue;
                    }
                    MissingShapePolicy::Halt => {
                        log::warn!("Selected shape {} is gone, halting this update", id);
                        break;
                    }
                }
            }

            let updated = match selection.get_original(&id) {
                Ok(original) => geometry::apply_command(
                    original,
                    session.command,
                    anchor,
                    current,
                    self.min_shape_size,
                ),
                Err(e) => {
                    log::error!("{}", e);
                    continue;
                }
            };
            if let Err(e) = selection.stage(&id, updated) {
                log::error!("{}", e);
                continue;
            }
            staged += 1;
        }
        staged
    }

    /// Finish the gesture.
    ///
    /// Builds the canonical sequence with every selected shape replaced by its
    /// working copy, hands it to `on_commit`, then rebases the selection.
    /// Returns the committed sequence, or `None` while idle.
    pub fn pointer_up(
        &mut self,
        shapes: &[Shape],
        selection: &mut SelectionManager,
        on_commit: impl FnOnce(&[Shape]),
    ) -> Option<Vec<Shape>> {
        let GestureState::Active(session) = std::mem::take(&mut self.state) else {
            return None;
        };

        let committed: Vec<Shape> = shapes
            .iter()
            .map(|shape| selection.working(&shape.id).unwrap_or(shape).clone())
            .collect();
        on_commit(&committed);
        selection.commit_baseline();

        log::info!(
            "Committed {:?} gesture over {} shape(s)",
            session.command,
            selection.len()
        );
        Some(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ResizeHandle;
    use crate::handles::HandleKind;
    use kurbo::Size;

    const EPS: f64 = 1e-9;

    /// View whose client and document coordinates coincide.
    fn identity_view() -> ViewTransform {
        let mut view = ViewTransform::new(Size::new(500.0, 500.0), 0.0);
        view.set_container_size(500.0, 500.0).unwrap();
        view
    }

    fn shapes() -> Vec<Shape> {
        vec![
            Shape::rect(50.0, 50.0, 100.0, 100.0).with_id("a"),
            Shape::rect(200.0, 200.0, 60.0, 40.0).with_id("b"),
        ]
    }

    #[test]
    fn test_identity_view() {
        let view = identity_view();
        let p = view.to_document(Point::new(12.0, 34.0));
        assert!((p.x - 12.0).abs() < EPS);
        assert!((p.y - 34.0).abs() < EPS);
    }

    #[test]
    fn test_pointer_down_on_shape_selects_and_moves() {
        let shapes = shapes();
        let mut selection = SelectionManager::new();
        let mut gesture = GestureController::default();

        assert!(gesture.pointer_down(&PointerTarget::shape("a"), Point::ZERO, false, &shapes, &mut selection));
        assert_eq!(selection.ids(), ["a".to_string()]);
        assert_eq!(gesture.session().map(|s| s.command), Some(Command::Move));
    }

    #[test]
    fn test_pointer_down_replaces_or_appends() {
        let shapes = shapes();
        let mut selection = SelectionManager::new();
        let mut gesture = GestureController::default();

        gesture.pointer_down(&PointerTarget::shape("a"), Point::ZERO, false, &shapes, &mut selection);
        gesture.pointer_up(&shapes, &mut selection, |_| {});
        gesture.pointer_down(&PointerTarget::shape("b"), Point::ZERO, false, &shapes, &mut selection);
        gesture.pointer_up(&shapes, &mut selection, |_| {});
        assert_eq!(selection.ids(), ["b".to_string()]);

        gesture.pointer_down(&PointerTarget::shape("a"), Point::ZERO, true, &shapes, &mut selection);
        assert_eq!(selection.ids(), ["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_pointer_down_on_selected_keeps_selection() {
        let shapes = shapes();
        let mut selection = SelectionManager::new();
        selection.set_selection(&shapes);
        let mut gesture = GestureController::default();
        gesture.pointer_down(&PointerTarget::shape("b"), Point::ZERO, false, &shapes, &mut selection);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_canvas_clears_selection() {
        let shapes = shapes();
        let mut selection = SelectionManager::new();
        selection.set_selection(&shapes);
        let mut gesture = GestureController::default();
        assert!(!gesture.pointer_down(&PointerTarget::Canvas, Point::ZERO, false, &shapes, &mut selection));
        assert!(selection.is_empty());
        assert!(!gesture.is_active());
    }

    #[test]
    fn test_handle_of_unselected_shape_is_ignored() {
        let shapes = shapes();
        let mut selection = SelectionManager::new();
        let mut gesture = GestureController::default();
        let target = PointerTarget::handle("a", HandleKind::Rotate);
        assert!(!gesture.pointer_down(&target, Point::ZERO, false, &shapes, &mut selection));
        assert!(!gesture.is_active());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_unknown_shape_is_ignored() {
        let shapes = shapes();
        let mut selection = SelectionManager::new();
        let mut gesture = GestureController::default();
        assert!(!gesture.pointer_down(&PointerTarget::shape("zzz"), Point::ZERO, false, &shapes, &mut selection));
        assert!(!gesture.is_active());
    }

    #[test]
    fn test_pointer_down_while_active_is_ignored() {
        let shapes = shapes();
        let mut selection = SelectionManager::new();
        let mut gesture = GestureController::default();
        gesture.pointer_down(&PointerTarget::shape("a"), Point::ZERO, false, &shapes, &mut selection);
        assert!(!gesture.pointer_down(&PointerTarget::Canvas, Point::ZERO, false, &shapes, &mut selection));
        assert_eq!(selection.len(), 1);
        assert_eq!(gesture.session().map(|s| s.command), Some(Command::Move));
    }

    #[test]
    fn test_move_two_shapes() {
        let shapes = shapes();
        let view = identity_view();
        let mut selection = SelectionManager::new();
        selection.set_selection(&shapes);
        let mut gesture = GestureController::default();

        gesture.pointer_down(&PointerTarget::shape("a"), Point::new(100.0, 100.0), false, &shapes, &mut selection);
        assert_eq!(gesture.pointer_move(Point::new(105.0, 105.0), &view, &shapes, &mut selection), 2);
        let committed = gesture.pointer_up(&shapes, &mut selection, |_| {}).unwrap();

        assert!((committed[0].left - 55.0).abs() < EPS);
        assert!((committed[0].top - 55.0).abs() < EPS);
        assert!((committed[1].left - 205.0).abs() < EPS);
        assert!((committed[1].top - 205.0).abs() < EPS);
    }

    #[test]
    fn test_resize_stream_uses_baseline() {
        let shapes = shapes();
        let view = identity_view();
        let mut selection = SelectionManager::new();
        selection.set_selection([&shapes[0]]);
        let mut gesture = GestureController::default();

        let target = PointerTarget::handle("a", HandleKind::Resize(ResizeHandle::W));
        gesture.pointer_down(&target, Point::new(50.0, 100.0), false, &shapes, &mut selection);
        gesture.pointer_move(Point::new(30.0, 100.0), &view, &shapes, &mut selection);
        // This frame would shrink the width to 10 and is rejected.
        gesture.pointer_move(Point::new(140.0, 100.0), &view, &shapes, &mut selection);
        let working = selection.working("a").unwrap();
        assert!((working.width - 100.0).abs() < EPS);
        assert!((working.left - 50.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_gesture() {
        let shapes = vec![Shape::rect(50.0, 50.0, 100.0, 100.0).with_id("a").with_angle(45.0)];
        let view = identity_view();
        let mut selection = SelectionManager::new();
        selection.set_selection(&shapes);
        let mut gesture = GestureController::default();

        let target = PointerTarget::handle("a", HandleKind::Rotate);
        gesture.pointer_down(&target, Point::new(150.0, 100.0), false, &shapes, &mut selection);
        gesture.pointer_move(Point::new(100.0, 150.0), &view, &shapes, &mut selection);
        let committed = gesture.pointer_up(&shapes, &mut selection, |_| {}).unwrap();
        assert!((committed[0].angle - 135.0).abs() < EPS);
    }

    #[test]
    fn test_idle_move_and_up_are_noops() {
        let shapes = shapes();
        let view = identity_view();
        let mut selection = SelectionManager::new();
        let mut gesture = GestureController::default();
        let mut calls = 0;
        assert_eq!(gesture.pointer_move(Point::ZERO, &view, &shapes, &mut selection), 0);
        assert!(gesture.pointer_up(&shapes, &mut selection, |_| calls += 1).is_none());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_commit_fires_once_and_rebases() {
        let shapes = shapes();
        let view = identity_view();
        let mut selection = SelectionManager::new();
        let mut gesture = GestureController::default();
        let mut calls = 0;

        gesture.pointer_down(&PointerTarget::shape("a"), Point::ZERO, false, &shapes, &mut selection);
        gesture.pointer_move(Point::new(10.0, 0.0), &view, &shapes, &mut selection);
        gesture.pointer_move(Point::new(20.0, 0.0), &view, &shapes, &mut selection);
        let committed = gesture
            .pointer_up(&shapes, &mut selection, |changed| {
                calls += 1;
                assert_eq!(changed.len(), 2);
            })
            .unwrap();
        assert_eq!(calls, 1);
        assert!(!gesture.is_active());
        assert!((selection.get_original("a").unwrap().left - 70.0).abs() < EPS);

        // The next gesture starts from the committed geometry.
        gesture.pointer_down(&PointerTarget::shape("a"), Point::ZERO, false, &committed, &mut selection);
        gesture.pointer_move(Point::new(5.0, 0.0), &view, &committed, &mut selection);
        assert!((selection.working("a").unwrap().left - 75.0).abs() < EPS);
    }

    #[test]
    fn test_missing_shape_skip() {
        let shapes = shapes();
        let view = identity_view();
        let mut selection = SelectionManager::new();
        selection.set_selection(&shapes);
        let mut gesture = GestureController::default();
        gesture.pointer_down(&PointerTarget::shape("a"), Point::ZERO, false, &shapes, &mut selection);

        // "a" disappears from the canonical store mid-gesture.
        let remaining = vec![shapes[1].clone()];
        assert_eq!(gesture.pointer_move(Point::new(5.0, 5.0), &view, &remaining, &mut selection), 1);
        assert!((selection.working("b").unwrap().left - 205.0).abs() < EPS);
        assert!((selection.working("a").unwrap().left - 50.0).abs() < EPS);
    }

    #[test]
    fn test_missing_shape_halt() {
        let shapes = shapes();
        let view = identity_view();
        let mut selection = SelectionManager::new();
        selection.set_selection(&shapes);
        let mut gesture = GestureController::new(30.0, MissingShapePolicy::Halt);
        gesture.pointer_down(&PointerTarget::shape("a"), Point::ZERO, false, &shapes, &mut selection);

        let remaining = vec![shapes[1].clone()];
        assert_eq!(gesture.pointer_move(Point::new(5.0, 5.0), &view, &remaining, &mut selection), 0);
        assert!((selection.working("b").unwrap().left - 200.0).abs() < EPS);
    }

    #[test]
    fn test_commit_drops_entries_missing_from_store() {
        let shapes = shapes();
        let view = identity_view();
        let mut selection = SelectionManager::new();
        selection.set_selection(&shapes);
        let mut gesture = GestureController::default();
        gesture.pointer_down(&PointerTarget::shape("a"), Point::ZERO, false, &shapes, &mut selection);
        gesture.pointer_move(Point::new(5.0, 5.0), &view, &shapes, &mut selection);

        let remaining = vec![shapes[1].clone()];
        let committed = gesture.pointer_up(&remaining, &mut selection, |_| {}).unwrap();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].id, "b");
    }
}
