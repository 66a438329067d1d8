//! Editor: the interaction root for one canvas.

use crate::appender::Appender;
use crate::config::EditorConfig;
use crate::events::{ShapeEvent, ShapeEventBus};
use crate::gesture::{GestureController, GestureState};
use crate::handles::{self, PointerTarget};
use crate::input::InputEvent;
use crate::selection::SelectionManager;
use crate::shape::{Shape, ShapeId};
use crate::view::{ViewError, ViewTransform};
use kurbo::Point;
use std::fmt;

/// Callback receiving a full replacement of the canonical shape sequence.
pub type ChangeCallback = Box<dyn FnMut(&[Shape])>;

/// Owns the selection, view, gesture and placement state for one canvas.
///
/// The editor keeps a copy of the canonical shapes. Every commit it proposes
/// is handed to the `on_changed` callback and adopted locally; hosts that
/// own the store can push their own version back with [`Editor::set_shapes`].
pub struct Editor {
    config: EditorConfig,
    shapes: Vec<Shape>,
    selection: SelectionManager,
    view: ViewTransform,
    gesture: GestureController,
    appender: Appender,
    bus: ShapeEventBus,
    on_changed: Option<ChangeCallback>,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("shapes", &self.shapes.len())
            .field("selection", &self.selection.ids())
            .field("view", &self.view)
            .field("gesture", &self.gesture.state())
            .field("armed", &self.appender.is_armed())
            .finish()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an empty editor.
    ///
    /// An invalid config is logged and used as given; callers that load
    /// config from outside should go through [`EditorConfig::from_json`].
    pub fn new(config: EditorConfig) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Editor created with an invalid config: {}", e);
        }
        Self {
            view: ViewTransform::from_config(&config),
            gesture: GestureController::from_config(&config),
            config,
            shapes: Vec::new(),
            selection: SelectionManager::new(),
            appender: Appender::new(),
            bus: ShapeEventBus::new(),
            on_changed: None,
        }
    }

    pub fn with_shapes(mut self, shapes: Vec<Shape>) -> Self {
        self.shapes = shapes;
        self
    }

    /// Register the callback fired once per commit and once per placement.
    pub fn on_changed(&mut self, callback: impl FnMut(&[Shape]) + 'static) {
        self.on_changed = Some(Box::new(callback));
    }

    /// Replace the canonical shapes.
    ///
    /// Selected shapes that disappeared are deselected and the rest are
    /// rebased on their new canonical values. During a gesture the staged
    /// edits are dropped and the next pointer-move restages from the new
    /// baseline.
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;

        if self.gesture.is_active() {
            log::warn!("Shapes replaced during a gesture, rebasing staged edits");
        }

        let selected: Vec<ShapeId> = self.selection.ids().to_vec();
        for id in selected {
            match self.shapes.iter().find(|shape| shape.id == id) {
                Some(shape) => {
                    if let Err(e) = self.selection.stage(&id, shape.clone()) {
                        log::error!("{}", e);
                    }
                }
                None => {
                    log::debug!("Deselecting removed shape {}", id);
                    self.selection.remove(&id);
                }
            }
        }
        self.selection.commit_baseline();
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_active()
    }

    /// Whether the host should capture pointer move/up outside the canvas.
    pub fn wants_global_pointer(&self) -> bool {
        self.gesture.is_active()
    }

    /// The event bus shape drivers forward raw events into.
    pub fn bus(&self) -> &ShapeEventBus {
        &self.bus
    }

    pub fn pointer_down(&mut self, target: &PointerTarget, client: Point, shift: bool) -> bool {
        self.gesture
            .pointer_down(target, client, shift, &self.shapes, &mut self.selection)
    }

    /// Returns how many working copies were restaged.
    pub fn pointer_move(&mut self, client: Point) -> usize {
        self.gesture
            .pointer_move(client, &self.view, &self.shapes, &mut self.selection)
    }

    /// Commit the running gesture. Returns `true` when something was committed.
    pub fn pointer_up(&mut self) -> bool {
        let Self {
            gesture,
            shapes,
            selection,
            on_changed,
            ..
        } = self;
        let committed = gesture.pointer_up(shapes, selection, |changed| {
            if let Some(callback) = on_changed.as_mut() {
                callback(changed);
            }
        });
        match committed {
            Some(committed) => {
                *shapes = committed;
                true
            }
            None => false,
        }
    }

    pub fn container_resize(&mut self, width: f64, height: f64) -> Result<(), ViewError> {
        self.view.set_container_size(width, height)
    }

    /// Apply a host zoom percentage. The previous zoom is kept on error.
    pub fn zoom_changed(&mut self, percent: f64) -> Result<(), ViewError> {
        self.view.set_zoom_percent(percent)
    }

    pub fn arm_template(&mut self, template: Shape) {
        self.appender.arm(template);
    }

    pub fn disarm_template(&mut self) -> Option<Shape> {
        self.appender.disarm()
    }

    pub fn appender(&self) -> &Appender {
        &self.appender
    }

    /// Place the armed template at a client point.
    ///
    /// Returns the new shape's id, or `None` when nothing was armed.
    pub fn canvas_click(&mut self, client: Point) -> Option<ShapeId> {
        let shape = self.appender.place(client, &self.view)?;
        let id = shape.id.clone();
        log::info!(
            "Placed {} {} at ({:.1}, {:.1})",
            shape.kind,
            id,
            shape.left,
            shape.top
        );
        self.shapes.push(shape);
        self.notify();
        Some(id)
    }

    /// Select shapes by id, in the given order. Unknown ids are ignored.
    ///
    /// Ignored while a gesture is active. Returns `true` when the selection
    /// was replaced.
    pub fn select(&mut self, ids: &[ShapeId]) -> bool {
        if self.gesture.is_active() {
            log::warn!("Ignoring selection change while a gesture is active");
            return false;
        }
        let shapes = &self.shapes;
        self.selection.set_selection(
            ids.iter()
                .filter_map(|id| shapes.iter().find(|shape| &shape.id == id)),
        );
        true
    }

    /// Working copies of the selected shapes, in selection order.
    pub fn selected_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.selection.working_shapes()
    }

    /// Canonical shapes in order, with working copies for selected shapes.
    pub fn display_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .map(|shape| self.selection.working(&shape.id).unwrap_or(shape))
    }

    /// Feed queued shape events into the gesture controller.
    ///
    /// Returns how many events were drained.
    pub fn dispatch_events(&mut self) -> usize {
        let events = self.bus.drain();
        let count = events.len();
        for event in events {
            match event {
                ShapeEvent::PointerDown {
                    target,
                    client,
                    modifiers,
                } => {
                    self.pointer_down(&target, client, modifiers.shift);
                }
                ShapeEvent::Click { shape_id, .. } => {
                    log::debug!("Click on {} consumed", shape_id);
                }
                ShapeEvent::ContextMenu { shape_id, .. } => {
                    log::debug!("Context menu on {} consumed", shape_id);
                }
            }
        }
        count
    }

    /// Apply one host input.
    pub fn handle(&mut self, event: InputEvent) -> Result<(), ViewError> {
        match event {
            InputEvent::PointerDown {
                target,
                x,
                y,
                shift,
            } => {
                self.pointer_down(&target, Point::new(x, y), shift);
            }
            InputEvent::PointerPress { x, y, shift } => {
                let client = Point::new(x, y);
                let target = self.hit_test(client);
                self.pointer_down(&target, client, shift);
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer_move(Point::new(x, y));
            }
            InputEvent::PointerUp => {
                self.pointer_up();
            }
            InputEvent::ContainerResize { width, height } => {
                self.container_resize(width, height)?;
            }
            InputEvent::ZoomChanged { percent } => {
                self.zoom_changed(percent)?;
            }
            InputEvent::ArmTemplate { template } => {
                self.arm_template(template);
            }
            InputEvent::CanvasClick { x, y } => {
                self.canvas_click(Point::new(x, y));
            }
        }
        Ok(())
    }

    /// Resolve a client point to a handle of a selected shape, the topmost
    /// shape body, or the canvas.
    pub fn hit_test(&self, client: Point) -> PointerTarget {
        let point = self.view.to_document(client);

        for shape in self.selection.working_shapes() {
            if let Some(kind) = handles::hit_test_handles(shape, point, &self.config) {
                return PointerTarget::handle(shape.id.clone(), kind);
            }
        }

        let displayed: Vec<&Shape> = self.display_shapes().collect();
        displayed
            .into_iter()
            .rev()
            .find(|shape| shape.hit_test(point, 0.0))
            .map(|shape| PointerTarget::shape(shape.id.clone()))
            .unwrap_or(PointerTarget::Canvas)
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_changed.as_mut() {
            callback(&self.shapes);
        }
    }
}
