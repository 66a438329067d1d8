//! Scene assembly for one editor frame.

use crate::node::ViewNode;
use crate::overlay::{OverlayStyle, selection_overlay};
use crate::registry::DriverRegistry;
use kurbo::Affine;
use transfigure_core::editor::Editor;

/// Cursor shown over selected shapes.
pub const SELECTED_CURSOR: &str = "move";

/// Context for building a scene.
pub struct SceneContext<'a> {
    /// The editor to render.
    pub editor: &'a Editor,
    pub registry: &'a DriverRegistry,
    pub overlay: OverlayStyle,
    /// Whether to draw handles around selected shapes.
    pub show_overlay: bool,
}

impl<'a> SceneContext<'a> {
    pub fn new(editor: &'a Editor, registry: &'a DriverRegistry) -> Self {
        Self {
            editor,
            registry,
            overlay: OverlayStyle::from_config(editor.config()),
            show_overlay: true,
        }
    }

    pub fn with_overlay(mut self, overlay: OverlayStyle) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_show_overlay(mut self, show: bool) -> Self {
        self.show_overlay = show;
        self
    }

    /// Build the scene in client coordinates.
    ///
    /// Shapes render in canonical order, selected ones from their working
    /// copy. Overlays are drawn above all shapes.
    pub fn build(&self) -> ViewNode {
        let bus = self.editor.bus();
        let selection = self.editor.selection();

        let mut children: Vec<ViewNode> = self
            .editor
            .display_shapes()
            .map(|shape| {
                let node = self.registry.render(shape, bus);
                if selection.contains(&shape.id) && !node.is_empty() {
                    ViewNode::Group {
                        transform: Affine::IDENTITY,
                        cursor: Some(SELECTED_CURSOR),
                        children: vec![node],
                    }
                } else {
                    node
                }
            })
            .collect();

        if self.show_overlay {
            children.extend(
                self.editor
                    .selected_shapes()
                    .map(|shape| selection_overlay(shape, bus, &self.overlay)),
            );
        }

        ViewNode::Group {
            transform: self.editor.view().transform(),
            cursor: None,
            children,
        }
    }
}

/// Render every shape of `editor` plus the selection overlay.
pub fn render_scene(editor: &Editor, registry: &DriverRegistry) -> ViewNode {
    SceneContext::new(editor, registry).build()
}
