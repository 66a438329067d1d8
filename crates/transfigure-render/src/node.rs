//! Backend-neutral scene nodes.

use kurbo::{Affine, Point, Rect};
use peniko::Color;
use transfigure_core::events::{HandleRoute, ShapeEventRoute};

/// Fill and outline of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            stroke_width: 0.0,
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            stroke_width: width,
        }
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }
}

/// Where a node forwards its raw pointer events.
#[derive(Debug, Clone)]
pub enum Route {
    Shape(ShapeEventRoute),
    Handle(HandleRoute),
}

/// A node of the rendered scene.
///
/// Geometry is given in the node's local frame; `transform` maps it to the
/// parent frame.
#[derive(Debug, Clone, Default)]
pub enum ViewNode {
    /// Nothing to draw.
    #[default]
    Empty,
    Rect {
        rect: Rect,
        transform: Affine,
        paint: Paint,
        cursor: Option<&'static str>,
        route: Option<Route>,
    },
    Circle {
        center: Point,
        radius: f64,
        transform: Affine,
        paint: Paint,
        cursor: Option<&'static str>,
        route: Option<Route>,
    },
    Line {
        from: Point,
        to: Point,
        transform: Affine,
        paint: Paint,
    },
    Group {
        transform: Affine,
        cursor: Option<&'static str>,
        children: Vec<ViewNode>,
    },
}

impl ViewNode {
    /// Group `children` without a transform.
    pub fn group(children: Vec<ViewNode>) -> Self {
        ViewNode::Group {
            transform: Affine::IDENTITY,
            cursor: None,
            children,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ViewNode::Empty)
    }

    pub fn children(&self) -> &[ViewNode] {
        match self {
            ViewNode::Group { children, .. } => children,
            _ => &[],
        }
    }

    pub fn cursor(&self) -> Option<&'static str> {
        match self {
            ViewNode::Rect { cursor, .. }
            | ViewNode::Circle { cursor, .. }
            | ViewNode::Group { cursor, .. } => *cursor,
            _ => None,
        }
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            ViewNode::Rect { route, .. } | ViewNode::Circle { route, .. } => route.as_ref(),
            _ => None,
        }
    }

    /// Visit this node and every descendant, depth first.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a ViewNode)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }

    /// Number of non-empty drawable nodes, groups excluded.
    pub fn drawable_count(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |node| {
            if !matches!(node, ViewNode::Empty | ViewNode::Group { .. }) {
                count += 1;
            }
        });
        count
    }
}
