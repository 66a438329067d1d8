//! Client to document coordinate mapping.

use crate::config::EditorConfig;
use kurbo::{Affine, Point, Size, Vec2};
use thiserror::Error;

/// Zoom percentage that maps one document unit to one client pixel.
pub const DEFAULT_ZOOM_PERCENT: f64 = 100.0;

/// Margin used when the container cannot center the document.
pub const DEFAULT_MARGIN: f64 = 100.0;

/// Zoom range hosts are expected to clamp their input to.
pub const ZOOM_RANGE_PERCENT: (f64, f64) = (20.0, 200.0);

/// Errors raised by view updates. The previous state is kept on error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewError {
    #[error("Invalid zoom: {0}% (expected a positive finite percentage)")]
    InvalidZoom(f64),
    #[error("Invalid container size: {width}x{height}")]
    InvalidContainerSize { width: f64, height: f64 },
}

/// Clamp a zoom percentage into `range`. NaN passes through unchanged.
pub fn clamp_zoom_percent(percent: f64, range: (f64, f64)) -> f64 {
    let (min, max) = range;
    if percent < min {
        min
    } else if percent > max {
        max
    } else {
        percent
    }
}

/// Zoom and centering of the document inside its container.
///
/// The document origin offset is recomputed whenever the container size or
/// the zoom changes. When the container is wider (or taller) than the scaled
/// document plus the default margin the spare space is split evenly,
/// otherwise the default margin is used.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    origin_offset: Vec2,
    container_size: Size,
    document_size: Size,
    default_margin: f64,
}

impl ViewTransform {
    /// Create a view at 100% zoom with an empty container.
    pub fn new(document_size: Size, default_margin: f64) -> Self {
        let mut view = Self {
            zoom: DEFAULT_ZOOM_PERCENT / 100.0,
            origin_offset: Vec2::ZERO,
            container_size: Size::ZERO,
            document_size,
            default_margin,
        };
        view.recompute();
        view
    }

    /// Create a view from editor configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        let mut view = Self::new(config.document_size, config.default_margin);
        if let Err(e) = view.set_zoom_percent(config.default_zoom_percent) {
            log::warn!("Ignoring configured default zoom: {}", e);
        }
        view
    }

    /// Current zoom factor (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_percent(&self) -> f64 {
        self.zoom * 100.0
    }

    pub fn origin_offset(&self) -> Vec2 {
        self.origin_offset
    }

    pub fn container_size(&self) -> Size {
        self.container_size
    }

    pub fn document_size(&self) -> Size {
        self.document_size
    }

    /// Document size multiplied by the zoom factor.
    pub fn scaled_document_size(&self) -> Size {
        self.document_size * self.zoom
    }

    /// Update the container size and recompute the offset.
    pub fn set_container_size(&mut self, width: f64, height: f64) -> Result<(), ViewError> {
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(ViewError::InvalidContainerSize { width, height });
        }
        self.container_size = Size::new(width, height);
        self.recompute();
        Ok(())
    }

    /// Update the zoom from a percentage and recompute the offset.
    pub fn set_zoom_percent(&mut self, percent: f64) -> Result<(), ViewError> {
        if !(percent.is_finite() && percent > 0.0) {
            return Err(ViewError::InvalidZoom(percent));
        }
        self.zoom = percent / 100.0;
        self.recompute();
        Ok(())
    }

    fn axis_margin(&self, container: f64, document: f64) -> f64 {
        if container > document + self.default_margin {
            container - document
        } else {
            self.default_margin
        }
    }

    fn recompute(&mut self) {
        let scaled = self.scaled_document_size();
        let margin_x = self.axis_margin(self.container_size.width, scaled.width);
        let margin_y = self.axis_margin(self.container_size.height, scaled.height);
        self.origin_offset = Vec2::new(-margin_x / 2.0, -margin_y / 2.0);
    }

    /// Transform from document to client coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin_offset) * Affine::scale(self.zoom)
    }

    /// Transform from client to document coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.origin_offset)
    }

    /// Convert a client point to document coordinates.
    pub fn to_document(&self, client: Point) -> Point {
        self.inverse_transform() * client
    }

    /// Convert a document point to client coordinates.
    pub fn to_client(&self, document: Point) -> Point {
        self.transform() * document
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}
