//! Selection snapshots.
//!
//! Each selected shape is held twice: a frozen `original` used as the gesture
//! baseline and a live `working` copy that pointer-moves restage. Both are
//! deep copies, never references into the canonical store.

use crate::shape::{Shape, ShapeId};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by selection lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Shape not in selection: {0}")]
    NotFound(ShapeId),
}

/// Result type for selection operations.
pub type SelectionResult<T> = Result<T, SelectionError>;

/// One selected shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEntry {
    pub id: ShapeId,
    /// Live geometry shown while a gesture runs.
    pub working: Shape,
    /// Baseline the current gesture computes from.
    pub original: Shape,
}

impl SelectionEntry {
    fn new(shape: &Shape) -> Self {
        Self {
            id: shape.id.clone(),
            working: shape.clone(),
            original: shape.clone(),
        }
    }
}

/// Selected shapes keyed by id, in selection order.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    entries: HashMap<ShapeId, SelectionEntry>,
    order: Vec<ShapeId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Replace the selection with copies of `shapes`.
    pub fn set_selection<'a>(&mut self, shapes: impl IntoIterator<Item = &'a Shape>) {
        self.clear();
        self.append_selection(shapes);
    }

    /// Add copies of the shapes whose ids are not selected yet. Returns how
    /// many were added.
    pub fn append_selection<'a>(&mut self, shapes: impl IntoIterator<Item = &'a Shape>) -> usize {
        let mut added = 0;
        for shape in shapes {
            if self.entries.contains_key(&shape.id) {
                continue;
            }
            self.order.push(shape.id.clone());
            self.entries.insert(shape.id.clone(), SelectionEntry::new(shape));
            added += 1;
        }
        added
    }

    /// Make every working copy the new baseline.
    pub fn commit_baseline(&mut self) {
        for entry in self.entries.values_mut() {
            entry.original = entry.working.clone();
        }
    }

    /// Throw away staged edits and return every working copy to its baseline.
    pub fn rollback(&mut self) {
        for entry in self.entries.values_mut() {
            entry.working = entry.original.clone();
        }
    }

    /// Baseline of a selected shape.
    pub fn get_original(&self, id: &str) -> SelectionResult<&Shape> {
        self.entries
            .get(id)
            .map(|entry| &entry.original)
            .ok_or_else(|| SelectionError::NotFound(id.to_string()))
    }

    /// Live copy of a selected shape.
    pub fn working(&self, id: &str) -> Option<&Shape> {
        self.entries.get(id).map(|entry| &entry.working)
    }

    /// Replace the working copy of a selected shape.
    pub fn stage(&mut self, id: &str, shape: Shape) -> SelectionResult<()> {
        match self.entries.get_mut(id) {
            Some(entry) => {
                entry.working = shape;
                Ok(())
            }
            None => Err(SelectionError::NotFound(id.to_string())),
        }
    }

    /// Remove one entry.
    pub fn remove(&mut self, id: &str) -> Option<SelectionEntry> {
        let entry = self.entries.remove(id)?;
        self.order.retain(|selected| selected != id);
        Some(entry)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[ShapeId] {
        &self.order
    }

    /// Entries in selection order.
    pub fn entries(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Working copies in selection order.
    pub fn working_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.entries().map(|entry| &entry.working)
    }
}
