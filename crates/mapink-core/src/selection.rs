//! Vertex selection and drag editing for committed polygons.

use crate::shapes::ShapeId;
use crate::store::GeometryStore;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Non-owning reference to a committed shape vertex targeted for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexRef {
    pub shape: ShapeId,
    pub vertex: usize,
}

/// Drag-to-move editing of committed polygon vertices.
///
/// Only polygon-kind shapes are editable. A drag overwrites the referenced
/// vertex with the pointer position; releasing keeps the mutation and drops
/// the reference.
#[derive(Debug, Clone, Default)]
pub struct EditController {
    active: Option<VertexRef>,
}

impl EditController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The vertex currently targeted for dragging, if any.
    pub fn active(&self) -> Option<VertexRef> {
        self.active
    }

    /// Drop any active reference. Called on pointer release and on every
    /// mode transition.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Hit-test committed polygon vertices, most recently drawn first.
    /// Returns the first vertex within `tolerance` of `point`.
    pub fn hit_test(store: &GeometryStore, point: Point, tolerance: f64) -> Option<VertexRef> {
        let tol_sq = tolerance * tolerance;
        for shape in store.committed().iter().rev() {
            if !shape.kind.is_polygon() {
                continue;
            }
            for (index, vertex) in shape.vertices.iter().enumerate() {
                if point.distance_squared(*vertex) <= tol_sq {
                    return Some(VertexRef {
                        shape: shape.id,
                        vertex: index,
                    });
                }
            }
        }
        None
    }

    /// Pointer-down: acquire a reference, or none on a miss. A miss is a
    /// normal outcome; the gesture then does nothing.
    pub fn pointer_down(&mut self, store: &GeometryStore, point: Point, tolerance: f64) {
        self.active = Self::hit_test(store, point, tolerance);
        match self.active {
            Some(vertex) => log::debug!("editing vertex {} of shape {}", vertex.vertex, vertex.shape),
            None => log::debug!("vertex hit-test miss"),
        }
    }

    /// Pointer-move with the button held: overwrite the referenced vertex
    /// with the pointer position.
    pub fn pointer_move(&mut self, store: &mut GeometryStore, point: Point, button_held: bool) {
        if !button_held {
            return;
        }
        let Some(active) = self.active else {
            return;
        };
        if let Some(shape) = store.get_mut(active.shape) {
            if let Some(vertex) = shape.vertices.get_mut(active.vertex) {
                *vertex = point;
            }
        }
    }

    /// Pointer-up: drop the reference; the mutation is retained.
    pub fn pointer_up(&mut self) {
        self.active = None;
    }
}
