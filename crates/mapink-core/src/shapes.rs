//! Shape definitions for the drawing session.

use crate::style::Style;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Unique identifier for a committed shape.
///
/// Assigned by the store at commit time, monotonically increasing within a
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of drawable shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    DashedLine,
    Freehand,
    FreehandDashed,
    Polygon,
}

impl ShapeKind {
    /// Whether the kind renders with a dash pattern.
    pub fn is_dashed(self) -> bool {
        matches!(self, ShapeKind::DashedLine | ShapeKind::FreehandDashed)
    }

    /// Whether the kind is captured by press-drag-release.
    pub fn is_freehand(self) -> bool {
        matches!(self, ShapeKind::Freehand | ShapeKind::FreehandDashed)
    }

    /// Whether the kind is implicitly closed (last vertex connects to first).
    pub fn is_polygon(self) -> bool {
        matches!(self, ShapeKind::Polygon)
    }

    /// Minimum vertex count required to commit a shape of this kind.
    pub fn min_vertices(self) -> usize {
        if self.is_polygon() { 3 } else { 2 }
    }
}

/// A shape under construction, not yet committed.
///
/// Carries no id; ids exist only once the store assigns one at commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeDraft {
    pub kind: ShapeKind,
    /// Ordered vertices captured so far.
    pub vertices: Vec<Point>,
    pub style: Style,
}

impl ShapeDraft {
    /// Start a draft from its first captured vertex.
    pub fn new(kind: ShapeKind, first: Point, style: Style) -> Self {
        Self {
            kind,
            vertices: vec![first],
            style,
        }
    }

    /// Build a draft from an existing vertex sequence (used by import).
    pub fn from_vertices(kind: ShapeKind, vertices: Vec<Point>, style: Style) -> Self {
        Self {
            kind,
            vertices,
            style,
        }
    }

    /// Number of captured vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether no vertex has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub(crate) fn into_shape(self, id: ShapeId) -> Shape {
        Shape {
            id,
            kind: self.kind,
            vertices: self.vertices,
            style: self.style,
        }
    }
}

/// One committed drawing.
///
/// Invariants: `vertices` is never empty, and a polygon's vertex sequence is
/// implicitly closed without repeating the first vertex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Ordered vertices; `x` is longitude, `y` is latitude.
    pub vertices: Vec<Point>,
    pub style: Style,
}

impl Shape {
    /// Bounding box over all vertices.
    pub fn bounds(&self) -> Rect {
        let (min_x, max_x) = self
            .vertices
            .iter()
            .fold((f64::MAX, f64::MIN), |(mn, mx), p| (mn.min(p.x), mx.max(p.x)));
        let (min_y, max_y) = self
            .vertices
            .iter()
            .fold((f64::MAX, f64::MIN), |(mn, mx), p| (mn.min(p.y), mx.max(p.y)));
        Rect::new(min_x, min_y, max_x, max_y)
    }
}
