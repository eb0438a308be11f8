//! Geometry store: committed shapes plus the single in-progress buffer.

use crate::shapes::{Shape, ShapeDraft, ShapeId};
use serde::{Deserialize, Serialize};

/// Append-only collection of committed shapes with one in-progress slot.
///
/// Commit order is the draw order; ids increase monotonically and are never
/// reused within a session, including across `clear_all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryStore {
    committed: Vec<Shape>,
    in_progress: Option<ShapeDraft>,
    next_id: u64,
}

impl Default for GeometryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            committed: Vec::new(),
            in_progress: None,
            next_id: 1,
        }
    }

    /// Finalize a draft into the committed list, returning its assigned id.
    pub fn commit(&mut self, draft: ShapeDraft) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.committed.push(draft.into_shape(id));
        id
    }

    /// Open the in-progress slot with a new draft, replacing any previous one.
    pub fn begin(&mut self, draft: ShapeDraft) {
        self.in_progress = Some(draft);
    }

    /// The shape currently under construction, if any.
    pub fn in_progress(&self) -> Option<&ShapeDraft> {
        self.in_progress.as_ref()
    }

    pub fn in_progress_mut(&mut self) -> Option<&mut ShapeDraft> {
        self.in_progress.as_mut()
    }

    /// Take the draft out of the in-progress slot.
    pub fn take_in_progress(&mut self) -> Option<ShapeDraft> {
        self.in_progress.take()
    }

    /// Drop the in-progress draft without committing it.
    pub fn discard_in_progress(&mut self) {
        if self.in_progress.take().is_some() {
            log::debug!("discarded in-progress buffer");
        }
    }

    /// Committed shapes in commit order (back to front).
    pub fn committed(&self) -> &[Shape] {
        &self.committed
    }

    /// Look up a committed shape by id.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.committed.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.committed.iter_mut().find(|s| s.id == id)
    }

    /// Empty the committed list and discard the in-progress draft.
    pub fn clear_all(&mut self) {
        self.committed.clear();
        self.in_progress = None;
    }

    /// Number of committed shapes.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Whether no shape has been committed.
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;
    use crate::style::Style;
    use kurbo::Point;

    fn line_draft(points: &[(f64, f64)]) -> ShapeDraft {
        ShapeDraft::from_vertices(
            ShapeKind::Line,
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            Style::default(),
        )
    }

    #[test]
    fn test_store_creation() {
        let store = GeometryStore::new();
        assert!(store.is_empty());
        assert!(store.in_progress().is_none());
    }

    #[test]
    fn test_commit_assigns_monotonic_ids() {
        let mut store = GeometryStore::new();
        let a = store.commit(line_draft(&[(0.0, 0.0), (1.0, 0.0)]));
        let b = store.commit(line_draft(&[(0.0, 0.0), (2.0, 0.0)]));
        assert!(b > a);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(a).unwrap().id, a);
    }

    #[test]
    fn test_ids_survive_discard() {
        let mut store = GeometryStore::new();
        let a = store.commit(line_draft(&[(0.0, 0.0), (1.0, 0.0)]));
        store.begin(line_draft(&[(5.0, 5.0)]));
        store.discard_in_progress();
        let b = store.commit(line_draft(&[(0.0, 0.0), (2.0, 0.0)]));
        assert_eq!(b.0, a.0 + 1);
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut store = GeometryStore::new();
        let a = store.commit(line_draft(&[(0.0, 0.0), (1.0, 0.0)]));
        store.clear_all();
        let b = store.commit(line_draft(&[(0.0, 0.0), (1.0, 0.0)]));
        assert!(b > a);
    }

    #[test]
    fn test_clear_all_empties_everything() {
        let mut store = GeometryStore::new();
        store.commit(line_draft(&[(0.0, 0.0), (1.0, 0.0)]));
        store.begin(line_draft(&[(5.0, 5.0)]));

        store.clear_all();

        assert!(store.is_empty());
        assert!(store.in_progress().is_none());
    }

    #[test]
    fn test_discard_leaves_committed_untouched() {
        let mut store = GeometryStore::new();
        store.commit(line_draft(&[(0.0, 0.0), (1.0, 0.0)]));
        store.begin(line_draft(&[(5.0, 5.0)]));

        store.discard_in_progress();

        assert_eq!(store.len(), 1);
        assert!(store.in_progress().is_none());
    }
}
