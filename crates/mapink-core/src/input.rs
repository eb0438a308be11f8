//! Drawing modes and the pointer-input state machine.

use crate::shapes::{ShapeDraft, ShapeId, ShapeKind};
use crate::store::GeometryStore;
use crate::style::StyleState;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// The closed set of input modes selectable by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawMode {
    Line,
    DashedLine,
    Freehand,
    FreehandDashed,
    Polygon,
    Select,
}

impl DrawMode {
    /// Shape kind produced by this mode; `None` for `Select`.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            DrawMode::Line => Some(ShapeKind::Line),
            DrawMode::DashedLine => Some(ShapeKind::DashedLine),
            DrawMode::Freehand => Some(ShapeKind::Freehand),
            DrawMode::FreehandDashed => Some(ShapeKind::FreehandDashed),
            DrawMode::Polygon => Some(ShapeKind::Polygon),
            DrawMode::Select => None,
        }
    }

    fn machine_state(self) -> MachineState {
        match self.shape_kind() {
            Some(kind) => MachineState::Drawing(kind),
            None => MachineState::Editing,
        }
    }
}

/// Machine state derived from the selected mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineState {
    /// No mode selected; all pointer events are no-ops.
    Idle,
    /// A drawing mode is active; pointer events mutate the buffer.
    Drawing(ShapeKind),
    /// Select mode; pointer events hit-test and drag committed vertices.
    Editing,
}

/// Per-mode finite state machine translating pointer events into buffer
/// mutations and commit decisions.
///
/// Invalid input never raises an error: a commit attempt with too few
/// vertices leaves the buffer open, events with no mode selected are
/// ignored, and an underfilled freehand capture is dropped on release.
#[derive(Debug, Clone)]
pub struct InputMachine {
    state: MachineState,
    /// Minimum spacing between consecutive freehand vertices, in the same
    /// units as incoming coordinates.
    min_spacing: f64,
}

impl InputMachine {
    pub fn new(min_spacing: f64) -> Self {
        Self {
            state: MachineState::Idle,
            min_spacing,
        }
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    /// Apply a mode change. Any uncommitted buffer is discarded; there is no
    /// partial commit.
    pub fn set_mode(&mut self, mode: Option<DrawMode>, store: &mut GeometryStore) {
        store.discard_in_progress();
        self.state = match mode {
            Some(mode) => mode.machine_state(),
            None => MachineState::Idle,
        };
        log::debug!("input machine now {:?}", self.state);
    }

    /// Pointer-down in a drawing mode: open the buffer on the first press,
    /// append a vertex afterwards. Click-to-place and freehand kinds behave
    /// identically here; they diverge on move and release.
    pub fn pointer_down(&mut self, point: Point, store: &mut GeometryStore, style: &StyleState) {
        let MachineState::Drawing(kind) = self.state else {
            log::debug!("pointer-down with no drawing mode selected, ignoring");
            return;
        };
        match store.in_progress_mut() {
            Some(draft) => draft.vertices.push(point),
            None => store.begin(ShapeDraft::new(kind, point, style.style_for(kind))),
        }
    }

    /// Pointer-move: extends a freehand capture while the button is held.
    /// A vertex is recorded only when it moves more than the minimum spacing
    /// from the last one, so degenerate zero-length segments never appear.
    pub fn pointer_move(&mut self, point: Point, button_held: bool, store: &mut GeometryStore) {
        let MachineState::Drawing(kind) = self.state else {
            return;
        };
        if !kind.is_freehand() || !button_held {
            return;
        }
        let Some(draft) = store.in_progress_mut() else {
            return;
        };
        if let Some(last) = draft.vertices.last() {
            if point.distance(*last) <= self.min_spacing {
                return;
            }
        }
        draft.vertices.push(point);
    }

    /// Pointer-up: commits a freehand capture of at least two vertices, or
    /// silently drops it. Click-to-place buffers are unaffected.
    pub fn pointer_up(&mut self, store: &mut GeometryStore) -> Option<ShapeId> {
        let MachineState::Drawing(kind) = self.state else {
            return None;
        };
        if !kind.is_freehand() {
            return None;
        }
        let draft = store.take_in_progress()?;
        if draft.len() >= kind.min_vertices() {
            Some(store.commit(draft))
        } else {
            log::debug!("freehand capture below two vertices, dropping");
            None
        }
    }

    /// Double-click: attempts to commit a click-to-place buffer. The click
    /// itself never appends a vertex, and an underfilled buffer stays open.
    pub fn double_click(&mut self, store: &mut GeometryStore) -> Option<ShapeId> {
        let MachineState::Drawing(kind) = self.state else {
            return None;
        };
        if kind.is_freehand() {
            return None;
        }
        let needed = kind.min_vertices();
        let have = store.in_progress().map_or(0, ShapeDraft::len);
        if have < needed {
            log::debug!("commit attempt with {have} of {needed} vertices, leaving buffer open");
            return None;
        }
        let draft = store.take_in_progress()?;
        Some(store.commit(draft))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_in(mode: DrawMode, store: &mut GeometryStore) -> InputMachine {
        let mut machine = InputMachine::new(2.0);
        machine.set_mode(Some(mode), store);
        machine
    }

    #[test]
    fn test_mode_to_state() {
        let mut store = GeometryStore::new();
        let mut machine = InputMachine::new(2.0);

        assert_eq!(machine.state(), MachineState::Idle);
        machine.set_mode(Some(DrawMode::Polygon), &mut store);
        assert_eq!(machine.state(), MachineState::Drawing(ShapeKind::Polygon));
        machine.set_mode(Some(DrawMode::Select), &mut store);
        assert_eq!(machine.state(), MachineState::Editing);
        machine.set_mode(None, &mut store);
        assert_eq!(machine.state(), MachineState::Idle);
    }

    #[test]
    fn test_clicks_then_double_click_commits_line() {
        let mut store = GeometryStore::new();
        let style = StyleState::new();
        let mut machine = machine_in(DrawMode::Line, &mut store);

        machine.pointer_down(Point::new(0.0, 0.0), &mut store, &style);
        machine.pointer_down(Point::new(10.0, 0.0), &mut store, &style);
        let id = machine.double_click(&mut store);

        assert!(id.is_some());
        assert_eq!(store.len(), 1);
        assert!(store.in_progress().is_none());
        let shape = &store.committed()[0];
        assert_eq!(shape.kind, ShapeKind::Line);
        assert_eq!(
            shape.vertices,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]
        );
        // Mode stays selected for the next shape.
        assert_eq!(machine.state(), MachineState::Drawing(ShapeKind::Line));
    }

    #[test]
    fn test_underfilled_commit_leaves_buffer_open() {
        let mut store = GeometryStore::new();
        let style = StyleState::new();
        let mut machine = machine_in(DrawMode::Polygon, &mut store);

        machine.pointer_down(Point::new(0.0, 0.0), &mut store, &style);
        machine.pointer_down(Point::new(10.0, 0.0), &mut store, &style);
        assert!(machine.double_click(&mut store).is_none());

        assert!(store.is_empty());
        assert_eq!(store.in_progress().unwrap().len(), 2);
    }

    #[test]
    fn test_double_click_with_no_buffer_is_noop() {
        let mut store = GeometryStore::new();
        let mut machine = machine_in(DrawMode::Line, &mut store);
        assert!(machine.double_click(&mut store).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_freehand_capture_dedups_close_points() {
        let mut store = GeometryStore::new();
        let style = StyleState::new();
        let mut machine = machine_in(DrawMode::Freehand, &mut store);

        machine.pointer_down(Point::new(0.0, 0.0), &mut store, &style);
        machine.pointer_move(Point::new(1.0, 0.0), true, &mut store); // within spacing
        machine.pointer_move(Point::new(5.0, 0.0), true, &mut store);
        machine.pointer_move(Point::new(5.5, 0.0), true, &mut store); // within spacing
        machine.pointer_move(Point::new(10.0, 0.0), true, &mut store);

        assert_eq!(store.in_progress().unwrap().len(), 3);

        let id = machine.pointer_up(&mut store);
        assert!(id.is_some());
        assert_eq!(store.committed()[0].kind, ShapeKind::Freehand);
    }

    #[test]
    fn test_freehand_ignores_moves_without_button() {
        let mut store = GeometryStore::new();
        let style = StyleState::new();
        let mut machine = machine_in(DrawMode::Freehand, &mut store);

        machine.pointer_down(Point::new(0.0, 0.0), &mut store, &style);
        machine.pointer_move(Point::new(50.0, 0.0), false, &mut store);

        assert_eq!(store.in_progress().unwrap().len(), 1);
    }

    #[test]
    fn test_short_freehand_discarded_on_release() {
        let mut store = GeometryStore::new();
        let style = StyleState::new();
        let mut machine = machine_in(DrawMode::FreehandDashed, &mut store);

        machine.pointer_down(Point::new(0.0, 0.0), &mut store, &style);
        machine.pointer_move(Point::new(0.5, 0.0), true, &mut store); // deduped away
        assert!(machine.pointer_up(&mut store).is_none());

        assert!(store.is_empty());
        assert!(store.in_progress().is_none());
    }

    #[test]
    fn test_mode_switch_discards_buffer() {
        let mut store = GeometryStore::new();
        let style = StyleState::new();
        let mut machine = machine_in(DrawMode::Polygon, &mut store);

        machine.pointer_down(Point::new(0.0, 0.0), &mut store, &style);
        machine.pointer_down(Point::new(10.0, 0.0), &mut store, &style);
        machine.set_mode(Some(DrawMode::Freehand), &mut store);

        assert!(store.in_progress().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_events_with_no_mode_are_noops() {
        let mut store = GeometryStore::new();
        let style = StyleState::new();
        let mut machine = InputMachine::new(2.0);

        machine.pointer_down(Point::new(0.0, 0.0), &mut store, &style);
        machine.pointer_move(Point::new(5.0, 0.0), true, &mut store);
        assert!(machine.pointer_up(&mut store).is_none());
        assert!(machine.double_click(&mut store).is_none());

        assert!(store.is_empty());
        assert!(store.in_progress().is_none());
    }

    #[test]
    fn test_clicking_existing_vertex_does_not_autoclose() {
        let mut store = GeometryStore::new();
        let style = StyleState::new();
        let mut machine = machine_in(DrawMode::Polygon, &mut store);

        machine.pointer_down(Point::new(0.0, 0.0), &mut store, &style);
        machine.pointer_down(Point::new(10.0, 0.0), &mut store, &style);
        machine.pointer_down(Point::new(10.0, 10.0), &mut store, &style);
        // Clicking the first vertex again only appends; only double-click closes.
        machine.pointer_down(Point::new(0.0, 0.0), &mut store, &style);

        assert!(store.is_empty());
        assert_eq!(store.in_progress().unwrap().len(), 4);
    }

    #[test]
    fn test_dashed_kind_flags_style() {
        let mut store = GeometryStore::new();
        let style = StyleState::new();
        let mut machine = machine_in(DrawMode::DashedLine, &mut store);

        machine.pointer_down(Point::new(0.0, 0.0), &mut store, &style);
        machine.pointer_down(Point::new(10.0, 0.0), &mut store, &style);
        machine.double_click(&mut store);

        assert!(store.committed()[0].style.dashed);
    }
}
