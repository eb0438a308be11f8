//! Drawing session facade and surface lifecycle.

use crate::geojson::{self, Document, DocumentError};
use crate::input::{DrawMode, InputMachine, MachineState};
use crate::selection::EditController;
use crate::shapes::{Shape, ShapeDraft};
use crate::store::GeometryStore;
use crate::style::{Color, Style, StyleState};
use kurbo::Point;
use uuid::Uuid;

/// Tunables for a drawing session.
///
/// Units match incoming coordinates; the engine performs no projection, so
/// hosts feeding geographic coordinates should scale these down from the
/// screen-space defaults.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Hit tolerance for vertex selection in select mode.
    pub vertex_hit_tolerance: f64,
    /// Minimum spacing between consecutive freehand vertices.
    pub freehand_min_spacing: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            vertex_hit_tolerance: 8.0,
            freehand_min_spacing: 2.0,
        }
    }
}

/// Surface readiness. The drawing surface (the host's map) loads
/// asynchronously; control commands issued before it is ready are queued
/// rather than dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Uninitialized,
    Ready,
}

/// Control commands deferrable until surface readiness.
#[derive(Debug, Clone)]
enum Command {
    SetMode(Option<DrawMode>),
    SetColor(Color),
    SetThickness(f64),
}

/// A drawing session over one map surface.
///
/// Converts pointer events plus the selected mode into a collection of
/// committed vector shapes. All event handling is synchronous and
/// sequential; invalid input is absorbed as a no-op, never an error.
#[derive(Debug, Clone)]
pub struct DrawSession {
    id: Uuid,
    config: SessionConfig,
    readiness: Readiness,
    pending: Vec<Command>,
    mode: Option<DrawMode>,
    machine: InputMachine,
    store: GeometryStore,
    style: StyleState,
    editor: EditController,
}

impl Default for DrawSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSession {
    /// Create a session with default tunables.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let id = Uuid::new_v4();
        log::debug!("created drawing session {id}");
        Self {
            id,
            config,
            readiness: Readiness::Uninitialized,
            pending: Vec::new(),
            mode: None,
            machine: InputMachine::new(config.freehand_min_spacing),
            store: GeometryStore::new(),
            style: StyleState::new(),
            editor: EditController::new(),
        }
    }

    /// Session instance id, for host-side diagnostics.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Mark the drawing surface as loaded and apply queued commands in
    /// issue order.
    pub fn mark_ready(&mut self) {
        if self.readiness == Readiness::Ready {
            return;
        }
        self.readiness = Readiness::Ready;
        let pending = std::mem::take(&mut self.pending);
        log::debug!(
            "session {} surface ready, applying {} queued commands",
            self.id,
            pending.len()
        );
        for command in pending {
            self.apply(command);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }

    /// Queue `command` when the surface is not ready yet.
    fn defer(&mut self, command: Command) -> bool {
        if self.readiness == Readiness::Ready {
            return false;
        }
        log::debug!("surface not ready, queueing {command:?}");
        self.pending.push(command);
        true
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::SetMode(mode) => self.apply_mode(mode),
            Command::SetColor(color) => self.style.set_color(color, self.store.in_progress_mut()),
            Command::SetThickness(px) => {
                self.style.set_thickness(px, self.store.in_progress_mut())
            }
        }
    }

    fn apply_mode(&mut self, mode: Option<DrawMode>) {
        self.machine.set_mode(mode, &mut self.store);
        self.editor.clear();
        self.mode = mode;
    }

    /// Select an input mode, or `None` to go inert. Switching discards any
    /// uncommitted buffer and the active vertex selection.
    pub fn set_mode(&mut self, mode: Option<DrawMode>) {
        if self.defer(Command::SetMode(mode)) {
            return;
        }
        self.apply_mode(mode);
    }

    /// Currently selected mode, if any.
    pub fn mode(&self) -> Option<DrawMode> {
        self.mode
    }

    /// Update the stroke color for new shapes; an in-progress shape is
    /// restyled live.
    pub fn set_color(&mut self, color: Color) {
        if self.defer(Command::SetColor(color)) {
            return;
        }
        self.style.set_color(color, self.store.in_progress_mut());
    }

    /// Update the stroke thickness for new shapes; an in-progress shape is
    /// restyled live.
    pub fn set_thickness(&mut self, px: f64) {
        if self.defer(Command::SetThickness(px)) {
            return;
        }
        self.style.set_thickness(px, self.store.in_progress_mut());
    }

    /// The style applied to the next shape.
    pub fn active_style(&self) -> &Style {
        self.style.active()
    }

    pub fn on_pointer_down(&mut self, point: Point) {
        if !self.is_ready() {
            log::debug!("pointer event before surface ready, dropping");
            return;
        }
        match self.machine.state() {
            MachineState::Editing => {
                self.editor
                    .pointer_down(&self.store, point, self.config.vertex_hit_tolerance)
            }
            _ => self.machine.pointer_down(point, &mut self.store, &self.style),
        }
    }

    pub fn on_pointer_move(&mut self, point: Point, button_held: bool) {
        if !self.is_ready() {
            return;
        }
        match self.machine.state() {
            MachineState::Editing => self.editor.pointer_move(&mut self.store, point, button_held),
            _ => self.machine.pointer_move(point, button_held, &mut self.store),
        }
    }

    pub fn on_pointer_up(&mut self, _point: Point) {
        if !self.is_ready() {
            return;
        }
        match self.machine.state() {
            MachineState::Editing => self.editor.pointer_up(),
            _ => {
                if let Some(id) = self.machine.pointer_up(&mut self.store) {
                    log::debug!("committed freehand shape {id}");
                }
            }
        }
    }

    pub fn on_double_click(&mut self, _point: Point) {
        if !self.is_ready() {
            return;
        }
        if let Some(id) = self.machine.double_click(&mut self.store) {
            log::debug!("committed shape {id}");
        }
    }

    /// Committed shapes in draw order, for per-frame rendering.
    pub fn committed_shapes(&self) -> &[Shape] {
        self.store.committed()
    }

    /// The shape currently under construction, if any.
    pub fn in_progress_shape(&self) -> Option<&ShapeDraft> {
        self.store.in_progress()
    }

    /// Destructive reset: drops all shapes, the in-progress buffer, and the
    /// selected mode. Any confirmation UX is the caller's responsibility.
    pub fn clear_all(&mut self) {
        log::info!(
            "session {} clearing {} committed shapes",
            self.id,
            self.store.len()
        );
        self.store.clear_all();
        self.apply_mode(None);
    }

    /// Serialize the committed shapes to the interchange document. An empty
    /// store yields an empty, well-formed collection.
    pub fn export_document(&self) -> Document {
        geojson::export(self.store.committed())
    }

    /// Commit every feature of `document` into the store. Returns the
    /// number of shapes added; on error nothing is committed.
    pub fn import_document(&mut self, document: &Document) -> Result<usize, DocumentError> {
        let drafts = geojson::import(document)?;
        let count = drafts.len();
        for draft in drafts {
            self.store.commit(draft);
        }
        Ok(count)
    }
}
