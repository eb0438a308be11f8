//! Mapink Core Library
//!
//! Session engine that turns pointer events plus a selected drawing mode
//! into a validated collection of styled vector shapes over a map surface,
//! exportable as a GeoJSON feature collection. Map rendering, projection,
//! and UI are owned by the host.

pub mod geojson;
pub mod input;
pub mod selection;
pub mod session;
pub mod shapes;
pub mod store;
pub mod style;

pub use input::{DrawMode, InputMachine, MachineState};
pub use kurbo::Point;
pub use selection::{EditController, VertexRef};
pub use session::{DrawSession, SessionConfig};
pub use shapes::{Shape, ShapeDraft, ShapeId, ShapeKind};
pub use store::GeometryStore;
pub use style::{Color, Style, StyleState};
