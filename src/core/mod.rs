//! Platform-agnostic core module - shared between the WASM canvas and the CLI

pub mod field;
pub mod forces;
pub mod grid;
pub mod host;
pub mod params;
pub mod particle;
pub mod pointer;
pub mod state;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use field::{DotField, FieldMetrics};
pub use grid::GridLayout;
pub use host::{Controller, Host};
pub use params::{FieldParams, ParamsError};
pub use particle::Particle;
pub use pointer::{ClickPulse, PointerState};
pub use state::{DisableReason, FieldState};
pub use surface::{Surface, Viewport};
