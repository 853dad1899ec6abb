//! Dot field - an interactive grid of dots
//!
//! A regular grid of point masses that the cursor pushes away, a click
//! blasts outward, and a spring pulls back home every animation frame.
//!
//! - `core`: platform-agnostic simulation and mount lifecycle
//! - `web` (WASM + `wasm` feature): canvas 2D host with `mount(canvas)`
//! - `ascii`: terminal surface used by the `dot-field-cli` binary

pub mod ascii;
pub mod core;
pub mod stats;
pub mod theme;
pub mod time;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod web;

pub use crate::core::{Controller, DotField, FieldMetrics, FieldParams, FieldState, Host};
