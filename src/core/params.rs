//! Tuning constants for the dot field
//!
//! All values are fixed for the lifetime of a mounted field. Hosts may pick a
//! different set at construction time (the CLI loads one from JSON).

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating [`FieldParams`].
#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("failed to read params file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse params: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid params: {0}")]
    Invalid(String),
}

/// Physics and drawing constants. Distances are logical (CSS) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Distance between neighbouring dot centers
    pub spacing: f64,
    /// Radius of each drawn dot
    pub dot_radius: f64,
    /// Cursor influence radius
    pub repel_radius: f64,
    /// Cursor inverse-square strength
    pub repel_strength: f64,
    /// Click pulse influence radius
    pub click_radius: f64,
    /// Click pulse inverse-square strength (at full pulse strength)
    pub click_strength: f64,
    /// Per-frame multiplier applied to the pulse strength
    pub click_decay: f64,
    /// Pulse strengths at or below this are snapped to zero
    pub click_threshold: f64,
    /// Spring constant toward home
    pub spring: f64,
    /// Per-frame velocity multiplier
    pub damping: f64,
    /// Forces are skipped at or below this distance
    pub min_distance: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            spacing: 28.0,
            dot_radius: 1.5,
            repel_radius: 120.0,
            repel_strength: 8000.0,
            click_radius: 200.0,
            click_strength: 60000.0,
            click_decay: 0.92,
            click_threshold: 0.01,
            spring: 0.015,
            damping: 0.88,
            min_distance: 0.1,
        }
    }
}

impl FieldParams {
    /// Parse from a JSON object. Missing keys keep their default value.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Read and parse a JSON params file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("spacing", self.spacing),
            ("dot_radius", self.dot_radius),
            ("repel_radius", self.repel_radius),
            ("click_radius", self.click_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParamsError::Invalid(format!("{name} must be > 0, got {value}")));
            }
        }

        let non_negative = [
            ("repel_strength", self.repel_strength),
            ("click_strength", self.click_strength),
            ("click_threshold", self.click_threshold),
            ("min_distance", self.min_distance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ParamsError::Invalid(format!("{name} must be >= 0, got {value}")));
            }
        }

        let unit_open = [
            ("spring", self.spring),
            ("damping", self.damping),
            ("click_decay", self.click_decay),
        ];
        for (name, value) in unit_open {
            if !(value > 0.0 && value < 1.0) {
                return Err(ParamsError::Invalid(format!(
                    "{name} must be in (0, 1), got {value}"
                )));
            }
        }

        Ok(())
    }
}
