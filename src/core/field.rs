//! Dot field simulation
//!
//! Owns the particle grid and pointer state. One call to [`DotField::step`]
//! advances the physics by one display frame; [`DotField::draw`] paints the
//! result in a single batched fill.

use serde::Serialize;
use tracing::debug;

use super::forces;
use super::grid::GridLayout;
use super::params::FieldParams;
use super::particle::Particle;
use super::pointer::PointerState;
use super::surface::{Surface, Viewport};
use crate::theme::resolve_dot_color;

/// Snapshot of the field's energy, for logging and the CLI summary
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FieldMetrics {
    pub frame: u64,
    pub particles: usize,
    pub cols: usize,
    pub rows: usize,
    /// Sum of squared speeds (unit mass)
    pub kinetic_energy: f64,
    /// Largest distance of any particle from its home
    pub max_displacement: f64,
    pub pulse_strength: f64,
}

pub struct DotField {
    params: FieldParams,
    layout: GridLayout,
    viewport: Viewport,
    particles: Vec<Particle>,
    pointer: PointerState,
    /// Cached fill color, refreshed on resize and theme change
    color: String,
    frame: u64,
}

impl DotField {
    /// Empty field; call [`DotField::resize`] to lay out the grid.
    pub fn new(params: FieldParams) -> Self {
        Self {
            params,
            layout: GridLayout::fit(0.0, 0.0, params.spacing),
            viewport: Viewport::default(),
            particles: Vec::new(),
            pointer: PointerState::default(),
            color: resolve_dot_color(None),
            frame: 0,
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Re-resolve the cached dot color from a raw host value.
    pub fn set_color(&mut self, raw: Option<&str>) {
        self.color = resolve_dot_color(raw);
    }

    /// Rebuild the grid from scratch for a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.layout = GridLayout::fit(viewport.width, viewport.height, self.params.spacing);
        self.particles = self.layout.build();
        debug!(
            width = viewport.width,
            height = viewport.height,
            pixel_ratio = viewport.pixel_ratio,
            cols = self.layout.cols,
            rows = self.layout.rows,
            "Grid rebuilt"
        );
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.move_to(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.leave();
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.pointer.press(x, y);
    }

    /// Advance one frame: forces, spring, damping, integrate, pulse decay.
    pub fn step(&mut self) {
        let p = self.params;
        let cursor = self.pointer.position;
        let pulse = self.pointer.pulse;
        let pulse_active = pulse.is_active(p.click_threshold);
        let pulse_strength = p.click_strength * pulse.strength;

        for particle in &mut self.particles {
            if let Some((mx, my)) = cursor {
                if let Some((fx, fy)) = forces::inverse_square(
                    particle.x - mx,
                    particle.y - my,
                    p.repel_radius,
                    p.repel_strength,
                    p.min_distance,
                ) {
                    particle.vx += fx;
                    particle.vy += fy;
                }
            }

            if pulse_active {
                if let Some((fx, fy)) = forces::inverse_square(
                    particle.x - pulse.x,
                    particle.y - pulse.y,
                    p.click_radius,
                    pulse_strength,
                    p.min_distance,
                ) {
                    particle.vx += fx;
                    particle.vy += fy;
                }
            }

            let (sx, sy) = forces::spring(particle.x, particle.y, particle.hx, particle.hy, p.spring);
            particle.vx = (particle.vx + sx) * p.damping;
            particle.vy = (particle.vy + sy) * p.damping;

            particle.x += particle.vx;
            particle.y += particle.vy;
        }

        self.pointer.pulse.decay(p.click_decay, p.click_threshold);
        self.frame += 1;
    }

    /// Clear and paint every dot with one batched fill.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(&self.viewport);
        surface.fill_dots(&self.color, self.params.dot_radius, &self.particles);
    }

    pub fn metrics(&self) -> FieldMetrics {
        let (kinetic_energy, max_displacement) = self
            .particles
            .iter()
            .fold((0.0, 0.0_f64), |(energy, max), p| {
                (energy + p.speed_sq(), max.max(p.displacement()))
            });
        FieldMetrics {
            frame: self.frame,
            particles: self.particles.len(),
            cols: self.layout.cols,
            rows: self.layout.rows,
            kinetic_energy,
            max_displacement,
            pulse_strength: self.pointer.pulse.strength,
        }
    }
}
