//! Test doubles for surfaces and hosts

use super::host::Host;
use super::particle::Particle;
use super::surface::{Surface, Viewport};

#[derive(Debug)]
pub(crate) struct RecordedFill {
    pub color: String,
    pub radius: f64,
    pub dots: usize,
}

/// Counts clears and records every batched fill.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub clears: usize,
    pub fills: Vec<RecordedFill>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self, _viewport: &Viewport) {
        self.clears += 1;
    }

    fn fill_dots(&mut self, color: &str, radius: f64, dots: &[Particle]) {
        self.fills.push(RecordedFill {
            color: color.to_string(),
            radius,
            dots: dots.len(),
        });
    }
}

/// Host whose environment is set directly by the test and which counts
/// every lifecycle call made on it.
#[derive(Debug)]
pub(crate) struct FakeHost {
    pub reduced_motion: bool,
    pub has_surface: bool,
    pub viewport: Option<Viewport>,
    pub color: Option<String>,
    pub surface: RecordingSurface,
    pub surface_requests: usize,
    pub viewport_fits: usize,
    pub listeners_attached: usize,
    pub listeners_detached: usize,
    pub frames_requested: usize,
    pub frames_cancelled: usize,
}

impl FakeHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            reduced_motion: false,
            has_surface: true,
            viewport: Some(Viewport::new(width, height, 1.0)),
            color: None,
            surface: RecordingSurface::default(),
            surface_requests: 0,
            viewport_fits: 0,
            listeners_attached: 0,
            listeners_detached: 0,
            frames_requested: 0,
            frames_cancelled: 0,
        }
    }
}

impl Host for FakeHost {
    type Surface = RecordingSurface;

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn surface(&mut self) -> Option<&mut RecordingSurface> {
        self.surface_requests += 1;
        self.has_surface.then_some(&mut self.surface)
    }

    fn fit_viewport(&mut self) -> Option<Viewport> {
        self.viewport_fits += 1;
        self.viewport
    }

    fn dot_color(&self) -> Option<String> {
        self.color.clone()
    }

    fn attach_listeners(&mut self) {
        self.listeners_attached += 1;
    }

    fn detach_listeners(&mut self) {
        self.listeners_detached += 1;
    }

    fn request_frame(&mut self) {
        self.frames_requested += 1;
    }

    fn cancel_frame(&mut self) {
        self.frames_cancelled += 1;
    }
}
