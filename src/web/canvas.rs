//! Canvas 2D drawing surface

use std::f64::consts::TAU;

use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::core::{Particle, Surface, Viewport};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    /// Set after the first failed draw call so the console is not flooded
    warned: bool,
}

impl CanvasSurface {
    /// `None` when the canvas cannot hand out a 2D context.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx, warned: false })
    }

    /// Map logical units onto the backing pixels.
    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        if let Err(e) = self.ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0) {
            warn!(?e, "Failed to set canvas transform");
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, viewport: &Viewport) {
        self.ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    }

    fn fill_dots(&mut self, color: &str, radius: f64, dots: &[Particle]) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        for dot in dots {
            self.ctx.move_to(dot.x + radius, dot.y);
            if let Err(e) = self.ctx.arc(dot.x, dot.y, radius, 0.0, TAU) {
                if !self.warned {
                    warn!(?e, "Canvas arc failed, skipping rest of frame");
                    self.warned = true;
                }
                break;
            }
        }
        self.ctx.fill();
    }
}
