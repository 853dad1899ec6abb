//! Drawing target abstraction
//!
//! The simulation only ever clears the viewport and fills a batch of equal
//! circles, so that is all a surface has to offer.

use super::particle::Particle;

/// Logical size of the drawing area plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Logical (CSS) width
    pub width: f64,
    /// Logical (CSS) height
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Non-positive or non-finite pixel ratios are treated as 1.
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio,
        }
    }

    /// Size of the backing pixel buffer
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// A 2D target the field can paint into.
pub trait Surface {
    /// Erase the whole logical viewport
    fn clear(&mut self, viewport: &Viewport);

    /// Fill one circle of `radius` per dot, as a single batched path.
    fn fill_dots(&mut self, color: &str, radius: f64, dots: &[Particle]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backing_size_scales_by_pixel_ratio() {
        assert_eq!(Viewport::new(400.0, 300.0, 2.0).backing_size(), (800, 600));
        assert_eq!(Viewport::new(100.5, 10.0, 1.5).backing_size(), (151, 15));
    }

    #[test]
    fn invalid_pixel_ratio_falls_back_to_one() {
        assert_eq!(Viewport::new(10.0, 10.0, 0.0).pixel_ratio, 1.0);
        assert_eq!(Viewport::new(10.0, 10.0, -2.0).pixel_ratio, 1.0);
        assert_eq!(Viewport::new(10.0, 10.0, f64::NAN).pixel_ratio, 1.0);
    }

    #[test]
    fn negative_extent_clamps_to_zero() {
        let viewport = Viewport::new(-10.0, 20.0, 1.0);
        assert_eq!(viewport.width, 0.0);
        assert_eq!(viewport.backing_size(), (0, 20));
    }
}
