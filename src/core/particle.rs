//! Grid-anchored point mass

/// A dot in the field. `hx`/`hy` are fixed at grid-build time; only the
/// position and velocity evolve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub hx: f64,
    pub hy: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Particle {
    /// A particle resting at its home position
    pub fn at_rest(hx: f64, hy: f64) -> Self {
        Self {
            x: hx,
            y: hy,
            hx,
            hy,
            vx: 0.0,
            vy: 0.0,
        }
    }

    /// Distance from the home position
    #[inline]
    pub fn displacement(&self) -> f64 {
        (self.x - self.hx).hypot(self.y - self.hy)
    }

    #[inline]
    pub fn speed_sq(&self) -> f64 {
        self.vx * self.vx + self.vy * self.vy
    }
}
