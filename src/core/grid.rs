//! Regular grid layout for dot home positions

use super::particle::Particle;

/// Upper bound on columns and rows. At the default spacing this covers
/// viewports far wider than any display.
pub const MAX_AXIS_CELLS: usize = 1024;

/// Columns, rows and centering offsets for a viewport of a given size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    pub spacing: f64,
    /// Center of the first column
    pub offset_x: f64,
    /// Center of the first row
    pub offset_y: f64,
}

impl GridLayout {
    /// Fit as many dots as possible, with leftover margin split evenly.
    /// Each axis is capped at [`MAX_AXIS_CELLS`]; a capped grid stays centered.
    pub fn fit(width: f64, height: f64, spacing: f64) -> Self {
        let cols = cells(width, spacing);
        let rows = cells(height, spacing);
        Self {
            cols,
            rows,
            spacing,
            offset_x: (width - (cols as f64 - 1.0) * spacing) / 2.0,
            offset_y: (height - (rows as f64 - 1.0) * spacing) / 2.0,
        }
    }

    pub fn len(&self) -> usize {
        self.cols.saturating_mul(self.rows)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Home position of the dot at (`col`, `row`)
    #[inline]
    pub fn home(&self, col: usize, row: usize) -> (f64, f64) {
        (
            self.offset_x + col as f64 * self.spacing,
            self.offset_y + row as f64 * self.spacing,
        )
    }

    /// Fresh particles at rest, row-major.
    pub fn build(&self) -> Vec<Particle> {
        let mut particles = Vec::with_capacity(self.len());
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (hx, hy) = self.home(col, row);
                particles.push(Particle::at_rest(hx, hy));
            }
        }
        particles
    }
}

fn cells(extent: f64, spacing: f64) -> usize {
    if !(extent.is_finite() && extent > 0.0) {
        return 0;
    }
    // `as` saturates, so an infinite quotient lands on the cap
    ((extent / spacing).floor() as usize).min(MAX_AXIS_CELLS)
}
