//! Character-cell surface for terminals
//!
//! Each cell counts the dots whose centers fall inside it and renders the
//! count as a density glyph.

use std::fmt;

use crate::core::{Particle, Surface, Viewport};

/// Glyphs by dot count: empty, 1, 2, 3, 4+
const GLYPHS: [char; 5] = [' ', '.', ':', '*', '#'];

/// Upper bound on character columns and rows
pub const MAX_CELLS: usize = 1024;

pub struct AsciiSurface {
    /// Logical pixels per character column
    cell_width: f64,
    /// Logical pixels per character row
    cell_height: f64,
    cols: usize,
    rows: usize,
    counts: Vec<u16>,
    color: String,
}

impl AsciiSurface {
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width: cell_width.max(1.0),
            cell_height: cell_height.max(1.0),
            cols: 0,
            rows: 0,
            counts: Vec::new(),
            color: String::new(),
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Color of the last fill
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let count = self.counts[row * self.cols + col] as usize;
        Some(GLYPHS[count.min(GLYPHS.len() - 1)])
    }
}

impl Surface for AsciiSurface {
    fn clear(&mut self, viewport: &Viewport) {
        self.cols = ((viewport.width / self.cell_width).ceil() as usize).min(MAX_CELLS);
        self.rows = ((viewport.height / self.cell_height).ceil() as usize).min(MAX_CELLS);
        self.counts.clear();
        self.counts.resize(self.cols * self.rows, 0);
    }

    fn fill_dots(&mut self, color: &str, _radius: f64, dots: &[Particle]) {
        self.color.clear();
        self.color.push_str(color);
        for dot in dots {
            if dot.x < 0.0 || dot.y < 0.0 {
                continue;
            }
            let col = (dot.x / self.cell_width) as usize;
            let row = (dot.y / self.cell_height) as usize;
            if col < self.cols && row < self.rows {
                let cell = &mut self.counts[row * self.cols + col];
                *cell = cell.saturating_add(1);
            }
        }
    }
}

impl fmt::Display for AsciiSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .filter_map(|col| self.glyph(col, row))
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
