//! Rolling frame-rate counter for frame loop logging

use std::collections::VecDeque;

use crate::time::now_seconds;

const WINDOW: usize = 60;

/// Frames per second over the last [`WINDOW`] ticks.
pub struct FrameRate {
    /// Tick timestamps in seconds
    ticks: VecDeque<f64>,
}

impl FrameRate {
    pub fn new() -> Self {
        Self {
            ticks: VecDeque::with_capacity(WINDOW + 1),
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(now_seconds());
    }

    pub fn tick_at(&mut self, seconds: f64) {
        self.ticks.push_back(seconds);
        if self.ticks.len() > WINDOW {
            self.ticks.pop_front();
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.ticks.front(), self.ticks.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.ticks.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.ticks.len() as f64 - 1.0) / elapsed
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::new()
    }
}
