//! Cursor position and decaying click pulse

/// A transient radial impulse centered on the last click.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClickPulse {
    pub x: f64,
    pub y: f64,
    /// In `[0, 1]`; exactly `0.0` once spent
    pub strength: f64,
}

impl ClickPulse {
    /// Full-strength pulse at a click location
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, strength: 1.0 }
    }

    #[inline]
    pub fn is_active(&self, threshold: f64) -> bool {
        self.strength > threshold
    }

    /// Geometric decay, snapping to exactly zero once at or below `threshold`.
    /// A spent pulse stays at zero until the next click.
    pub fn decay(&mut self, factor: f64, threshold: f64) {
        if !self.is_active(threshold) {
            self.strength = 0.0;
            return;
        }
        self.strength *= factor;
        if self.strength <= threshold {
            self.strength = 0.0;
        }
    }
}

/// Pointer input as last reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// `None` while the cursor is outside the page
    pub position: Option<(f64, f64)>,
    pub pulse: ClickPulse,
}

impl PointerState {
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.position = Some((x, y));
    }

    pub fn leave(&mut self) {
        self.position = None;
    }

    pub fn press(&mut self, x: f64, y: f64) {
        self.pulse = ClickPulse::at(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECAY: f64 = 0.92;
    const THRESHOLD: f64 = 0.01;

    #[test]
    fn new_click_is_full_strength() {
        let mut pointer = PointerState::default();
        assert!(!pointer.pulse.is_active(THRESHOLD));
        pointer.press(10.0, 20.0);
        assert_eq!(pointer.pulse, ClickPulse { x: 10.0, y: 20.0, strength: 1.0 });
    }

    #[test]
    fn decay_is_geometric_while_active() {
        let mut pulse = ClickPulse::at(0.0, 0.0);
        pulse.decay(DECAY, THRESHOLD);
        assert!((pulse.strength - DECAY).abs() < 1e-12);
        pulse.decay(DECAY, THRESHOLD);
        assert!((pulse.strength - DECAY * DECAY).abs() < 1e-12);
    }

    #[test]
    fn spent_pulse_stays_pinned_at_zero() {
        let mut pulse = ClickPulse::at(0.0, 0.0);
        let mut frames = 0;
        while pulse.strength > 0.0 {
            pulse.decay(DECAY, THRESHOLD);
            assert!(pulse.strength >= 0.0, "no negative overshoot");
            frames += 1;
            assert!(frames < 1000, "pulse never snapped to zero");
        }
        // ln(0.01) / ln(0.92) ~= 55.2
        assert_eq!(frames, 56);

        for _ in 0..100 {
            pulse.decay(DECAY, THRESHOLD);
            assert_eq!(pulse.strength, 0.0);
            assert!(!pulse.is_active(THRESHOLD));
        }
    }

    #[test]
    fn leave_clears_position_but_not_pulse() {
        let mut pointer = PointerState::default();
        pointer.move_to(5.0, 5.0);
        pointer.press(5.0, 5.0);
        pointer.leave();
        assert_eq!(pointer.position, None);
        assert!(pointer.pulse.is_active(THRESHOLD));
    }
}
