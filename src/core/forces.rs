//! Force laws acting on a single particle

/// Inverse-square push away from a source.
///
/// `(dx, dy)` is the offset from the source to the particle. Returns `None`
/// when the particle is outside `radius` or within `min_distance` of the
/// source.
#[inline]
pub fn inverse_square(
    dx: f64,
    dy: f64,
    radius: f64,
    strength: f64,
    min_distance: f64,
) -> Option<(f64, f64)> {
    let dist = (dx * dx + dy * dy).sqrt();
    if dist >= radius || dist <= min_distance {
        return None;
    }
    let force = strength / (dist * dist);
    Some((dx / dist * force, dy / dist * force))
}

/// Linear restoring force toward home.
#[inline]
pub fn spring(x: f64, y: f64, hx: f64, hy: f64, k: f64) -> (f64, f64) {
    ((hx - x) * k, (hy - y) * k)
}
