//! Numeric hygiene shared by the generators.

use glam::Vec3;

/// Magnitudes below this threshold are flushed to exactly zero.
///
/// Near-zero trigonometric results vary in sign across evaluations due to
/// floating rounding; without the flush, seam vertices shimmer and crack
/// between frames.
pub const SNAP_EPSILON: f32 = 1e-4;

/// Flush a near-zero value to exactly `0.0`.
///
/// Values with magnitude at or above [`SNAP_EPSILON`] pass through
/// unmodified. This is a designed precision floor, not an error path.
#[inline]
pub fn snap_zero(value: f32) -> f32 {
    if value.abs() < SNAP_EPSILON { 0.0 } else { value }
}

/// Resolve a homogeneous center point to Cartesian coordinates.
///
/// A nonzero `w` divides through the spatial components (perspective
/// divide); `w == 0` leaves them untouched. The input is taken by value -
/// callers keep their parameter record unmodified.
#[inline]
pub fn normalize_center(center: [f32; 4]) -> Vec3 {
    let [x, y, z, w] = center;
    if w != 0.0 {
        Vec3::new(x / w, y / w, z / w)
    } else {
        Vec3::new(x, y, z)
    }
}
