//! Planar vector helpers used by the handle generators and the ribbon path.

use super::{Vector2, TOLERANCE};

/// Returns the unit vector of `(x, y)` together with its length, or `None`
/// for a (near) zero vector.
#[must_use]
pub fn normalize(x: f64, y: f64) -> Option<(Vector2, f64)> {
    let len = x.hypot(y);
    if !len.is_finite() || len < TOLERANCE {
        return None;
    }
    Some((Vector2::new(x / len, y / len), len))
}

/// Splits `(x, y)` into a unit direction and its length.
///
/// Unlike [`normalize`] only an exactly zero or non-finite vector is
/// rejected, so arbitrarily short moves keep their direction.
#[must_use]
pub fn direction_and_length(x: f64, y: f64) -> Option<(Vector2, f64)> {
    let len = x.hypot(y);
    if !len.is_finite() || len <= 0.0 {
        return None;
    }
    Some((Vector2::new(x / len, y / len), len))
}

/// Angle in radians between two unit vectors.
///
/// The dot product is clamped to `[-1, 1]` so parallel and antiparallel
/// inputs never produce `NaN`.
#[must_use]
pub fn angle_between(a: &Vector2, b: &Vector2) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Rotates `v` counter-clockwise by `angle` radians.
#[must_use]
pub fn rotate(v: &Vector2, angle: f64) -> Vector2 {
    let (sin, cos) = angle.sin_cos();
    Vector2::new(v.x * cos - v.y * sin, v.y * cos + v.x * sin)
}

/// The vector rotated 90 degrees counter-clockwise: `(-y, x)`.
#[must_use]
pub fn perpendicular(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// 2D cross product `a.x * b.y - b.x * a.y`.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - b.x * a.y
}
