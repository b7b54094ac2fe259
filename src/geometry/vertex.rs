use crate::math::Point3;

use super::CurvePoint;

/// Components per vertex in padded 3D vertex data.
pub const VERTEX_STRIDE: usize = 3;

/// Turns a sampled closed outline into triangle-fan vertex data.
///
/// The fan centre is prepended and the first outline vertex is repeated at
/// the end so the fan closes. `samples` must be padded 3D data; a trailing
/// partial vertex is dropped. An empty outline yields an empty list.
#[must_use]
pub fn close_fan(samples: &[f64], center: &Point3) -> Vec<f64> {
    let whole = samples.len() - samples.len() % VERTEX_STRIDE;
    if whole == 0 {
        return Vec::new();
    }

    let mut fan = Vec::with_capacity(whole + 2 * VERTEX_STRIDE);
    fan.extend_from_slice(&[center.x, center.y, center.z]);
    fan.extend_from_slice(&samples[..whole]);
    fan.extend_from_slice(&samples[..VERTEX_STRIDE]);
    fan
}

/// Flattens control points into vertex data for inspecting the handles.
///
/// Each point contributes `handle_b`, `position`, `handle_a` in that order,
/// each optionally followed by a `0.0` padding component.
#[must_use]
pub fn control_polygon(points: &[CurvePoint], pad_dimension: bool) -> Vec<f64> {
    let mut vertices = Vec::new();
    for point in points {
        let dimension = point.dimension();
        for coords in [point.handle_b(), point.position(), point.handle_a()] {
            vertices.extend_from_slice(&coords[..dimension]);
            if pad_dimension {
                vertices.push(0.0);
            }
        }
    }
    vertices
}
