use std::f64::consts::TAU;

use crate::math::UniformSource;

use super::CurvePoint;

/// Parameters for [`generate_range_swing`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingParams {
    /// Points are scattered within this distance of the origin.
    pub radius_max: f64,
    /// Number of control points.
    pub count: usize,
    /// Time tag of the last point; interior times are scaled to fit.
    pub target_length: f64,
    /// Interior handle length. Negative values flip the handles.
    pub smoothness: f64,
}

/// Generates an open random polyline with arc-length time tags.
///
/// Points are scattered in the disc of radius `radius_max` and kept in
/// construction order. Times are cumulative distance, rescaled so the last
/// point sits exactly at `target_length`. The endpoints are sharp corners;
/// interior points get handles along the chord between their neighbours.
#[allow(clippy::cast_precision_loss)]
pub fn generate_range_swing(params: &SwingParams, random: &mut dyn UniformSource) -> Vec<CurvePoint> {
    let mut swing: Vec<CurvePoint> = (0..params.count)
        .map(|_| {
            let angle = -random.uniform(0.0, TAU);
            let radius = random.uniform(0.0, params.radius_max);
            CurvePoint::new(&[angle.cos() * radius, angle.sin() * radius]).with_dimension(2)
        })
        .collect();

    let Some(last_index) = swing.len().checked_sub(1) else {
        return swing;
    };

    let mut total_length = 0.0;
    for i in 1..swing.len() {
        let (a, b) = (swing[i - 1].position(), swing[i].position());
        total_length += (a[0] - b[0]).hypot(a[1] - b[1]);
        swing[i].set_time(total_length);
    }

    swing[0].set_time(0.0);
    swing[0].collapse_handles();
    swing[last_index].collapse_handles();
    swing[last_index].set_time(params.target_length);

    for i in 1..last_index {
        let time = if total_length > 0.0 {
            swing[i].time() * params.target_length / total_length
        } else {
            params.target_length * i as f64 / last_index as f64
        };
        let (prev, next) = (swing[i - 1].position(), swing[i + 1].position());
        let (dx, dy) = (prev[0] - next[0], prev[1] - next[1]);

        let point = &mut swing[i];
        point.set_time(time);
        point.set_direction_handles(dx, dy, params.smoothness, params.smoothness);
    }

    swing
}
