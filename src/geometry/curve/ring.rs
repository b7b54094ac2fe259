use std::f64::consts::{PI, TAU};

use crate::math::UniformSource;

use super::CurvePoint;

/// Parameters for the closed ring generators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingParams {
    /// Base radius.
    pub radius: f64,
    /// Amplitude of the random radial jitter.
    pub jitter: f64,
    /// Number of control points (excluding the closing duplicate).
    pub count: usize,
    /// Handle length.
    pub smoothness: f64,
    /// Angular step that defines the ring's virtual sample count `2π / step`.
    ///
    /// Only the time tags depend on it; the number of points does not.
    pub angular_step: f64,
}

impl RingParams {
    /// Creates ring parameters with the default angular step of `π / 60`.
    #[must_use]
    pub fn new(radius: f64, jitter: f64, count: usize, smoothness: f64) -> Self {
        Self {
            radius,
            jitter,
            count,
            smoothness,
            angular_step: PI / 60.0,
        }
    }

    /// Sets the angular step.
    #[must_use]
    pub fn with_angular_step(mut self, angular_step: f64) -> Self {
        self.angular_step = angular_step;
        self
    }

    /// Time value carried by the closing point.
    #[must_use]
    pub fn virtual_sample_count(&self) -> f64 {
        TAU / self.angular_step
    }
}

/// Generates a closed ring of evenly spaced points with random radial jitter.
///
/// Points run clockwise from angle zero. Each carries handles perpendicular
/// to its radial direction. The last element is a copy of the first with
/// time set to [`RingParams::virtual_sample_count`].
pub fn generate_isometric_ring(params: &RingParams, random: &mut dyn UniformSource) -> Vec<CurvePoint> {
    build_ring(params, |_, r, p| (r + random.uniform(-p, p), 1.0))
}

/// Generates a scalloped ring.
///
/// Even points are pushed out by `0.3 · radius` with full jitter and full
/// handles; odd points are pulled in by the same amount with a tenth of the
/// jitter and half-length handles.
pub fn generate_cycle_ring(params: &RingParams, random: &mut dyn UniformSource) -> Vec<CurvePoint> {
    build_ring(params, |i, r, p| {
        let jitter = random.uniform(-p, p);
        if i % 2 == 0 {
            (r + r * 0.3 + jitter, 1.0)
        } else {
            (r - r * 0.3 + jitter * 0.1, 0.5)
        }
    })
}

/// Shared ring layout. `shape` maps `(index, radius, jitter)` to the point's
/// radius and a handle-length factor.
#[allow(clippy::cast_precision_loss)]
fn build_ring<F>(params: &RingParams, mut shape: F) -> Vec<CurvePoint>
where
    F: FnMut(usize, f64, f64) -> (f64, f64),
{
    if params.count == 0 {
        return Vec::new();
    }

    let virtual_count = params.virtual_sample_count();
    let mut ring = Vec::with_capacity(params.count + 1);

    for i in 0..params.count {
        let progress = i as f64 / params.count as f64;
        let (radius, handle_scale) = shape(i, params.radius, params.jitter);
        let angle = -progress * TAU;
        let x = angle.cos() * radius;
        let y = angle.sin() * radius;

        let smoothness = params.smoothness * handle_scale;
        let mut point = CurvePoint::new(&[x, y])
            .with_dimension(2)
            .with_time(progress * virtual_count);
        point.set_side_handles(x, y, smoothness, smoothness);
        ring.push(point);
    }

    let closing = ring[0].clone().with_time(virtual_count);
    ring.push(closing);
    ring
}
