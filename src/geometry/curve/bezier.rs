use super::CurvePoint;

/// Options for [`sample_smooth_line`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothLineOptions {
    /// Time units per emitted sample.
    pub frequency: f64,
    /// Append the last point's own position after the samples.
    pub include_last: bool,
    /// Follow every sample with a `0.0` component (2D → 3D vertex data).
    pub pad_dimension: bool,
}

impl Default for SmoothLineOptions {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            include_last: false,
            pad_dimension: true,
        }
    }
}

/// Cubic Bernstein basis weights at `t`.
///
/// `t` is not clamped; values outside `[0, 1]` extrapolate.
#[must_use]
pub fn evaluate_basis(t: f64) -> [f64; 4] {
    let mt = 1.0 - t;
    [mt * mt * mt, 3.0 * t * mt * mt, 3.0 * t * t * mt, t * t * t]
}

/// Evaluates the cubic segment from `a` to `b` at `t`.
///
/// Control polygon: `a.position`, `a.handle_b`, `b.handle_a`, `b.position`.
#[must_use]
pub fn interpolate(a: &CurvePoint, b: &CurvePoint, t: f64) -> Vec<f64> {
    let [w0, w1, w2, w3] = evaluate_basis(t);
    let dimension = a.dimension().min(b.dimension());
    (0..dimension)
        .map(|i| {
            a.position()[i] * w0 + a.handle_b()[i] * w1 + b.handle_a()[i] * w2 + b.position()[i] * w3
        })
        .collect()
}

/// Samples a piecewise cubic line through `points` ordered by time.
///
/// Each segment between consecutive points (after a stable sort by time)
/// yields `floor(Δtime / frequency)` samples at evenly spaced `t` in `[0, 1)`.
/// The result is a flat list of components. A frequency that is not a
/// positive finite number produces an empty list. A single point produces
/// only the trailing position, and only when `include_last` is set.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn sample_smooth_line(points: &[CurvePoint], options: SmoothLineOptions) -> Vec<f64> {
    let frequency = options.frequency;
    if points.is_empty() || !frequency.is_finite() || frequency <= 0.0 {
        return Vec::new();
    }

    let mut sorted: Vec<&CurvePoint> = points.iter().collect();
    sorted.sort_by(|a, b| a.time().total_cmp(&b.time()));

    let mut samples = Vec::new();
    for pair in sorted.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let count = ((b.time() - a.time()) / frequency).floor();
        if !count.is_finite() || count < 1.0 {
            continue;
        }
        let count = count as usize;
        for j in 0..count {
            samples.extend(interpolate(a, b, j as f64 / count as f64));
            if options.pad_dimension {
                samples.push(0.0);
            }
        }
    }

    if options.include_last {
        if let Some(last) = sorted.last() {
            samples.extend_from_slice(&last.position()[..last.dimension()]);
            if options.pad_dimension {
                samples.push(0.0);
            }
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line_point(x: f64, time: f64) -> CurvePoint {
        CurvePoint::new(&[x, 0.0]).with_time(time)
    }

    #[test]
    fn basis_is_a_partition_of_unity() {
        for i in -10..=20 {
            let t = f64::from(i) * 0.1;
            let sum: f64 = evaluate_basis(t).iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn basis_at_half() {
        let w = evaluate_basis(0.5);
        assert_relative_eq!(w[0], 0.125);
        assert_relative_eq!(w[1], 0.375);
        assert_relative_eq!(w[2], 0.375);
        assert_relative_eq!(w[3], 0.125);
    }

    #[test]
    fn interpolation_hits_endpoints() {
        let mut p = CurvePoint::new(&[1.0, 2.0]);
        p.set_direction_handles(1.0, 1.0, 0.3, 0.3);
        let mut q = CurvePoint::new(&[4.0, -1.0]);
        q.set_side_handles(0.0, 1.0, 0.2, 0.2);

        assert_eq!(interpolate(&p, &p, 0.0), p.position());
        let end = interpolate(&p, &q, 1.0);
        assert_relative_eq!(end[0], 4.0);
        assert_relative_eq!(end[1], -1.0);
    }

    #[test]
    fn interpolation_uses_shorter_dimension() {
        let p = CurvePoint::new(&[0.0, 0.0, 5.0]);
        let q = CurvePoint::new(&[1.0, 1.0]);
        assert_eq!(interpolate(&p, &q, 0.5).len(), 2);
    }

    #[test]
    fn degenerate_inputs_sample_nothing() {
        let options = SmoothLineOptions::default();
        assert!(sample_smooth_line(&[], options).is_empty());
        assert!(sample_smooth_line(&[line_point(0.0, 0.0)], options).is_empty());
        let duplicate_times = [line_point(0.0, 1.0), line_point(1.0, 1.0)];
        assert!(sample_smooth_line(&duplicate_times, options).is_empty());
        let bad_frequency = SmoothLineOptions {
            frequency: 0.0,
            ..options
        };
        assert!(sample_smooth_line(&[line_point(0.0, 0.0), line_point(1.0, 4.0)], bad_frequency).is_empty());
    }

    #[test]
    fn single_point_yields_only_the_last_position() {
        let options = SmoothLineOptions {
            include_last: true,
            ..SmoothLineOptions::default()
        };
        let samples = sample_smooth_line(&[line_point(2.0, 5.0)], options);
        assert_eq!(samples, vec![2.0, 0.0, 0.0]);
    }

    #[test]
    fn samples_are_sorted_by_time_and_padded() {
        // Given out of order; the x = 0 point comes first in time.
        let points = [line_point(3.0, 3.0), line_point(0.0, 0.0)];
        let samples = sample_smooth_line(&points, SmoothLineOptions::default());
        assert_eq!(samples.len(), 3 * 3);
        assert_relative_eq!(samples[0], 0.0);
        assert_relative_eq!(samples[2], 0.0);
        // Collapsed handles on a straight line: x(t) = 3 * (3t^2 - 2t^3).
        assert_relative_eq!(samples[3], 3.0 * (3.0 / 9.0 - 2.0 / 27.0), epsilon = 1e-12);
        // Caller's slice untouched.
        assert_relative_eq!(points[0].time(), 3.0);
    }

    #[test]
    fn frequency_floors_the_sample_count() {
        let points = [line_point(0.0, 0.0), line_point(1.0, 2.5)];
        let options = SmoothLineOptions {
            frequency: 1.0,
            include_last: true,
            pad_dimension: false,
        };
        let samples = sample_smooth_line(&points, options);
        // floor(2.5) = 2 samples of 2 components, plus the last position.
        assert_eq!(samples.len(), 2 * 2 + 2);
        assert_relative_eq!(samples[4], 1.0);
    }

    #[test]
    fn sampling_is_deterministic() {
        let mut a = CurvePoint::new(&[0.0, 0.0]).with_time(0.0);
        a.set_direction_handles(1.0, 2.0, 0.4, 0.4);
        let mut b = CurvePoint::new(&[2.0, 1.0]).with_time(7.0);
        b.set_direction_handles(1.0, -1.0, 0.4, 0.4);
        let points = [a, b];
        let options = SmoothLineOptions::default();
        assert_eq!(sample_smooth_line(&points, options), sample_smooth_line(&points, options));
    }

    #[test]
    fn ties_keep_input_order() {
        let points = [
            line_point(0.0, 0.0),
            line_point(5.0, 2.0),
            line_point(9.0, 2.0),
            line_point(1.0, 4.0),
        ];
        let options = SmoothLineOptions {
            include_last: true,
            pad_dimension: false,
            ..SmoothLineOptions::default()
        };
        let samples = sample_smooth_line(&points, options);
        // Segment 0→5 (2 samples), 5→9 (none), 9→1 (2 samples), last = 1.
        assert_eq!(samples.len(), 2 * 2 + 2 * 2 + 2);
        assert_relative_eq!(samples[4], 9.0);
        assert_relative_eq!(samples[8], 1.0);
    }
}
