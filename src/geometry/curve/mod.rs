//! Cubic Bezier control points, evaluation and procedural curve generators.

mod bezier;
mod point;
mod ring;
mod swing;

pub use bezier::{evaluate_basis, interpolate, sample_smooth_line, SmoothLineOptions};
pub use point::CurvePoint;
pub use ring::{generate_cycle_ring, generate_isometric_ring, RingParams};
pub use swing::{generate_range_swing, SwingParams};
