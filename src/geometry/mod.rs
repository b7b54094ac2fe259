pub mod curve;
pub mod vertex;

pub use curve::{CurvePoint, RingParams, SmoothLineOptions, SwingParams};
pub use vertex::{close_fan, control_polygon};
