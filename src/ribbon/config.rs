use std::f64::consts::PI;

use crate::error::{Result, RibbonError};
use crate::geometry::SwingParams;
use crate::math::{UniformSource, ValueRange};

/// Default number of vertex pairs a ribbon can hold.
pub const DEFAULT_MAX_VERTEX_NUM: usize = 2048;

/// Largest accepted `max_vertex_num`.
pub const MAX_VERTEX_NUM_LIMIT: usize = 1 << 16;

/// Default per-step turn limit (one degree).
pub const DEFAULT_MIN_TURN_ANGLE: f64 = PI / 180.0;

/// Default ribbon half-width.
pub const DEFAULT_RADIUS: f64 = 0.25;

/// Default margin between the current time and the fade window edges.
pub const DEFAULT_FADE_EPSILON: f64 = 0.1;

/// Fixed parameters of a ribbon path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonConfig {
    max_vertex_num: usize,
    min_turn_angle: f64,
    radius: f64,
    fade_epsilon: f64,
}

impl RibbonConfig {
    /// Creates a ribbon configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_vertex_num` is zero or above
    /// [`MAX_VERTEX_NUM_LIMIT`], `min_turn_angle` is
    /// negative or not finite, or `radius` is not positive.
    pub fn new(max_vertex_num: usize, min_turn_angle: f64, radius: f64) -> Result<Self> {
        if max_vertex_num == 0 {
            return Err(RibbonError::InvalidConfig("max_vertex_num must be positive".to_owned()).into());
        }
        if max_vertex_num > MAX_VERTEX_NUM_LIMIT {
            return Err(RibbonError::InvalidConfig(format!(
                "max_vertex_num must be at most {MAX_VERTEX_NUM_LIMIT}, got {max_vertex_num}"
            ))
            .into());
        }
        if !min_turn_angle.is_finite() || min_turn_angle < 0.0 {
            return Err(RibbonError::InvalidConfig(format!(
                "min_turn_angle must be finite and non-negative, got {min_turn_angle}"
            ))
            .into());
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(
                RibbonError::InvalidConfig(format!("radius must be positive, got {radius}")).into(),
            );
        }
        Ok(Self {
            max_vertex_num,
            min_turn_angle,
            radius,
            fade_epsilon: DEFAULT_FADE_EPSILON,
        })
    }

    /// Sets the fade window margin.
    ///
    /// # Errors
    ///
    /// Returns an error if `fade_epsilon` is negative or not finite.
    pub fn with_fade_epsilon(mut self, fade_epsilon: f64) -> Result<Self> {
        if !fade_epsilon.is_finite() || fade_epsilon < 0.0 {
            return Err(RibbonError::InvalidConfig(format!(
                "fade_epsilon must be finite and non-negative, got {fade_epsilon}"
            ))
            .into());
        }
        self.fade_epsilon = fade_epsilon;
        Ok(self)
    }

    /// Capacity in vertex pairs.
    #[must_use]
    pub fn max_vertex_num(&self) -> usize {
        self.max_vertex_num
    }

    #[must_use]
    pub fn min_turn_angle(&self) -> f64 {
        self.min_turn_angle
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn fade_epsilon(&self) -> f64 {
        self.fade_epsilon
    }
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            max_vertex_num: DEFAULT_MAX_VERTEX_NUM,
            min_turn_angle: DEFAULT_MIN_TURN_ANGLE,
            radius: DEFAULT_RADIUS,
            fade_epsilon: DEFAULT_FADE_EPSILON,
        }
    }
}

/// Random ranges the auto-draw swing is generated from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoDrawParams {
    /// Scatter radius of the swing's control points.
    pub radius: ValueRange,
    /// Control point count; the sample is floored.
    pub count: ValueRange,
    /// Swing length in samples (one sample is consumed per frame).
    pub length: ValueRange,
    /// Interior handle length.
    pub smoothness: ValueRange,
}

impl AutoDrawParams {
    /// Draws one concrete set of swing parameters.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample(&self, random: &mut dyn UniformSource) -> SwingParams {
        SwingParams {
            radius_max: self.radius.sample(random),
            count: self.count.sample(random).floor().max(0.0) as usize,
            target_length: self.length.sample(random),
            smoothness: self.smoothness.sample(random),
        }
    }
}

impl Default for AutoDrawParams {
    fn default() -> Self {
        Self {
            radius: ValueRange::from_bounds(0.02, 0.04),
            count: ValueRange::from_bounds(3.0, 6.0),
            length: ValueRange::from_bounds(50.0, 150.0),
            smoothness: ValueRange::from_bounds(-0.25, -0.15),
        }
    }
}
