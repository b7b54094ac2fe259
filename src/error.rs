use thiserror::Error;

/// Top-level error type for the rainbow toolkit.
#[derive(Debug, Error)]
pub enum RainbowError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Ribbon(#[from] RibbonError),

    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Errors related to numeric parameters.
#[derive(Debug, Error)]
pub enum MathError {
    #[error("invalid range [{min}, {max})")]
    InvalidRange { min: f64, max: f64 },
}

/// Errors related to ribbon path configuration.
#[derive(Debug, Error)]
pub enum RibbonError {
    #[error("invalid ribbon configuration: {0}")]
    InvalidConfig(String),
}

/// Errors related to the animation clock.
#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("clock speed must be finite and positive, got {0}")]
    InvalidSpeed(f64),
}

/// Convenience type alias for results using [`RainbowError`].
pub type Result<T> = std::result::Result<T, RainbowError>;
