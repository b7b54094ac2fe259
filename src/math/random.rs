use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MathError, Result};

/// A source of uniformly distributed scalars.
///
/// Every generator in the crate draws through this trait so a seeded or
/// scripted source can be injected for deterministic output.
pub trait UniformSource {
    /// Returns a value in `[min, max)`.
    ///
    /// An empty or inverted range yields `min`.
    fn uniform(&mut self, min: f64, max: f64) -> f64;

    /// Derives an independent boxed source for a long-lived consumer.
    ///
    /// The default seeds a [`UniformRandom`] from one draw of this source.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn split(&mut self) -> Box<dyn UniformSource> {
        let seed = self.uniform(0.0, SPLIT_SEED_RANGE) as u64;
        Box::new(UniformRandom::seeded(seed))
    }
}

impl<U: UniformSource + ?Sized> UniformSource for Box<U> {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        (**self).uniform(min, max)
    }

    fn split(&mut self) -> Box<dyn UniformSource> {
        (**self).split()
    }
}

/// Seeds drawn by the default [`UniformSource::split`] lie in `[0, 2^53)`.
const SPLIT_SEED_RANGE: f64 = 9_007_199_254_740_992.0;

/// Default [`UniformSource`] backed by a seedable [`StdRng`].
#[derive(Debug, Clone)]
pub struct UniformRandom {
    rng: StdRng,
}

impl UniformRandom {
    /// Creates a source seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a deterministic source from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independent source whose seed is drawn from this one.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.rng.gen())
    }
}

impl Default for UniformRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl UniformSource for UniformRandom {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if !min.is_finite() || !max.is_finite() || max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    fn split(&mut self) -> Box<dyn UniformSource> {
        Box::new(self.fork())
    }
}

/// A designed `[min, max)` range that parameters are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is not finite or `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(MathError::InvalidRange { min, max }.into());
        }
        Ok(Self { min, max })
    }

    /// A range that always yields `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Builds a range from bounds known to be ordered at compile time.
    pub(crate) const fn from_bounds(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Draws a value from the range.
    pub fn sample(&self, random: &mut dyn UniformSource) -> f64 {
        random.uniform(self.min, self.max)
    }
}
