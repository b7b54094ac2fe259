pub mod clock;
pub mod error;
pub mod geometry;
pub mod math;
pub mod objects;
pub mod ribbon;

pub use clock::Clock;
pub use error::{RainbowError, Result};
