//! Decorative scene objects and the renderer capabilities they draw through.

mod planet;
mod rainbow;
mod star;

pub use planet::Planet;
pub use rainbow::Rainbow;
pub use star::Star;

use crate::math::{Matrix4, Vector3};
use crate::ribbon::FadeWindow;

/// Flat colour passed to a shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Linear RGB in `[0, 1]`.
    Rgb([f64; 3]),
    /// A `[first, end)` span of a palette the shader indexes per ribbon band.
    PaletteSpan([u32; 2]),
}

/// Uniforms for drawing a ribbon strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonUniforms {
    pub mvp: Matrix4,
    pub translation: Vector3,
    pub color: Color,
    pub radius: f64,
    pub time: f64,
    pub fade: FadeWindow,
}

/// Uniforms for drawing a filled outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanUniforms {
    pub mvp: Matrix4,
    pub translation: Vector3,
    pub color: Color,
    pub time: f64,
}

/// Renderer capability for interleaved ribbon vertex data.
pub trait RibbonTarget {
    /// Draws `vertex_count` vertices of `vertices` as a triangle strip.
    fn draw_ribbon(&mut self, uniforms: &RibbonUniforms, vertices: &[f32], vertex_count: usize);
}

/// Renderer capability for closed outlines stored as padded 3D positions.
pub trait FanTarget {
    /// Draws `vertices` as a triangle fan.
    fn draw_fan(&mut self, uniforms: &FanUniforms, vertices: &[f32]);
}

/// Every drawable object kind.
pub enum Decoration {
    Rainbow(Rainbow),
    Planet(Planet),
    Star(Star),
}

impl Decoration {
    /// Advances the object by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        match self {
            Self::Rainbow(rainbow) => rainbow.update(dt),
            Self::Planet(planet) => planet.update(dt),
            Self::Star(star) => star.update(dt),
        }
    }

    /// Issues the object's draw call.
    pub fn draw<T: RibbonTarget + FanTarget>(&self, mvp: &Matrix4, target: &mut T) {
        match self {
            Self::Rainbow(rainbow) => rainbow.draw(mvp, target),
            Self::Planet(planet) => planet.draw(mvp, target),
            Self::Star(star) => star.draw(mvp, target),
        }
    }
}

/// Converts padded vertex data to the `f32` layout the renderer uploads.
#[allow(clippy::cast_possible_truncation)]
fn to_f32(vertices: &[f64]) -> Vec<f32> {
    vertices.iter().map(|&v| v as f32).collect()
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingTarget;
    use super::*;
    use crate::math::UniformRandom;

    #[test]
    fn decorations_dispatch_to_matching_target() {
        let mut random = UniformRandom::seeded(12);
        let mut scene = vec![
            Decoration::Planet(Planet::new(&mut random)),
            Decoration::Star(Star::new(&mut random)),
        ];
        for decoration in &mut scene {
            decoration.update(0.016);
        }

        let mut target = RecordingTarget::default();
        for decoration in &scene {
            decoration.draw(&Matrix4::identity(), &mut target);
        }
        assert_eq!(target.fans.len(), 2);
        assert!(target.ribbons.is_empty());
    }
}
