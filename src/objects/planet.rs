use crate::geometry::curve::{
    generate_isometric_ring, sample_smooth_line, RingParams, SmoothLineOptions,
};
use crate::geometry::vertex::close_fan;
use crate::math::{Matrix4, Point3, UniformSource, Vector3};

use super::{to_f32, Color, FanTarget, FanUniforms};

/// A softly wobbling disc.
///
/// The outline is a jittered isometric ring; bigger planets get more control
/// points and smoother handles.
#[derive(Debug, Clone)]
pub struct Planet {
    outline: Vec<f32>,
    color: [f64; 3],
    translation: Vector3,
    time: f64,
}

impl Planet {
    /// Base colour before the per-instance shade.
    pub const BASE_COLOR: [f64; 3] = [111.0 / 255.0, 149.0 / 255.0, 191.0 / 255.0];

    /// Generates a random planet centred on the origin.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn new(random: &mut dyn UniformSource) -> Self {
        let shade = random.uniform(0.98, 1.02);
        let seed = random.uniform(0.0, 1.0);

        let radius = 0.2 + seed * 0.4;
        let jitter = 0.03 + seed * 0.01 + random.uniform(0.0, 0.01);
        let count = 6 + (seed * 3.0).floor() as usize;
        let smoothness = radius.powf(0.9) * 0.29 + ((7.0 - count as f64) / 7.0) * 0.2;

        let params = RingParams::new(radius, jitter, count, smoothness);
        let ring = generate_isometric_ring(&params, random);
        let samples = sample_smooth_line(&ring, SmoothLineOptions::default());

        Self {
            outline: to_f32(&close_fan(&samples, &Point3::origin())),
            color: Self::BASE_COLOR.map(|c| c * shade),
            translation: Vector3::zeros(),
            time: random.uniform(0.0, 100.0),
        }
    }

    /// Triangle-fan vertex data: centre, outline, first outline vertex.
    #[must_use]
    pub fn outline(&self) -> &[f32] {
        &self.outline
    }

    #[must_use]
    pub fn color(&self) -> [f64; 3] {
        self.color
    }

    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn set_translation(&mut self, translation: Vector3) {
        self.translation = translation;
    }

    pub fn update(&mut self, dt: f64) {
        if dt.is_finite() {
            self.time += dt;
        }
    }

    pub fn draw<T: FanTarget + ?Sized>(&self, mvp: &Matrix4, target: &mut T) {
        let uniforms = FanUniforms {
            mvp: *mvp,
            translation: self.translation,
            color: Color::Rgb(self.color),
            time: self.time,
        };
        target.draw_fan(&uniforms, &self.outline);
    }
}
