use std::f64::consts::PI;

use crate::geometry::curve::{generate_cycle_ring, sample_smooth_line, RingParams, SmoothLineOptions};
use crate::geometry::vertex::close_fan;
use crate::math::{Matrix4, Point3, UniformSource, Vector3};

use super::{to_f32, Color, FanTarget, FanUniforms};

/// Points around a star's scalloped outline.
const STAR_POINTS: usize = 10;

/// A small scalloped star that twinkles through its time uniform.
#[derive(Debug, Clone)]
pub struct Star {
    outline: Vec<f32>,
    color: [f64; 3],
    translation: Vector3,
    time: f64,
}

impl Star {
    pub const PALETTE: [[f64; 3]; 3] = [
        [253.0 / 255.0, 255.0 / 255.0, 252.0 / 255.0],
        [255.0 / 255.0, 244.0 / 255.0, 187.0 / 255.0],
        [255.0 / 255.0, 204.0 / 255.0, 167.0 / 255.0],
    ];

    /// Generates a random star centred on the origin.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(random: &mut dyn UniformSource) -> Self {
        let shade = random.uniform(0.98, 1.02);
        let index = (random.uniform(0.0, 3.0).floor() as usize).min(Self::PALETTE.len() - 1);
        let seed = random.uniform(0.0, 1.0);

        let params = RingParams::new(
            0.05 + seed * 0.02,
            0.005 + seed * 0.005 + random.uniform(0.0, 0.001),
            STAR_POINTS,
            0.02,
        )
        .with_angular_step(PI / 30.0);
        let ring = generate_cycle_ring(&params, random);
        let samples = sample_smooth_line(&ring, SmoothLineOptions::default());

        Self {
            outline: to_f32(&close_fan(&samples, &Point3::origin())),
            color: Self::PALETTE[index].map(|c| c * shade),
            translation: Vector3::zeros(),
            time: random.uniform(0.0, 100.0),
        }
    }

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
