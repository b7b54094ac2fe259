use crate::error::Result;
use crate::math::{Matrix4, UniformSource, Vector3};
use crate::ribbon::{
    RibbonConfig, RibbonPath, RibbonState, Scheduler, DEFAULT_MAX_VERTEX_NUM,
    DEFAULT_MIN_TURN_ANGLE,
};

use super::{Color, RibbonTarget, RibbonUniforms};

/// A rainbow ribbon that draws itself along a random swing and then fades.
///
/// The ribbon's bands are coloured by the shader from [`Rainbow::PALETTE`].
pub struct Rainbow {
    path: RibbonPath,
    translation: Vector3,
    color: Color,
}

impl Rainbow {
    /// Band colours, outermost first.
    pub const PALETTE: [[f64; 3]; 6] = [
        [253.0 / 255.0, 180.0 / 255.0, 197.0 / 255.0],
        [255.0 / 255.0, 204.0 / 255.0, 167.0 / 255.0],
        [255.0 / 255.0, 236.0 / 255.0, 181.0 / 255.0],
        [141.0 / 255.0, 247.0 / 255.0, 176.0 / 255.0],
        [135.0 / 255.0, 187.0 / 255.0, 252.0 / 255.0],
        [208.0 / 255.0, 192.0 / 255.0, 243.0 / 255.0],
    ];

    /// Creates a rainbow with a random width and time phase.
    ///
    /// Finished auto-draws disappear after a random delay through `scheduler`.
    ///
    /// # Errors
    ///
    /// Returns an error if the generated ribbon configuration is invalid.
    pub fn new(random: &mut dyn UniformSource, scheduler: impl Scheduler + 'static) -> Result<Self> {
        let radius = random.uniform(0.15, 0.25);
        let config = RibbonConfig::new(DEFAULT_MAX_VERTEX_NUM, DEFAULT_MIN_TURN_ANGLE, radius)?;
        Ok(Self::with_config(config, random, scheduler))
    }

    /// Creates a rainbow from an explicit ribbon configuration.
    ///
    /// The path and the disappear delay each get their own source split off
    /// `random`.
    pub fn with_config(
        config: RibbonConfig,
        random: &mut dyn UniformSource,
        scheduler: impl Scheduler + 'static,
    ) -> Self {
        let phase = random.uniform(0.0, 10.0);
        let mut path = RibbonPath::new(config, random.split()).with_time(phase);
        path.schedule_disappear(scheduler, random.split());
        #[allow(clippy::cast_possible_truncation)]
        let bands = Self::PALETTE.len() as u32;
        Self {
            path,
            translation: Vector3::zeros(),
            color: Color::PaletteSpan([0, bands]),
        }
    }

    #[must_use]
    pub fn path(&self) -> &RibbonPath {
        &self.path
    }

    /// Mutable access for manual extension and hook installation.
    pub fn path_mut(&mut self) -> &mut RibbonPath {
        &mut self.path
    }

    #[must_use]
    pub fn state(&self) -> RibbonState {
        self.path.state()
    }

    #[must_use]
    pub fn translation(&self) -> &Vector3 {
        &self.translation
    }

    pub fn set_translation(&mut self, translation: Vector3) {
        self.translation = translation;
    }

    pub fn start_auto_draw(&mut self) {
        self.path.start_auto_draw();
    }

    pub fn trigger_disappear(&mut self) {
        self.path.trigger_disappear();
    }

    pub fn update(&mut self, dt: f64) {
        self.path.update(dt);
    }

    /// Draws the written part of the ribbon as a triangle strip.
    pub fn draw<T: RibbonTarget + ?Sized>(&self, mvp: &Matrix4, target: &mut T) {
        let uniforms = RibbonUniforms {
            mvp: *mvp,
            translation: self.translation,
            color: self.color,
            radius: self.path.config().radius(),
            time: self.path.time(),
            fade: self.path.fade_window(),
        };
        target.draw_ribbon(&uniforms, self.path.sink().as_slice(), self.path.strip_len());
    }
}
