//! Incrementally grown ribbon geometry with auto-draw playback and fading.

mod config;
mod fade;
mod hooks;
mod path;
mod sink;

pub use config::{
    AutoDrawParams, RibbonConfig, DEFAULT_FADE_EPSILON, DEFAULT_MAX_VERTEX_NUM,
    DEFAULT_MIN_TURN_ANGLE, DEFAULT_RADIUS, MAX_VERTEX_NUM_LIMIT,
};
pub use fade::FadeWindow;
pub use hooks::{DisappearTrigger, Hook, Scheduler};
pub use path::{RibbonPath, RibbonState};
pub use sink::{
    GeometrySink, RibbonVertex, Side, VertexBuffer, MAX_BUFFER_VERTICES, RIBBON_VERTEX_STRIDE,
};
