/// Rate at which the taper ramps with distance from a window edge.
const TAPER_RATE: f64 = 0.5;

/// Exponent shaping the taper curve.
const TAPER_EXPONENT: f64 = 0.4;

/// Time interval over which a ribbon is visible.
///
/// Vertices stamped near `start` or `end` are tapered toward zero width;
/// the renderer moves `start` forward to erase the ribbon from its tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeWindow {
    pub start: f64,
    pub end: f64,
}

impl FadeWindow {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Radius scale in `[0, 1]` for a vertex stamped at `vertex_time`.
    #[must_use]
    pub fn factor(&self, vertex_time: f64) -> f64 {
        let head = ((self.end - vertex_time) * TAPER_RATE).clamp(0.0, 1.0);
        let tail = ((vertex_time - self.start) * TAPER_RATE).clamp(0.0, 1.0);
        head.powf(TAPER_EXPONENT) * tail.powf(TAPER_EXPONENT)
    }

    /// Whether `vertex_time` falls inside the window.
    #[must_use]
    pub fn contains(&self, vertex_time: f64) -> bool {
        (self.start..=self.end).contains(&vertex_time)
    }
}
