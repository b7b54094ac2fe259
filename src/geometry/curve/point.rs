use crate::math::vector_2d::{normalize, perpendicular};

/// A curve sample carrying two cubic Bezier handles.
///
/// `handle_a` shapes the segment arriving at this point and `handle_b` the
/// segment leaving it. All three coordinate arrays are owned copies; nothing
/// is shared with the slices a point is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePoint {
    position: Vec<f64>,
    handle_a: Vec<f64>,
    handle_b: Vec<f64>,
    time: f64,
    dimension: Option<usize>,
}

impl CurvePoint {
    /// Creates a point whose handles both sit on the position (a sharp corner).
    #[must_use]
    pub fn new(position: &[f64]) -> Self {
        Self::with_handles(position, position, position)
    }

    /// Creates a point with explicit handles.
    #[must_use]
    pub fn with_handles(position: &[f64], handle_a: &[f64], handle_b: &[f64]) -> Self {
        Self {
            position: position.to_vec(),
            handle_a: handle_a.to_vec(),
            handle_b: handle_b.to_vec(),
            time: 0.0,
            dimension: None,
        }
    }

    /// Sets the ordering time tag.
    #[must_use]
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Overrides the number of components used during evaluation.
    #[must_use]
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Returns the position.
    #[must_use]
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Returns the incoming handle.
    #[must_use]
    pub fn handle_a(&self) -> &[f64] {
        &self.handle_a
    }

    /// Returns the outgoing handle.
    #[must_use]
    pub fn handle_b(&self) -> &[f64] {
        &self.handle_b
    }

    /// Returns the time tag.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Number of components that take part in interpolation.
    ///
    /// The shortest of the three arrays, further limited by an explicit
    /// override when one is set.
    #[must_use]
    pub fn dimension(&self) -> usize {
        let available = self
            .position
            .len()
            .min(self.handle_a.len())
            .min(self.handle_b.len());
        self.dimension.map_or(available, |d| d.min(available))
    }

    /// Places both handles on the position.
    pub fn collapse_handles(&mut self) {
        self.handle_a.clone_from(&self.position);
        self.handle_b.clone_from(&self.position);
    }

    /// Collapses the handles, then pulls them apart along one axis:
    /// `handle_a` by `-s`, `handle_b` by `+b`.
    ///
    /// An axis outside the position leaves the handles collapsed.
    pub fn set_flat_handles(&mut self, axis: usize, s: f64, b: f64) {
        self.collapse_handles();
        if axis < self.position.len() {
            self.handle_a[axis] -= s;
            self.handle_b[axis] += b;
        }
    }

    /// Places the handles perpendicular to `(x, y)`.
    ///
    /// ```text
    ///      |
    /// A <--|--> B
    ///      |
    /// ```
    ///
    /// `s` scales the x component and `b` the y component of the offset.
    pub fn set_side_handles(&mut self, x: f64, y: f64, s: f64, b: f64) {
        if self.position.len() < 2 {
            return;
        }
        let Some((dir, _)) = normalize(x, y) else {
            self.collapse_handles();
            return;
        };
        let side = perpendicular(&dir);
        self.place_planar_handles(side.x * s, side.y * b);
    }

    /// Places the handles along `(x, y)`: `handle_a` behind, `handle_b` ahead.
    ///
    /// `s` scales the x component and `b` the y component of the offset.
    pub fn set_direction_handles(&mut self, x: f64, y: f64, s: f64, b: f64) {
        if self.position.len() < 2 {
            return;
        }
        let Some((dir, _)) = normalize(x, y) else {
            self.collapse_handles();
            return;
        };
        self.place_planar_handles(-dir.x * s, -dir.y * b);
    }

    /// `handle_a = position + offset`, `handle_b = position - offset` in the
    /// first two components; higher components follow the position.
    fn place_planar_handles(&mut self, ox: f64, oy: f64) {
        self.collapse_handles();
        self.handle_a[0] += ox;
        self.handle_a[1] += oy;
        self.handle_b[0] -= ox;
        self.handle_b[1] -= oy;
    }
}
