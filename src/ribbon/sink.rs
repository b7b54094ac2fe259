use crate::math::{Point3, Vector3};

use super::config::MAX_VERTEX_NUM_LIMIT;

/// Which edge of the ribbon a vertex lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Offset along the negated normal; flag `0`.
    Inner,
    /// Offset along the normal; flag `1`.
    Outer,
}

impl Side {
    /// Numeric flag consumed by the shader.
    #[must_use]
    pub fn flag(self) -> f32 {
        match self {
            Self::Inner => 0.0,
            Self::Outer => 1.0,
        }
    }
}

/// One ribbon edge vertex.
///
/// `position` is the centerline point; the renderer extrudes it along
/// `normal` by the ribbon radius scaled with the fade factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonVertex {
    pub position: Point3,
    pub normal: Vector3,
    pub side: Side,
    pub time: f64,
}

/// Receives ribbon vertices for upload to the GPU.
pub trait GeometrySink {
    /// Stores `vertex` at edge-vertex slot `index`.
    fn write_vertex(&mut self, index: usize, vertex: &RibbonVertex);
}

/// Interleaved `f32` layout: position (3), normal (3), side flag, time.
pub const RIBBON_VERTEX_STRIDE: usize = 8;

/// Largest number of edge vertices a [`VertexBuffer`] allocates.
pub const MAX_BUFFER_VERTICES: usize = 2 * MAX_VERTEX_NUM_LIMIT;

/// A fixed-capacity interleaved vertex array.
///
/// Writes beyond the capacity are ignored. The capacity is clamped to
/// [`MAX_BUFFER_VERTICES`].
#[derive(Debug, Clone)]
pub struct VertexBuffer {
    data: Vec<f32>,
    capacity: usize,
    len: usize,
}

impl VertexBuffer {
    /// Creates a buffer for `capacity` edge vertices.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_BUFFER_VERTICES);
        Self {
            data: vec![0.0; capacity * RIBBON_VERTEX_STRIDE],
            capacity,
            len: 0,
        }
    }

    /// Creates a buffer sized for `pairs` left/right vertex pairs.
    #[must_use]
    pub fn for_pairs(pairs: usize) -> Self {
        Self::new(pairs.saturating_mul(2))
    }

    /// Maximum number of edge vertices.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// One past the highest written vertex index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The written prefix of the buffer, ready for upload.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data[..self.len * RIBBON_VERTEX_STRIDE]
    }

    /// Attributes of vertex `index`, if written.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<&[f32]> {
        (index < self.len)
            .then(|| &self.data[index * RIBBON_VERTEX_STRIDE..(index + 1) * RIBBON_VERTEX_STRIDE])
    }
}

impl GeometrySink for VertexBuffer {
    #[allow(clippy::cast_possible_truncation)]
    fn write_vertex(&mut self, index: usize, vertex: &RibbonVertex) {
        if index >= self.capacity {
            tracing::trace!(index, capacity = self.capacity, "vertex write past capacity dropped");
            return;
        }
        let p = &vertex.position;
        let n = &vertex.normal;
        let start = index * RIBBON_VERTEX_STRIDE;
        self.data[start..start + RIBBON_VERTEX_STRIDE].copy_from_slice(&[
            p.x as f32,
            p.y as f32,
            p.z as f32,
            n.x as f32,
            n.y as f32,
            n.z as f32,
            vertex.side.flag(),
            vertex.time as f32,
        ]);
        self.len = self.len.max(index + 1);
    }
}
