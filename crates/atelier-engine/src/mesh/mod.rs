//! CPU-side mesh data and its GPU upload.
//!
//! Every mesh uses the same interleaved `Vertex` so all scene pipelines can
//! share one vertex layout; 2D shapes simply sit at z = 0 facing +Z.

mod gpu;
mod json;
mod primitives;

pub use gpu::GpuMesh;
pub use json::MeshError;
pub use primitives::CIRCLE_SEGMENTS;

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex (32 bytes):
///
///  offset  0  position [f32; 3]  loc 0
///  offset 12  normal   [f32; 3]  loc 1
///  offset 24  uv       [f32; 2]  loc 2
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2  // uv
    ];

    #[inline]
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    /// A 2D point on the z = 0 plane.
    #[inline]
    pub const fn flat(x: f32, y: f32) -> Self {
        Self::new([x, y, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0])
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Line-list indices tracing the triangle index sequence as one closed
    /// loop: `(i0,i1), (i1,i2), .., (ik,i0)`. This is what drawing the same
    /// element buffer as a line loop produces.
    pub fn outline_indices(&self) -> Vec<u32> {
        let idx = &self.indices;
        if idx.len() < 2 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(idx.len() * 2);
        for pair in idx.windows(2) {
            out.extend_from_slice(pair);
        }
        out.push(idx[idx.len() - 1]);
        out.push(idx[0]);
        out
    }

    /// True when every index refers to an existing vertex.
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.vertices.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }
}
