use wgpu::util::DeviceExt;

use super::MeshData;
use crate::render::DrawMode;

/// Mesh resident on the GPU: one vertex buffer plus a triangle index buffer
/// and a line-loop index buffer over the same vertices.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub outline_buffer: wgpu::Buffer,
    pub outline_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, mesh: &MeshData, label: &str) -> Self {
        debug_assert!(mesh.indices_in_bounds(), "mesh \"{label}\" indexes past its vertices");
        let outline = mesh.outline_indices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} ibo")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let outline_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} outline ibo")),
            contents: bytemuck::cast_slice(&outline),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::trace!(
            "uploaded mesh \"{label}\": {} vertices, {} indices",
            mesh.vertices.len(),
            mesh.indices.len()
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            outline_buffer,
            outline_count: outline.len() as u32,
        }
    }

    /// Binds buffers for `mode` and issues the indexed draw.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, mode: DrawMode) {
        let (buffer, count) = match mode {
            DrawMode::Triangles | DrawMode::Points => (&self.index_buffer, self.index_count),
            DrawMode::LineLoop => (&self.outline_buffer, self.outline_count),
        };
        if count == 0 {
            return;
        }
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..count, 0, 0..1);
    }
}
