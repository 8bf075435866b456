use crate::mesh::Vertex;

/// Depth attachment format used by every scene.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// How a mesh's indices are rasterized.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum DrawMode {
    #[default]
    Triangles,
    /// The index sequence traced as one closed polyline.
    LineLoop,
    /// Each referenced vertex as a single pixel.
    Points,
}

impl DrawMode {
    pub const ALL: [DrawMode; 3] = [DrawMode::Triangles, DrawMode::LineLoop, DrawMode::Points];

    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            DrawMode::Triangles => wgpu::PrimitiveTopology::TriangleList,
            DrawMode::LineLoop => wgpu::PrimitiveTopology::LineList,
            DrawMode::Points => wgpu::PrimitiveTopology::PointList,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DrawMode::Triangles => "triangles",
            DrawMode::LineLoop => "line loop",
            DrawMode::Points => "points",
        }
    }
}

/// No culling: several meshes mix windings, and the environment skybox is
/// seen from inside.
pub fn primitive_state(topology: wgpu::PrimitiveTopology) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

/// Standard less-than depth test with writes.
pub fn depth_stencil() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

pub fn color_target(format: wgpu::TextureFormat, blend: Option<wgpu::BlendState>) -> wgpu::ColorTargetState {
    wgpu::ColorTargetState {
        format,
        blend,
        write_mask: wgpu::ColorWrites::ALL,
    }
}

/// The parts of a render pipeline the scenes vary. Everything else is the
/// shared preset: no culling, `Less` depth, no multisampling.
pub struct PipelineSpec<'a> {
    pub label: &'a str,
    pub shader: &'a wgpu::ShaderModule,
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    /// Feed the interleaved mesh `Vertex`. Fullscreen passes generate
    /// positions from the vertex index instead.
    pub mesh_vertices: bool,
    pub topology: wgpu::PrimitiveTopology,
    /// `None` builds a depth-only pipeline (no fragment stage).
    pub color: Option<wgpu::TextureFormat>,
    pub blend: Option<wgpu::BlendState>,
    pub depth: bool,
}

impl PipelineSpec<'_> {
    pub fn build(&self, device: &wgpu::Device) -> wgpu::RenderPipeline {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} layout", self.label)),
            bind_group_layouts: self.bind_group_layouts,
            immediate_size: 0,
        });

        let mesh_layout = [Vertex::layout()];
        let buffers: &[wgpu::VertexBufferLayout<'_>] = if self.mesh_vertices { &mesh_layout } else { &[] };
        let targets = self.color.map(|format| [Some(color_target(format, self.blend))]);

        log::debug!("building pipeline \"{}\" ({:?})", self.label, self.topology);

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: self.shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers,
            },
            fragment: targets.as_ref().map(|targets| wgpu::FragmentState {
                module: self.shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets,
            }),
            primitive: primitive_state(self.topology),
            depth_stencil: self.depth.then(depth_stencil),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_loop_uses_line_list() {
        // Loops are expanded to explicit index pairs, so no strip topology.
        assert_eq!(DrawMode::LineLoop.topology(), wgpu::PrimitiveTopology::LineList);
    }

    #[test]
    fn default_mode_is_filled() {
        assert_eq!(DrawMode::default(), DrawMode::Triangles);
    }
}
