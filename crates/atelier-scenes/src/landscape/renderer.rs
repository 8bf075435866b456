use anyhow::Result;
use bytemuck::{Pod, Zeroable};

use atelier_engine::coords::PixelRect;
use atelier_engine::mesh::{GpuMesh, MeshData, CIRCLE_SEGMENTS};
use atelier_engine::render::{set_region, DrawMode, DynamicUniforms, PipelineSpec, RenderCtx, RenderTarget};

use super::layout::{Shape, ShapeDraw};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ShapeUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

struct ShapeMeshes {
    square: GpuMesh,
    triangle: GpuMesh,
    circle: GpuMesh,
}

impl ShapeMeshes {
    fn get(&self, shape: Shape) -> &GpuMesh {
        match shape {
            Shape::Square => &self.square,
            Shape::Triangle => &self.triangle,
            Shape::Circle => &self.circle,
        }
    }
}

/// Draws `ShapeDraw` lists with one pipeline per `DrawMode`.
#[derive(Default)]
pub struct LandscapeRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    /// Indexed like `DrawMode::ALL`.
    pipelines: Vec<wgpu::RenderPipeline>,
    uniforms: Option<DynamicUniforms<ShapeUniform>>,
    meshes: Option<ShapeMeshes>,
}

impl LandscapeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        region: PixelRect,
        draws: &[ShapeDraw],
        mode: DrawMode,
    ) -> Result<()> {
        if draws.is_empty() {
            return Ok(());
        }
        self.ensure_meshes(ctx);
        self.ensure_pipelines(ctx);

        let Some(uniforms) = self.uniforms.as_mut() else { return Ok(()) };
        let records: Vec<ShapeUniform> = draws
            .iter()
            .map(|d| ShapeUniform {
                model: d.model.to_cols_array_2d(),
                color: d.color.to_array(),
            })
            .collect();
        let offsets = uniforms.write(ctx, &records);

        let Some(bind_group) = uniforms.bind_group() else { return Ok(()) };
        let Some(meshes) = self.meshes.as_ref() else { return Ok(()) };
        let Some(pipeline) = DrawMode::ALL
            .iter()
            .position(|m| *m == mode)
            .and_then(|i| self.pipelines.get(i))
        else {
            anyhow::bail!("no landscape pipeline for {}", mode.label());
        };

        let mut rpass = target.begin_pass("atelier landscape pass", None);
        set_region(&mut rpass, region);
        rpass.set_pipeline(pipeline);
        for (draw, offset) in draws.iter().zip(offsets) {
            rpass.set_bind_group(0, bind_group, &[offset]);
            meshes.get(draw.shape).draw(&mut rpass, mode);
        }
        log::trace!("landscape: {} draws as {}", draws.len(), mode.label());
        Ok(())
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_meshes(&mut self, ctx: &RenderCtx<'_>) {
        if self.meshes.is_some() {
            return;
        }
        self.meshes = Some(ShapeMeshes {
            square: GpuMesh::upload(ctx.device, &MeshData::square(), "landscape square"),
            triangle: GpuMesh::upload(ctx.device, &MeshData::triangle(), "landscape triangle"),
            circle: GpuMesh::upload(ctx.device, &MeshData::circle(CIRCLE_SEGMENTS), "landscape circle"),
        });
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && !self.pipelines.is_empty() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("atelier landscape shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shape2d.wgsl").into()),
        });
        let uniforms = DynamicUniforms::new(ctx.device, "atelier landscape", wgpu::ShaderStages::VERTEX_FRAGMENT);

        self.pipelines = DrawMode::ALL
            .iter()
            .map(|mode| {
                PipelineSpec {
                    label: &format!("atelier landscape {} pipeline", mode.label()),
                    shader: &shader,
                    bind_group_layouts: &[uniforms.layout()],
                    mesh_vertices: true,
                    topology: mode.topology(),
                    color: Some(ctx.surface_format),
                    blend: None,
                    depth: false,
                }
                .build(ctx.device)
            })
            .collect();

        self.pipeline_format = Some(ctx.surface_format);
        self.uniforms = Some(uniforms);
    }
}
