use anyhow::Result;
use bytemuck::{Pod, Zeroable};

use atelier_engine::color::Color;
use atelier_engine::coords::PixelRect;
use atelier_engine::math::{normal_matrix, perspective, Mat4, Vec3};
use atelier_engine::mesh::{GpuMesh, MeshData};
use atelier_engine::render::{set_region, DrawMode, DynamicUniforms, PipelineSpec, RegionFill, RenderCtx, RenderTarget};
use atelier_engine::texture::DepthTexture;

use super::layout::{Solid, SolidDraw, Technique};

/// Slices around the axis; stacks follow as `slices / 2 + 1`.
const SPHERE_SLICES: u32 = 30;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ObjectUniform {
    model_view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
    /// Eye space.
    light_pos: [f32; 4],
    diffuse: [f32; 4],
    /// Already multiplied by the technique's ambient strength.
    ambient: [f32; 4],
    /// `w` carries the shininess exponent.
    specular: [f32; 4],
}

/// Camera and light shared by all three views for one frame.
#[derive(Debug, Copy, Clone)]
pub struct ShadingFrame {
    pub view: Mat4,
    pub light_eye: Vec3,
    pub fovy_deg: f32,
    pub near: f32,
    pub far: f32,
}

/// One side-by-side view: where it goes and what it draws.
pub struct ShadingView<'a> {
    pub technique: Technique,
    pub region: PixelRect,
    pub draws: &'a [SolidDraw],
}

struct SolidMeshes {
    cube: GpuMesh,
    sphere: GpuMesh,
}

#[derive(Default)]
pub struct ShadingRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    /// Indexed like `Technique::ALL`.
    pipelines: Vec<wgpu::RenderPipeline>,
    uniforms: Option<DynamicUniforms<ObjectUniform>>,
    meshes: Option<SolidMeshes>,
    backgrounds: RegionFill,
    depth: DepthTexture,
}

impl ShadingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        frame: &ShadingFrame,
        views: &[ShadingView<'_>],
    ) -> Result<()> {
        let fills: Vec<(PixelRect, Color)> = views.iter().map(|v| (v.region, v.technique.background())).collect();
        self.backgrounds.paint(ctx, target, &fills);

        self.ensure_meshes(ctx);
        self.ensure_pipelines(ctx);

        // Every view's records go up in one write; the offsets stay in view order.
        let mut records = Vec::new();
        for view in views {
            let proj = perspective_for(frame, view.region);
            records.extend(view.draws.iter().map(|d| object_uniform(frame, proj, view.technique, d)));
        }
        if records.is_empty() {
            return Ok(());
        }

        let Some(uniforms) = self.uniforms.as_mut() else { return Ok(()) };
        let offsets = uniforms.write(ctx, &records);
        let Some(bind_group) = uniforms.bind_group() else { return Ok(()) };
        let Some(meshes) = self.meshes.as_ref() else { return Ok(()) };

        let depth = self.depth.view(ctx.device, ctx.physical_size);
        let mut rpass = target.begin_pass("atelier shading pass", Some(depth));
        let mut offsets = offsets.into_iter();

        for view in views {
            let Some(i) = Technique::ALL.iter().position(|t| *t == view.technique) else { continue };
            let Some(pipeline) = self.pipelines.get(i) else {
                anyhow::bail!("no shading pipeline for {}", view.technique.label());
            };

            set_region(&mut rpass, view.region);
            rpass.set_pipeline(pipeline);
            for draw in view.draws {
                let Some(offset) = offsets.next() else { break };
                rpass.set_bind_group(0, bind_group, &[offset]);
                let mesh = match draw.solid {
                    Solid::Cube => &meshes.cube,
                    Solid::Sphere => &meshes.sphere,
                };
                mesh.draw(&mut rpass, DrawMode::Triangles);
            }
            log::trace!("shading: {} draws with {}", view.draws.len(), view.technique.label());
        }
        Ok(())
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_meshes(&mut self, ctx: &RenderCtx<'_>) {
        if self.meshes.is_some() {
            return;
        }
        let sphere = MeshData::pole_sphere(SPHERE_SLICES, SPHERE_SLICES / 2 + 1, 1.0);
        self.meshes = Some(SolidMeshes {
            cube: GpuMesh::upload(ctx.device, &MeshData::cube(), "shading cube"),
            sphere: GpuMesh::upload(ctx.device, &sphere, "shading sphere"),
        });
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && !self.pipelines.is_empty() {
            return;
        }

        let uniforms = DynamicUniforms::new(ctx.device, "atelier shading", wgpu::ShaderStages::VERTEX_FRAGMENT);
        self.pipelines = Technique::ALL
            .iter()
            .map(|technique| {
                let source = match technique {
                    Technique::Flat => include_str!("shaders/flat.wgsl"),
                    Technique::Gouraud => include_str!("shaders/gouraud.wgsl"),
                    Technique::Phong => include_str!("shaders/phong.wgsl"),
                };
                let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some(&format!("atelier {} shader", technique.label())),
                    source: wgpu::ShaderSource::Wgsl(source.into()),
                });
                PipelineSpec {
                    label: &format!("atelier {} pipeline", technique.label()),
                    shader: &shader,
                    bind_group_layouts: &[uniforms.layout()],
                    mesh_vertices: true,
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    color: Some(ctx.surface_format),
                    blend: None,
                    depth: true,
                }
                .build(ctx.device)
            })
            .collect();

        self.pipeline_format = Some(ctx.surface_format);
        self.uniforms = Some(uniforms);
    }
}

fn perspective_for(frame: &ShadingFrame, region: PixelRect) -> Mat4 {
    perspective(frame.fovy_deg, region.aspect(), frame.near, frame.far)
}

fn object_uniform(frame: &ShadingFrame, proj: Mat4, technique: Technique, draw: &SolidDraw) -> ObjectUniform {
    let model_view = frame.view * draw.model;
    let ambient = Color::WHITE.to_array().map(|c| c * technique.ambient_strength());
    ObjectUniform {
        model_view: model_view.to_cols_array_2d(),
        proj: proj.to_cols_array_2d(),
        normal: normal_matrix(model_view).to_cols_array_2d(),
        light_pos: frame.light_eye.extend(1.0).to_array(),
        diffuse: draw.diffuse.to_array(),
        ambient: [ambient[0], ambient[1], ambient[2], 1.0],
        specular: [1.0, 1.0, 1.0, technique.shininess()],
    }
}
