use std::path::{Path, PathBuf};

use anyhow::Result;
use bytemuck::{Pod, Zeroable};

use atelier_engine::math::{normal_matrix, Mat4, Vec3, Vec4};
use atelier_engine::mesh::{GpuMesh, MeshData};
use atelier_engine::render::{DrawMode, DynamicUniforms, PipelineSpec, RenderCtx, RenderTarget};
use atelier_engine::texture::{DepthTexture, ShadowMap};

use super::layout::{ShadowDraw, Solid};

const SPHERE_RINGS: u32 = 50;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
    /// World space.
    light_pos: [f32; 4],
    color: [f32; 4],
}

/// Camera and light matrices for one frame.
#[derive(Debug, Copy, Clone)]
pub struct ShadowFrame {
    pub view: Mat4,
    pub proj: Mat4,
    pub light_view: Mat4,
    pub light_proj: Mat4,
    pub light_pos: Vec3,
}

struct Meshes {
    cube: GpuMesh,
    sphere: GpuMesh,
    teapot: Option<GpuMesh>,
}

impl Meshes {
    fn get(&self, solid: Solid) -> Option<&GpuMesh> {
        match solid {
            Solid::Cube => Some(&self.cube),
            Solid::Sphere => Some(&self.sphere),
            Solid::Teapot => self.teapot.as_ref(),
        }
    }
}

struct Pipelines {
    format: wgpu::TextureFormat,
    depth_only: wgpu::RenderPipeline,
    lit: wgpu::RenderPipeline,
    shadow_bind_group: wgpu::BindGroup,
}

/// Renders the scene twice: depth from the light into a shadow map, then
/// lit and shadowed from the camera.
pub struct ShadowsRenderer {
    assets: PathBuf,
    shadow_map_size: u32,
    uniforms: Option<DynamicUniforms<ObjectUniform>>,
    shadow_map: Option<ShadowMap>,
    pipelines: Option<Pipelines>,
    meshes: Option<Meshes>,
    depth: DepthTexture,
}

impl ShadowsRenderer {
    pub fn new(assets: impl Into<PathBuf>, shadow_map_size: u32) -> Self {
        Self {
            assets: assets.into(),
            shadow_map_size,
            uniforms: None,
            shadow_map: None,
            pipelines: None,
            meshes: None,
            depth: DepthTexture::new(),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        frame: &ShadowFrame,
        draws: &[ShadowDraw],
    ) -> Result<()> {
        self.ensure_meshes(ctx);
        self.ensure_pipelines(ctx);

        let Some(meshes) = self.meshes.as_ref() else { return Ok(()) };
        let visible: Vec<(&ShadowDraw, &GpuMesh)> = draws
            .iter()
            .filter_map(|d| meshes.get(d.solid).map(|m| (d, m)))
            .collect();
        if visible.is_empty() {
            return Ok(());
        }

        // One upload serves both passes.
        let records: Vec<ObjectUniform> = visible.iter().map(|(d, _)| object_uniform(frame, d)).collect();
        let Some(uniforms) = self.uniforms.as_mut() else { return Ok(()) };
        let offsets = uniforms.write(ctx, &records);
        let Some(bind_group) = uniforms.bind_group() else { return Ok(()) };
        let (Some(pipelines), Some(shadow_map)) = (self.pipelines.as_ref(), self.shadow_map.as_ref()) else {
            return Ok(());
        };

        {
            let mut rpass = target.begin_depth_pass("atelier shadow map pass", &shadow_map.view);
            rpass.set_pipeline(&pipelines.depth_only);
            for ((_, mesh), offset) in visible.iter().zip(&offsets) {
                rpass.set_bind_group(0, bind_group, &[*offset]);
                mesh.draw(&mut rpass, DrawMode::Triangles);
            }
        }

        let depth = self.depth.view(ctx.device, ctx.physical_size);
        let mut rpass = target.begin_pass("atelier shadowed pass", Some(depth));
        rpass.set_pipeline(&pipelines.lit);
        rpass.set_bind_group(1, &pipelines.shadow_bind_group, &[]);
        for ((_, mesh), offset) in visible.iter().zip(&offsets) {
            rpass.set_bind_group(0, bind_group, &[*offset]);
            mesh.draw(&mut rpass, DrawMode::Triangles);
        }
        log::trace!("shadows: {} draws, {}px map", visible.len(), shadow_map.resolution);
        Ok(())
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_meshes(&mut self, ctx: &RenderCtx<'_>) {
        if self.meshes.is_some() {
            return;
        }
        self.meshes = Some(Meshes {
            cube: GpuMesh::upload(ctx.device, &MeshData::cube(), "shadows cube"),
            sphere: GpuMesh::upload(ctx.device, &MeshData::uv_sphere(SPHERE_RINGS, SPHERE_RINGS, 1.0), "shadows sphere"),
            teapot: load_teapot(ctx.device, &self.assets),
        });
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipelines.as_ref().is_some_and(|p| p.format == ctx.surface_format) {
            return;
        }
        let device = ctx.device;

        let uniforms = DynamicUniforms::new(device, "atelier shadows", wgpu::ShaderStages::VERTEX_FRAGMENT);
        let shadow_map = self
            .shadow_map
            .take()
            .unwrap_or_else(|| ShadowMap::new(device, self.shadow_map_size));

        let shadow_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("atelier shadow map bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atelier shadow map bind group"),
            layout: &shadow_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&shadow_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&shadow_map.sampler),
                },
            ],
        });

        let depth_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("atelier shadow depth shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/depth.wgsl").into()),
        });
        let lit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("atelier shadowed shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shadowed.wgsl").into()),
        });

        let depth_only = PipelineSpec {
            label: "atelier shadow depth pipeline",
            shader: &depth_shader,
            bind_group_layouts: &[uniforms.layout()],
            mesh_vertices: true,
            topology: wgpu::PrimitiveTopology::TriangleList,
            color: None,
            blend: None,
            depth: true,
        }
        .build(device);
        let lit = PipelineSpec {
            label: "atelier shadowed pipeline",
            shader: &lit_shader,
            bind_group_layouts: &[uniforms.layout(), &shadow_layout],
            mesh_vertices: true,
            topology: wgpu::PrimitiveTopology::TriangleList,
            color: Some(ctx.surface_format),
            blend: None,
            depth: true,
        }
        .build(device);

        self.pipelines = Some(Pipelines {
            format: ctx.surface_format,
            depth_only,
            lit,
            shadow_bind_group,
        });
        self.shadow_map = Some(shadow_map);
        self.uniforms = Some(uniforms);
    }
}

fn load_teapot(device: &wgpu::Device, assets: &Path) -> Option<GpuMesh> {
    let path = assets.join("teapot.json");
    match MeshData::from_json_path(&path) {
        Ok(mesh) => Some(GpuMesh::upload(device, &mesh, "shadows teapot")),
        Err(e) => {
            log::warn!("{e} ({}); the teapot will not be drawn", path.display());
            None
        }
    }
}

fn object_uniform(frame: &ShadowFrame, draw: &ShadowDraw) -> ObjectUniform {
    ObjectUniform {
        model: draw.model.to_cols_array_2d(),
        view: frame.view.to_cols_array_2d(),
        proj: frame.proj.to_cols_array_2d(),
        light_view_proj: (frame.light_proj * frame.light_view).to_cols_array_2d(),
        normal: normal_matrix(frame.view * draw.model).to_cols_array_2d(),
        light_pos: frame.light_pos.extend(1.0).to_array(),
        color: draw.color.to_array(),
    }
}

/// Maps a light clip-space position to shadow-map texture space: uv with
/// v pointing down the texture, and depth unchanged.
pub fn shadow_coord(light_clip: Vec4) -> Vec3 {
    let ndc = light_clip.truncate() / light_clip.w;
    Vec3::new(ndc.x * 0.5 + 0.5, 0.5 - ndc.y * 0.5, ndc.z)
}

/// Whether a fragment at `coord` is lit, given the depth stored at its uv.
pub fn is_lit(coord: Vec3, stored: f32, bias: f32) -> bool {
    let outside = !(0.0..=1.0).contains(&coord.x) || !(0.0..=1.0).contains(&coord.y) || !(0.0..=1.0).contains(&coord.z);
    outside || coord.z - bias <= stored
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_engine::math::{look_at, perspective};

    // ── texture-space mapping ─────────────────────────────────────────────

    #[test]
    fn clip_centre_maps_to_texture_centre() {
        let c = shadow_coord(Vec4::new(0.0, 0.0, 0.5, 1.0));
        assert!((c - Vec3::new(0.5, 0.5, 0.5)).length() < 1e-6);
    }

    #[test]
    fn clip_top_maps_to_texture_row_zero() {
        let c = shadow_coord(Vec4::new(-2.0, 2.0, 1.0, 2.0));
        assert!((c.x - 0.0).abs() < 1e-6);
        assert!((c.y - 0.0).abs() < 1e-6);
    }

    #[test]
    fn light_looks_at_its_target_through_the_map_centre() {
        let view = look_at(Vec3::new(2.0, 2.0, -2.0), Vec3::new(0.0, -1.2, 0.0), Vec3::Y);
        let proj = perspective(50.0, 1.0, 0.1, 1000.0);
        let c = shadow_coord(proj * view * Vec4::new(0.0, -1.2, 0.0, 1.0));
        assert!((c.x - 0.5).abs() < 1e-4 && (c.y - 0.5).abs() < 1e-4);
        assert!(c.z > 0.0 && c.z < 1.0);
    }

    // ── depth comparison ──────────────────────────────────────────────────

    #[test]
    fn occluded_fragment_is_dark() {
        assert!(!is_lit(Vec3::new(0.5, 0.5, 0.9), 0.5, 0.0005));
    }

    #[test]
    fn bias_hides_self_shadowing() {
        assert!(is_lit(Vec3::new(0.5, 0.5, 0.5003), 0.5, 0.0005));
    }

    #[test]
    fn outside_the_map_is_lit() {
        assert!(is_lit(Vec3::new(1.2, 0.5, 0.9), 0.0, 0.0005));
        assert!(is_lit(Vec3::new(0.5, 0.5, 1.5), 0.0, 0.0005));
    }
}
