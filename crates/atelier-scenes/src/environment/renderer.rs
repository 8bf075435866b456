use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};

use atelier_engine::color::Color;
use atelier_engine::math::{normal_matrix, Mat4, Vec3};
use atelier_engine::mesh::{GpuMesh, MeshData};
use atelier_engine::render::{DrawMode, DynamicUniforms, PipelineSpec, RenderCtx, RenderTarget};
use atelier_engine::texture::{checkerboard, CubeMap, DepthTexture, Texture2d, TextureError};

use super::layout::{EnvDraw, Skin, Solid};

const SPHERE_RINGS: u32 = 50;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    normal_eye: [[f32; 4]; 4],
    normal_world: [[f32; 4]; 4],
    eye_world: [f32; 4],
    /// Eye space.
    light_pos: [f32; 4],
    color: [f32; 4],
    /// x: texture mix, y: environment factor, z: specular factor, w: refract (0 or 1).
    factors: [f32; 4],
}

/// Camera and light for one frame.
#[derive(Debug, Copy, Clone)]
pub struct EnvFrame {
    pub view: Mat4,
    pub proj: Mat4,
    pub eye_world: Vec3,
    pub light_eye: Vec3,
}

struct Resources {
    cube: GpuMesh,
    sphere: GpuMesh,
    teapot: Option<GpuMesh>,
    skin_layout: wgpu::BindGroupLayout,
    skins: HashMap<Skin, wgpu::BindGroup>,
}

impl Resources {
    fn mesh(&self, solid: Solid) -> Option<&GpuMesh> {
        match solid {
            Solid::Cube => Some(&self.cube),
            Solid::Sphere => Some(&self.sphere),
            Solid::Teapot => self.teapot.as_ref(),
        }
    }
}

/// Loads the scene's images and mesh on first use and draws `EnvDraw` lists.
pub struct EnvironmentRenderer {
    assets: PathBuf,
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    uniforms: Option<DynamicUniforms<ObjectUniform>>,
    resources: Option<Resources>,
    depth: DepthTexture,
}

impl EnvironmentRenderer {
    pub fn new(assets: impl Into<PathBuf>) -> Self {
        Self {
            assets: assets.into(),
            pipeline_format: None,
            pipeline: None,
            uniforms: None,
            resources: None,
            depth: DepthTexture::new(),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        frame: &EnvFrame,
        draws: &[EnvDraw],
    ) -> Result<()> {
        self.ensure_resources(ctx)?;
        self.ensure_pipeline(ctx);

        let Some(resources) = self.resources.as_ref() else { return Ok(()) };
        let visible: Vec<&EnvDraw> = draws.iter().filter(|d| resources.mesh(d.solid).is_some()).collect();
        if visible.is_empty() {
            return Ok(());
        }

        let records: Vec<ObjectUniform> = visible.iter().map(|d| object_uniform(frame, d)).collect();
        let Some(uniforms) = self.uniforms.as_mut() else { return Ok(()) };
        let offsets = uniforms.write(ctx, &records);
        let Some(bind_group) = uniforms.bind_group() else { return Ok(()) };
        let Some(pipeline) = self.pipeline.as_ref() else { return Ok(()) };

        let depth = self.depth.view(ctx.device, ctx.physical_size);
        let mut rpass = target.begin_pass("atelier environment pass", Some(depth));
        rpass.set_pipeline(pipeline);
        for (draw, offset) in visible.iter().zip(offsets) {
            let (Some(mesh), Some(skin)) = (resources.mesh(draw.solid), resources.skins.get(&draw.material.skin))
            else {
                continue;
            };
            rpass.set_bind_group(0, bind_group, &[offset]);
            rpass.set_bind_group(1, skin, &[]);
            mesh.draw(&mut rpass, DrawMode::Triangles);
        }
        log::trace!("environment: {} draws", visible.len());
        Ok(())
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_resources(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        if self.resources.is_some() {
            return Ok(());
        }
        let (device, queue) = (ctx.device, ctx.queue);

        let env = CubeMap::load_or_fallback(device, queue, self.assets.join("Field"));
        let skin_layout = skin_layout(device);

        let mut skins = HashMap::new();
        for skin in Skin::all() {
            let image = load_skin(device, queue, &self.assets, skin)
                .with_context(|| format!("failed to create the {skin:?} texture"))?;
            skins.insert(skin, skin_bind_group(device, &skin_layout, &env, &image, skin));
        }

        let teapot_path = self.assets.join("teapot.json");
        let teapot = match MeshData::from_json_path(&teapot_path) {
            Ok(mesh) => {
                log::debug!("teapot: {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
                Some(GpuMesh::upload(device, &mesh, "environment teapot"))
            }
            Err(e) => {
                log::warn!("{e} ({}); the teapot will not be drawn", teapot_path.display());
                None
            }
        };

        self.resources = Some(Resources {
            cube: GpuMesh::upload(device, &MeshData::cube(), "environment cube"),
            sphere: GpuMesh::upload(device, &MeshData::uv_sphere(SPHERE_RINGS, SPHERE_RINGS, 1.0), "environment sphere"),
            teapot,
            skin_layout,
            skins,
        });
        Ok(())
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(resources) = self.resources.as_ref() else { return };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("atelier environment shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/environment.wgsl").into()),
        });
        let uniforms = DynamicUniforms::new(ctx.device, "atelier environment", wgpu::ShaderStages::VERTEX_FRAGMENT);

        self.pipeline = Some(
            PipelineSpec {
                label: "atelier environment pipeline",
                shader: &shader,
                bind_group_layouts: &[uniforms.layout(), &resources.skin_layout],
                mesh_vertices: true,
                topology: wgpu::PrimitiveTopology::TriangleList,
                color: Some(ctx.surface_format),
                blend: None,
                depth: true,
            }
            .build(ctx.device),
        );
        self.pipeline_format = Some(ctx.surface_format);
        self.uniforms = Some(uniforms);
    }
}

fn object_uniform(frame: &EnvFrame, draw: &EnvDraw) -> ObjectUniform {
    let m = &draw.material;
    ObjectUniform {
        model: draw.model.to_cols_array_2d(),
        view: frame.view.to_cols_array_2d(),
        proj: frame.proj.to_cols_array_2d(),
        normal_eye: normal_matrix(frame.view * draw.model).to_cols_array_2d(),
        normal_world: normal_matrix(draw.model).to_cols_array_2d(),
        eye_world: frame.eye_world.extend(1.0).to_array(),
        light_pos: frame.light_eye.extend(1.0).to_array(),
        color: m.color.to_array(),
        factors: [m.texture_mix, m.env_factor, 1.0, if m.refract { 1.0 } else { 0.0 }],
    }
}

fn skin_file(skin: Skin) -> Option<PathBuf> {
    match skin {
        Skin::Face(face) => Some(Path::new("Field").join(format!("{}.jpg", face.file_stem()))),
        Skin::Wood => Some(PathBuf::from("wood_texture.jpg")),
        Skin::Earth => Some(PathBuf::from("earthmap.jpg")),
        Skin::Cage => Some(PathBuf::from("fence_alpha.png")),
        Skin::Blank => None,
    }
}

/// Procedural image used when a skin's file cannot be loaded.
fn fallback_image(skin: Skin) -> (u32, u32, Vec<u8>) {
    match skin {
        Skin::Face(face) => (1, 1, face.fallback_color().to_rgba8().to_vec()),
        Skin::Wood => checkerboard(64, 8, Color::rgb(0.55, 0.35, 0.2), Color::rgb(0.45, 0.28, 0.15)),
        Skin::Earth => checkerboard(128, 16, Color::rgb(0.1, 0.3, 0.7), Color::rgb(0.2, 0.55, 0.25)),
        // Transparent cells are cut out by the alpha test.
        Skin::Cage => checkerboard(64, 16, Color::gray(0.3), Color::rgba(0.0, 0.0, 0.0, 0.0)),
        Skin::Blank => (1, 1, Color::WHITE.to_rgba8().to_vec()),
    }
}

fn load_skin(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    assets: &Path,
    skin: Skin,
) -> Result<Texture2d, TextureError> {
    let label = format!("environment {skin:?}");
    match skin_file(skin) {
        Some(file) => Texture2d::load_or_fallback(device, queue, assets.join(file), &label, || fallback_image(skin)),
        None => {
            let (w, h, data) = fallback_image(skin);
            Texture2d::from_rgba(device, queue, w, h, &data, &label)
        }
    }
}

fn skin_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let texture = |binding, view_dimension| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension,
            multisampled: false,
        },
        count: None,
    };
    let sampler = |binding| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    };

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("atelier environment textures bgl"),
        entries: &[
            texture(0, wgpu::TextureViewDimension::Cube),
            sampler(1),
            texture(2, wgpu::TextureViewDimension::D2),
            sampler(3),
        ],
    })
}

fn skin_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    env: &CubeMap,
    image: &Texture2d,
    skin: Skin,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("atelier environment {skin:?} bind group")),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&env.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&env.sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&image.view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(&image.sampler),
            },
        ],
    })
}
