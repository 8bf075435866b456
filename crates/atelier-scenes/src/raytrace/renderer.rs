use anyhow::Result;
use bytemuck::{Pod, Zeroable};

use atelier_engine::render::{DynamicUniforms, PipelineSpec, RenderCtx, RenderTarget};

use super::tracer::{Sphere, TraceSettings, CAMERA, SPHERES};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SphereUniform {
    center_radius: [f32; 4],
    color_reflect: [f32; 4],
    specular: [f32; 4],
}

impl From<&Sphere> for SphereUniform {
    fn from(s: &Sphere) -> Self {
        Self {
            center_radius: s.center.extend(s.radius).to_array(),
            color_reflect: s.color.extend(s.reflectivity).to_array(),
            specular: [s.specular, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TraceUniform {
    camera: [f32; 4],
    light: [f32; 4],
    canvas: [f32; 4],
    flags: [f32; 4],
    spheres: [SphereUniform; 7],
}

impl TraceUniform {
    fn new(settings: &TraceSettings, (width, height): (u32, u32)) -> Self {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        Self {
            camera: CAMERA.extend(1.0).to_array(),
            light: settings.light.extend(1.0).to_array(),
            canvas: [w, h, w / h, 0.0],
            flags: [flag(settings.reflections), flag(settings.shadows), 0.0, 0.0],
            spheres: SPHERES.each_ref().map(SphereUniform::from),
        }
    }
}

/// Fullscreen pass that runs the tracer in the fragment shader.
#[derive(Default)]
pub struct RaytraceRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    uniforms: Option<DynamicUniforms<TraceUniform>>,
}

impl RaytraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, settings: &TraceSettings) -> Result<()> {
        self.ensure_pipeline(ctx);

        let Some(uniforms) = self.uniforms.as_mut() else { return Ok(()) };
        let offsets = uniforms.write(ctx, &[TraceUniform::new(settings, ctx.physical_size)]);
        let (Some(pipeline), Some(bind_group), Some(offset)) =
            (self.pipeline.as_ref(), uniforms.bind_group(), offsets.first())
        else {
            return Ok(());
        };

        let mut rpass = target.begin_pass("atelier raytrace pass", None);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[*offset]);
        rpass.draw(0..3, 0..1);
        Ok(())
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("atelier raytrace shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/raytrace.wgsl").into()),
        });
        let uniforms = DynamicUniforms::new(ctx.device, "atelier raytrace", wgpu::ShaderStages::FRAGMENT);

        self.pipeline = Some(
            PipelineSpec {
                label: "atelier raytrace pipeline",
                shader: &shader,
                bind_group_layouts: &[uniforms.layout()],
                mesh_vertices: false,
                topology: wgpu::PrimitiveTopology::TriangleList,
                color: Some(ctx.surface_format),
                blend: None,
                depth: false,
            }
            .build(ctx.device),
        );
        self.pipeline_format = Some(ctx.surface_format);
        self.uniforms = Some(uniforms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout_matches_the_shader() {
        // 4 vec4 headers plus 7 spheres of 3 vec4 each.
        assert_eq!(std::mem::size_of::<TraceUniform>(), 16 * 4 + 7 * 48);
    }

    #[test]
    fn flags_and_canvas_are_packed() {
        let settings = TraceSettings {
            reflections: false,
            ..TraceSettings::default()
        };
        let u = TraceUniform::new(&settings, (800, 400));
        assert_eq!(u.flags[..2], [0.0, 1.0]);
        assert_eq!(u.canvas[..3], [800.0, 400.0, 2.0]);
        assert_eq!(u.spheres[6].center_radius[3], 0.6);
        assert_eq!(u.spheres[0].specular[0], 5.0);
    }
}
