use bytemuck::{Pod, Zeroable};

use crate::color::Color;
use crate::coords::PixelRect;

use super::ctx::set_region;
use super::{color_target, primitive_state, DynamicUniforms, RenderCtx, RenderTarget};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FillUniform {
    color: [f32; 4],
}

/// Paints solid colours into sub-regions of the colour target.
///
/// A load-op clear always covers the whole attachment; side-by-side views
/// that each want their own background use this instead.
#[derive(Default)]
pub struct RegionFill {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    uniforms: Option<DynamicUniforms<FillUniform>>,
}

impl RegionFill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paint(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, regions: &[(PixelRect, Color)]) {
        if regions.is_empty() {
            return;
        }
        self.ensure_pipeline(ctx);

        let Some(uniforms) = self.uniforms.as_mut() else { return };
        let records: Vec<FillUniform> = regions
            .iter()
            .map(|(_, c)| FillUniform { color: c.to_array() })
            .collect();
        let offsets = uniforms.write(ctx, &records);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = uniforms.bind_group() else { return };

        let mut rpass = target.begin_pass("atelier region fill pass", None);
        rpass.set_pipeline(pipeline);
        for ((rect, _), offset) in regions.iter().zip(offsets) {
            if rect.width == 0 || rect.height == 0 {
                continue;
            }
            set_region(&mut rpass, *rect);
            rpass.set_bind_group(0, bind_group, &[offset]);
            rpass.draw(0..3, 0..1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("atelier fill shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/fill.wgsl").into()),
        });

        let uniforms = DynamicUniforms::new(ctx.device, "atelier fill", wgpu::ShaderStages::FRAGMENT);

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("atelier fill pipeline layout"),
            bind_group_layouts: &[uniforms.layout()],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("atelier fill pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(color_target(ctx.surface_format, None))],
            }),
            primitive: primitive_state(wgpu::PrimitiveTopology::TriangleList),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.uniforms = Some(uniforms);
    }
}
