use crate::coords::{PixelRect, Rect, Viewport};

/// Renderer-facing context for one frame.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,

    /// Window size in logical pixels.
    pub viewport: Viewport,
    pub scale_factor: f32,

    /// Surface size in physical pixels (the colour target's extent).
    pub physical_size: (u32, u32),
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        scale_factor: f32,
        physical_size: (u32, u32),
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport,
            scale_factor,
            physical_size,
        }
    }

    /// Converts a logical-pixel region to a clipped physical one.
    pub fn to_physical(&self, rect: Rect) -> Option<PixelRect> {
        rect.to_physical(self.scale_factor, self.physical_size.0, self.physical_size.1)
    }
}

/// Target for drawing (encoder + colour view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }

    /// Opens a pass that keeps the existing colour contents. When `depth` is
    /// given it is cleared to 1.0 at the start of the pass.
    pub fn begin_pass(
        &mut self,
        label: &str,
        depth: Option<&wgpu::TextureView>,
    ) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: depth.map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }

    /// Opens a pass with no colour attachment that clears `depth` to 1.0,
    /// for rendering into an offscreen depth map.
    pub fn begin_depth_pass(&mut self, label: &str, depth: &wgpu::TextureView) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// Applies a physical region as both viewport and scissor.
pub fn set_region(rpass: &mut wgpu::RenderPass<'_>, r: PixelRect) {
    rpass.set_viewport(r.x as f32, r.y as f32, r.width as f32, r.height as f32, 0.0, 1.0);
    rpass.set_scissor_rect(r.x, r.y, r.width, r.height);
}
