use crate::render::DEPTH_FORMAT;

/// Depth attachment that follows the surface size.
#[derive(Default)]
pub struct DepthTexture {
    view: Option<wgpu::TextureView>,
    size: (u32, u32),
}

impl DepthTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view matching `size`, recreating the texture when it changed.
    pub fn view(&mut self, device: &wgpu::Device, size: (u32, u32)) -> &wgpu::TextureView {
        let size = (size.0.max(1), size.1.max(1));
        if self.size != size {
            self.view = None;
            self.size = size;
        }
        self.view.get_or_insert_with(|| {
            log::debug!("creating depth buffer {}x{}", size.0, size.1);
            create_depth(device, "atelier depth buffer", size, wgpu::TextureUsages::RENDER_ATTACHMENT)
                .create_view(&wgpu::TextureViewDescriptor::default())
        })
    }
}

/// Square depth map rendered from a light and sampled with a comparison
/// sampler in the main pass.
pub struct ShadowMap {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub resolution: u32,
}

impl ShadowMap {
    pub fn new(device: &wgpu::Device, resolution: u32) -> Self {
        let max = device.limits().max_texture_dimension_2d;
        let resolution = if resolution > max {
            log::warn!("shadow map size {resolution} exceeds device limit {max}; clamping");
            max
        } else {
            resolution.max(1)
        };

        let texture = create_depth(
            device,
            "atelier shadow map",
            (resolution, resolution),
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("atelier shadow map view"),
            aspect: wgpu::TextureAspect::DepthOnly,
            ..Default::default()
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("atelier shadow sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            resolution,
        }
    }
}

fn create_depth(device: &wgpu::Device, label: &str, size: (u32, u32), usage: wgpu::TextureUsages) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: size.0,
            height: size.1,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage,
        view_formats: &[],
    })
}
