/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format. Off by default: the scenes write their
    /// authored colours straight to the target and expect no encode.
    pub prefer_srgb: bool,

    pub present_mode: wgpu::PresentMode,

    /// Falls back to the first supported mode when unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Raises the 2D texture limit so a square shadow map of `size` texels fits.
    pub fn with_texture_dimension(mut self, size: u32) -> Self {
        let limit = &mut self.required_limits.max_texture_dimension_2d;
        *limit = (*limit).max(size);
        self
    }
}

/// Lowers the texture dimension limit to what the adapter offers, so an
/// oversized request degrades instead of failing device creation.
pub(crate) fn fit_to_adapter(mut requested: wgpu::Limits, supported: &wgpu::Limits) -> wgpu::Limits {
    let max = supported.max_texture_dimension_2d;
    if requested.max_texture_dimension_2d > max {
        log::warn!(
            "requested texture dimension {} exceeds adapter limit {max}; capping",
            requested.max_texture_dimension_2d
        );
        requested.max_texture_dimension_2d = max;
    }
    requested
}
