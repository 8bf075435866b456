use std::path::Path;

use crate::color::Color;

use super::TextureError;

/// Sampled 2D colour texture with its view and sampler.
pub struct Texture2d {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl Texture2d {
    /// Decodes `path`, flips it so row 0 is the bottom of the picture, and
    /// uploads it. Texture coordinate (0, 0) then addresses the lower-left
    /// corner, which is what the scenes' uv layouts assume.
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        label: &str,
    ) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = image::imageops::flip_vertical(&img.to_rgba8());
        let (w, h) = rgba.dimensions();
        log::debug!("loaded texture {} ({w}x{h})", path.display());
        Self::from_rgba(device, queue, w, h, rgba.as_raw(), label)
    }

    /// Like `from_path`, but substitutes `fallback` after logging why.
    pub fn load_or_fallback(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        label: &str,
        fallback: impl FnOnce() -> (u32, u32, Vec<u8>),
    ) -> Result<Self, TextureError> {
        match Self::from_path(device, queue, path, label) {
            Ok(t) => Ok(t),
            Err(e) => {
                log::warn!("{e}; using a procedural stand-in for {label}");
                let (w, h, data) = fallback();
                Self::from_rgba(device, queue, w, h, &data, label)
            }
        }
    }

    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        rgba: &[u8],
        label: &str,
    ) -> Result<Self, TextureError> {
        if width == 0 || height == 0 || rgba.len() < (width * height * 4) as usize {
            return Err(TextureError::Empty);
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &rgba[..(width * height * 4) as usize],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
            size: (width, height),
        })
    }

    /// 1x1 texture of a single colour.
    pub fn solid(device: &wgpu::Device, queue: &wgpu::Queue, color: Color, label: &str) -> Result<Self, TextureError> {
        Self::from_rgba(device, queue, 1, 1, &color.to_rgba8(), label)
    }
}

/// `size x size` RGBA checkerboard of `cells x cells` squares alternating
/// between `a` and `b`.
pub fn checkerboard(size: u32, cells: u32, a: Color, b: Color) -> (u32, u32, Vec<u8>) {
    let size = size.max(1);
    let cell = (size / cells.max(1)).max(1);
    let (pa, pb) = (a.to_rgba8(), b.to_rgba8());
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let pick = ((x / cell) + (y / cell)) % 2 == 0;
            data.extend_from_slice(if pick { &pa } else { &pb });
        }
    }
    (size, size, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates() {
        let (w, h, data) = checkerboard(4, 2, Color::WHITE, Color::BLACK);
        assert_eq!((w, h), (4, 4));
        assert_eq!(data.len(), 4 * 4 * 4);
        let px = |x: usize, y: usize| &data[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
        assert_eq!(px(0, 0), &[255, 255, 255, 255]);
        assert_eq!(px(2, 0), &[0, 0, 0, 255]);
        assert_eq!(px(2, 2), &[255, 255, 255, 255]);
    }

    #[test]
    fn checkerboard_keeps_alpha() {
        let (_, _, data) = checkerboard(2, 2, Color::rgba(1.0, 0.0, 0.0, 0.0), Color::WHITE);
        assert_eq!(data[3], 0);
        assert_eq!(data[7], 255);
    }
}
