use std::path::{Path, PathBuf};

use crate::color::Color;

use super::TextureError;

/// Cube faces in array-layer order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// File name stem used by the asset directory (`posx.jpg`, ...).
    pub fn file_stem(self) -> &'static str {
        match self {
            CubeFace::PosX => "posx",
            CubeFace::NegX => "negx",
            CubeFace::PosY => "posy",
            CubeFace::NegY => "negy",
            CubeFace::PosZ => "posz",
            CubeFace::NegZ => "negz",
        }
    }

    #[inline]
    pub fn layer(self) -> u32 {
        self as u32
    }

    /// Colour used when the face image is unavailable: sky above, ground
    /// below, a neutral horizon around.
    pub fn fallback_color(self) -> Color {
        match self {
            CubeFace::PosY => Color::rgb(0.55, 0.75, 0.95),
            CubeFace::NegY => Color::rgb(0.35, 0.45, 0.25),
            CubeFace::PosX | CubeFace::NegX => Color::rgb(0.70, 0.78, 0.85),
            CubeFace::PosZ | CubeFace::NegZ => Color::rgb(0.65, 0.74, 0.82),
        }
    }
}

/// Checks that all faces are square and the same size; returns that size.
pub(crate) fn validate_faces(sizes: &[(u32, u32); 6]) -> Result<u32, TextureError> {
    let expected = sizes[0].0;
    if expected == 0 {
        return Err(TextureError::Empty);
    }
    for (face, &(width, height)) in CubeFace::ALL.iter().zip(sizes) {
        if width != expected || height != expected {
            return Err(TextureError::FaceSizeMismatch {
                face: *face,
                width,
                height,
                expected,
            });
        }
    }
    Ok(expected)
}

/// Six-layer cube texture sampled by direction.
pub struct CubeMap {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub face_size: u32,
}

impl CubeMap {
    /// Loads `<dir>/<face>.jpg` for every face.
    pub fn from_dir(device: &wgpu::Device, queue: &wgpu::Queue, dir: impl AsRef<Path>) -> Result<Self, TextureError> {
        let dir = dir.as_ref();
        let paths = CubeFace::ALL.map(|face| dir.join(format!("{}.jpg", face.file_stem())));
        Self::from_faces(device, queue, &paths)
    }

    /// Loads one image per face, in `CubeFace::ALL` order. Faces are uploaded
    /// as stored; cube sampling does not use the flipped convention of 2D
    /// textures.
    pub fn from_faces(device: &wgpu::Device, queue: &wgpu::Queue, paths: &[PathBuf; 6]) -> Result<Self, TextureError> {
        let mut faces = Vec::with_capacity(6);
        for path in paths {
            let img = image::open(path).map_err(|source| TextureError::Image {
                path: path.clone(),
                source,
            })?;
            faces.push(img.to_rgba8());
        }

        let sizes: [(u32, u32); 6] = std::array::from_fn(|i| faces[i].dimensions());
        let face_size = validate_faces(&sizes)?;
        log::debug!("loaded cube map from {} ({face_size}px faces)", paths[0].display());

        let data: Vec<&[u8]> = faces.iter().map(|f| f.as_raw().as_slice()).collect();
        Ok(Self::from_face_data(device, queue, face_size, &data))
    }

    /// `from_dir`, or a flat-coloured cube after logging the failure.
    pub fn load_or_fallback(device: &wgpu::Device, queue: &wgpu::Queue, dir: impl AsRef<Path>) -> Self {
        match Self::from_dir(device, queue, dir.as_ref()) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{e}; using flat-coloured cube map");
                let faces: Vec<[u8; 4]> = CubeFace::ALL.iter().map(|f| f.fallback_color().to_rgba8()).collect();
                let data: Vec<&[u8]> = faces.iter().map(|f| f.as_slice()).collect();
                Self::from_face_data(device, queue, 1, &data)
            }
        }
    }

    fn from_face_data(device: &wgpu::Device, queue: &wgpu::Queue, face_size: u32, faces: &[&[u8]]) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("atelier cube map"),
            size: wgpu::Extent3d {
                width: face_size,
                height: face_size,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (face, data) in CubeFace::ALL.iter().zip(faces) {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: face.layer(),
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                data,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * face_size),
                    rows_per_image: Some(face_size),
                },
                wgpu::Extent3d {
                    width: face_size,
                    height: face_size,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("atelier cube map view"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("atelier cube map sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            face_size,
        }
    }
}
