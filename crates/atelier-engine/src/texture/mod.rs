//! Texture loading and GPU texture wrappers.
//!
//! Colour textures are uploaded as `Rgba8Unorm` (no sRGB decode) without mipmaps. Loading
//! never has to abort a scene: `load_or_fallback` variants log a warning and
//! substitute a procedural image when a file is missing or undecodable.

mod cube_map;
mod depth;
mod image2d;

pub use cube_map::{CubeFace, CubeMap};
pub use depth::{DepthTexture, ShadowMap};
pub use image2d::{checkerboard, Texture2d};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cube face {face:?} is {width}x{height}; faces must be square and equal ({expected}x{expected})")]
    FaceSizeMismatch {
        face: CubeFace,
        width: u32,
        height: u32,
        expected: u32,
    },

    #[error("image has zero size")]
    Empty,
}
