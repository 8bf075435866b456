//! GPU rendering helpers shared by the scenes.
//!
//! Each scene owns its own pipelines and buffers, built lazily on the first
//! frame (and rebuilt if the surface format changes). This module provides
//! the per-frame context they receive plus the pieces every scene repeats:
//! a dynamic-offset uniform ring, pipeline state presets, and region fills.

mod ctx;
mod fill;
mod pipeline;
mod uniform;

pub use ctx::{set_region, RenderCtx, RenderTarget};
pub use fill::RegionFill;
pub use pipeline::{
    color_target, depth_stencil, primitive_state, DrawMode, PipelineSpec, DEPTH_FORMAT,
};
pub use uniform::{aligned_stride, DynamicUniforms};
