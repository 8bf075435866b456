//! Matrix utilities for building transform hierarchies.
//!
//! Conventions:
//! - column vectors, `clip = P * V * M * p`
//! - right-handed world, camera looking down -Z
//! - clip-space depth in [0, 1] (wgpu)
//! - helpers post-multiply: `translate(m, v)` returns `m * T(v)`, so the last
//!   call in a chain is the first transform applied to the vertex

mod camera;
mod matrix_stack;
mod transform;

pub use camera::Camera;
pub use matrix_stack::MatrixStack;
pub use transform::{
    deg_to_rad, look_at, normal_matrix, perspective, rotate, rotate_x, rotate_y, rotate_z, scale,
    translate,
};

pub use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
