//! Atelier engine crate.
//!
//! Platform + GPU runtime pieces shared by the exercise scenes: window loop,
//! device, input, timing, logging, and the small math / mesh / texture layer
//! the scenes draw with.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod color;
pub mod math;
pub mod anim;
pub mod mesh;
pub mod texture;
pub mod render;
pub mod controls;
