//! Core types shared across the Helio crates: errors, the camera, and the
//! shader chunk registry used to assemble material programs.

pub mod camera;
pub mod error;
pub mod shader_chunks;

pub use camera::Camera;
pub use error::{HelioError, Result};
pub use shader_chunks::{include_directive, parse_include, ShaderChunkRegistry};
