pub mod basic;
pub mod material;
pub mod shader;
pub mod shader_lib;
pub mod standard;
pub mod uniforms;

pub use basic::*;
pub use material::*;
pub use shader::*;
pub use shader_lib::*;
pub use standard::*;
pub use uniforms::*;
