//! Base shader library
//!
//! Program templates for each built-in material and the chunks they include.
//! The chunks are registered in a process-wide [`ShaderChunkRegistry`] that
//! features may extend with their own chunks.

use helio_core::ShaderChunkRegistry;
use parking_lot::RwLock;
use std::sync::LazyLock;

/// Version tag of the template and chunk layout in this module. Anything that
/// patches template text by searching for include directives is tied to it.
pub const BASE_SHADER_LIBRARY_VERSION: &str = "helio-shaderlib/1";

/// Chunks every built-in template may include.
pub const BASE_CHUNKS: &[(&str, &str)] = &[
    ("common", include_str!("../shaders/chunks/common.glsl")),
    ("fog_pars_vertex", include_str!("../shaders/chunks/fog_pars_vertex.glsl")),
    ("fog_vertex", include_str!("../shaders/chunks/fog_vertex.glsl")),
    ("fog_pars_fragment", include_str!("../shaders/chunks/fog_pars_fragment.glsl")),
    ("fog_fragment", include_str!("../shaders/chunks/fog_fragment.glsl")),
    ("lights_pars_fragment", include_str!("../shaders/chunks/lights_pars_fragment.glsl")),
];

static SHADER_CHUNKS: LazyLock<RwLock<ShaderChunkRegistry>> = LazyLock::new(|| {
    log::debug!(
        "Initializing shader chunk registry ({}, {} chunks)",
        BASE_SHADER_LIBRARY_VERSION,
        BASE_CHUNKS.len()
    );
    RwLock::new(ShaderChunkRegistry::with_chunks(BASE_CHUNKS.iter().copied()))
});

/// Process-wide chunk registry, seeded with [`BASE_CHUNKS`].
pub fn shader_chunks() -> &'static RwLock<ShaderChunkRegistry> {
    &SHADER_CHUNKS
}

/// Built-in program templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderId {
    /// Unlit, flat color
    Basic,
    /// Single directional light, metallic/roughness
    Standard,
}

impl ShaderId {
    pub fn name(&self) -> &'static str {
        match self {
            ShaderId::Basic => "basic",
            ShaderId::Standard => "standard",
        }
    }

    pub fn vertex_template(&self) -> &'static str {
        match self {
            ShaderId::Basic => include_str!("../shaders/basic.vert"),
            ShaderId::Standard => include_str!("../shaders/standard.vert"),
        }
    }

    pub fn fragment_template(&self) -> &'static str {
        match self {
            ShaderId::Basic => include_str!("../shaders/basic.frag"),
            ShaderId::Standard => include_str!("../shaders/standard.frag"),
        }
    }
}
