//! Helio forward renderer
//!
//! Builds one program per material from the base shader library, keeps it in
//! a per-material property cache, and orders draws into an opaque pass
//! followed by a transparent pass. Objects may carry hooks that run right
//! before and right after their draw is recorded.

mod object;
mod program;
mod renderer;

pub use object::{RenderHook, RenderHookContext, RenderObject};
pub use program::{CompiledProgram, MaterialProperties, GLSL_PREAMBLE};
pub use renderer::{DrawCall, FrameReport, RenderPass, Renderer, RendererConfig};

/// Result type for renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during rendering
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Shader error in program '{program}': {source}")]
    Shader {
        program: String,
        #[source]
        source: helio_core::HelioError,
    },

    #[error("Camera error: {0}")]
    Camera(#[source] helio_core::HelioError),
}
