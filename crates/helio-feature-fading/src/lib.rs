//! Distance fading for Helio materials
//!
//! Geometry drawn with a fading material becomes transparent between two view
//! distances, `fade_near` and `fade_far`. The pieces:
//!
//! - [`FadingBasicMaterial`] / [`FadingStandardMaterial`]: the built-in
//!   materials with a [`FadingState`] attached. Changing a distance flags the
//!   material for a rebuild and keeps the `FADING_MATERIAL` define in sync.
//! - [`shader_patch`]: inserts the fading chunks into the base templates when
//!   the renderer builds the program.
//! - [`FadingHooks`]: per-object hooks that convert normalized distances to
//!   world units from the camera far plane every frame, push them into the
//!   live uniforms, and optionally force the object into the transparent pass.
//!
//! ```ignore
//! let material = FadingStandardMaterial::new(
//!     StandardMaterialParameters::default(),
//!     FadingFeatureParameters::default(),
//! );
//! let mut object = RenderObject::new("building", material);
//! FadingHooks::new(FadingHookConfig {
//!     fade_near: Some(0.6),
//!     fade_far: Some(0.9),
//!     force_material_to_transparent: true,
//!     update_uniforms: true,
//! })
//! .attach(&mut object);
//! ```

pub mod chunks;
pub mod hooks;
pub mod materials;
pub mod params;
pub mod shader_patch;
pub mod state;

pub use chunks::{fading_chunks_installed, install_fading_chunks, FADING_CHUNKS};
pub use hooks::{AdditionalCallback, FadingHookConfig, FadingHooks, FadingMaterialResolver};
pub use materials::{as_fading_material_mut, FadingBasicMaterial, FadingStandardMaterial};
pub use params::{
    FadingFeatureParameters, FadingParameters, DEFAULT_FADE_FAR, DEFAULT_FADE_NEAR,
    FADING_MATERIAL_DEFINE, UNIFORM_FADE_FAR, UNIFORM_FADE_NEAR,
};
pub use shader_patch::{patch_fading_shader, ShaderPatch};
pub use state::{update_distance_fade_feature, FadingMaterial, FadingState};
