use serde::{Deserialize, Serialize};

/// `fade_near` value meaning "fading disabled"
pub const DEFAULT_FADE_NEAR: f32 = -1.0;
/// `fade_far` value meaning "fading disabled"
pub const DEFAULT_FADE_FAR: f32 = -1.0;

/// Define present in a material's defines while fading is active
pub const FADING_MATERIAL_DEFINE: &str = "FADING_MATERIAL";

/// Uniform names declared by the fading shader chunks
pub const UNIFORM_FADE_NEAR: &str = "fadeNear";
pub const UNIFORM_FADE_FAR: &str = "fadeFar";

/// Fade distances stored on a material.
///
/// A non-positive `fade_far` disables fading. Values are not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadingParameters {
    pub fade_near: f32,
    pub fade_far: f32,
}

impl FadingParameters {
    pub fn is_enabled(&self) -> bool {
        self.fade_far > 0.0
    }
}

impl Default for FadingParameters {
    fn default() -> Self {
        Self {
            fade_near: DEFAULT_FADE_NEAR,
            fade_far: DEFAULT_FADE_FAR,
        }
    }
}

/// Fading options accepted by the fading material constructors.
/// `None` leaves the corresponding value at its current setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadingFeatureParameters {
    pub fade_near: Option<f32>,
    pub fade_far: Option<f32>,
}

impl FadingFeatureParameters {
    pub fn new(fade_near: f32, fade_far: f32) -> Self {
        Self {
            fade_near: Some(fade_near),
            fade_far: Some(fade_far),
        }
    }
}
