//! Fade distance storage and the mutation contract shared by every fading material

use crate::params::{FadingFeatureParameters, FadingParameters, FADING_MATERIAL_DEFINE};
use helio_material::{Material, ShaderDefine};

/// Fading state owned by a material.
#[derive(Debug, Clone, Default)]
pub struct FadingState {
    params: FadingParameters,
    needs_update: bool,
    installed: bool,
}

impl FadingState {
    pub fn parameters(&self) -> FadingParameters {
        self.params
    }

    pub fn fade_near(&self) -> f32 {
        self.params.fade_near
    }

    pub fn fade_far(&self) -> f32 {
        self.params.fade_far
    }

    pub fn is_enabled(&self) -> bool {
        self.params.is_enabled()
    }

    /// Whether the compile-time shader patch is attached.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Pending update that has not reached the material yet.
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Force the next setter call to run the update procedure.
    pub fn mark_needs_update(&mut self) {
        self.needs_update = true;
    }

    // Compared bit-wise so a repeated NaN counts as unchanged.
    pub(crate) fn stage_near(&mut self, value: f32) -> bool {
        self.needs_update = value.to_bits() != self.params.fade_near.to_bits() || self.needs_update;
        self.params.fade_near = value;
        self.needs_update
    }

    pub(crate) fn stage_far(&mut self, value: f32) -> bool {
        self.needs_update = value.to_bits() != self.params.fade_far.to_bits() || self.needs_update;
        self.params.fade_far = value;
        self.needs_update
    }

    pub(crate) fn install(&mut self) {
        self.installed = true;
    }
}

/// A material whose output fades out between two view distances.
///
/// Setters only touch the material when the value actually changes (or an
/// update was marked pending). In that case the material is flagged for a
/// program rebuild and its `FADING_MATERIAL` define is recomputed.
pub trait FadingMaterial: Material {
    fn fading(&self) -> &FadingState;

    fn fading_mut(&mut self) -> &mut FadingState;

    fn fade_near(&self) -> f32 {
        self.fading().fade_near()
    }

    fn fade_far(&self) -> f32 {
        self.fading().fade_far()
    }

    fn set_fade_near(&mut self, value: f32) {
        if self.fading_mut().stage_near(value) {
            update_distance_fade_feature(self);
        }
    }

    fn set_fade_far(&mut self, value: f32) {
        if self.fading_mut().stage_far(value) {
            update_distance_fade_feature(self);
        }
    }

    /// Attach the shader patch and apply whichever values are supplied.
    fn apply_fading_parameters(&mut self, params: &FadingFeatureParameters) {
        self.fading_mut().install();
        if let Some(fade_near) = params.fade_near {
            self.set_fade_near(fade_near);
        }
        if let Some(fade_far) = params.fade_far {
            self.set_fade_far(fade_far);
        }
    }

    /// Copy fade distances through the setters, so defines follow.
    fn copy_fading_parameters(&mut self, source: &dyn FadingMaterial) {
        self.set_fade_near(source.fade_near());
        self.set_fade_far(source.fade_far());
    }
}

/// Push pending fading changes into the material.
///
/// Requests a program rebuild, creates the defines map if needed, and makes
/// `FADING_MATERIAL` present exactly when `fade_far > 0`. Repeated calls
/// with an unchanged `fade_far` leave the defines identical.
pub fn update_distance_fade_feature<M: FadingMaterial + ?Sized>(material: &mut M) {
    let enabled = material.fading().is_enabled();
    material.fading_mut().needs_update = false;

    let core = material.core_mut();
    core.set_needs_update();
    let defines = core.defines_mut();
    if enabled {
        defines.insert(FADING_MATERIAL_DEFINE.to_string(), ShaderDefine::Flag);
    } else {
        defines.remove(FADING_MATERIAL_DEFINE);
    }
}
