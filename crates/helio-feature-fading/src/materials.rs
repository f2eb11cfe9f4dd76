//! Built-in materials with fading support

use crate::chunks::install_fading_chunks;
use crate::params::FadingFeatureParameters;
use crate::shader_patch::patch_fading_shader;
use crate::state::{FadingMaterial, FadingState};
use helio_material::{
    BasicMaterial, BasicMaterialParameters, CompileShader, Material, MaterialCore, ShaderId,
    StandardMaterial, StandardMaterialParameters, UniformSet,
};

macro_rules! fading_material {
    ($(#[$meta:meta])* $name:ident, $base:ident, $params:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            base: $base,
            fading: FadingState,
        }

        impl $name {
            pub fn new(params: $params, fading: FadingFeatureParameters) -> Self {
                install_fading_chunks();
                let mut material = Self {
                    base: $base::new(params),
                    fading: FadingState::default(),
                };
                material.apply_fading_parameters(&fading);
                material
            }

            pub fn base(&self) -> &$base {
                &self.base
            }

            pub fn base_mut(&mut self) -> &mut $base {
                &mut self.base
            }

            pub fn copy_from(&mut self, source: &$name) {
                self.base.copy_from(&source.base);
                self.copy_fading_parameters(source);
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new($params::default(), FadingFeatureParameters::default())
            }
        }

        impl Clone for $name {
            fn clone(&self) -> Self {
                let mut material = Self::default();
                material.copy_from(self);
                material
            }
        }

        impl Material for $name {
            fn core(&self) -> &MaterialCore {
                self.base.core()
            }

            fn core_mut(&mut self) -> &mut MaterialCore {
                self.base.core_mut()
            }

            fn shader_id(&self) -> ShaderId {
                self.base.shader_id()
            }

            fn uniforms(&self) -> UniformSet {
                self.base.uniforms()
            }

            fn on_before_compile(&self, shader: &mut CompileShader) {
                patch_fading_shader(&self.fading, shader);
            }
        }

        impl FadingMaterial for $name {
            fn fading(&self) -> &FadingState {
                &self.fading
            }

            fn fading_mut(&mut self) -> &mut FadingState {
                &mut self.fading
            }
        }
    };
}

fading_material!(
    /// Unlit material that fades out with view distance
    FadingBasicMaterial,
    BasicMaterial,
    BasicMaterialParameters
);

fading_material!(
    /// Lit material that fades out with view distance
    FadingStandardMaterial,
    StandardMaterial,
    StandardMaterialParameters
);

/// Resolve the fading capability of the built-in fading materials.
pub fn as_fading_material_mut(material: &mut dyn Material) -> Option<&mut dyn FadingMaterial> {
    let any = material.as_any_mut();
    if any.is::<FadingBasicMaterial>() {
        return any
            .downcast_mut::<FadingBasicMaterial>()
            .map(|material| material as &mut dyn FadingMaterial);
    }
    any.downcast_mut::<FadingStandardMaterial>()
        .map(|material| material as &mut dyn FadingMaterial)
}
