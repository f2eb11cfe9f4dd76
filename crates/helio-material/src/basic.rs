use crate::material::{Material, MaterialCore, MaterialFlags};
use crate::shader_lib::ShaderId;
use crate::uniforms::{UniformSet, UniformValue};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Construction options for [`BasicMaterial`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicMaterialParameters {
    pub name: String,
    pub color: Vec3,
    pub opacity: f32,
    pub transparent: bool,
    pub two_sided: bool,
}

impl Default for BasicMaterialParameters {
    fn default() -> Self {
        Self {
            name: String::from("Basic"),
            color: Vec3::ONE,
            opacity: 1.0,
            transparent: false,
            two_sided: false,
        }
    }
}

/// Unlit, flat-colored material
#[derive(Debug)]
pub struct BasicMaterial {
    core: MaterialCore,
    pub color: Vec3,
}

impl BasicMaterial {
    pub fn new(params: BasicMaterialParameters) -> Self {
        let mut core = MaterialCore::new(params.name);
        core.opacity = params.opacity;
        core.transparent = params.transparent;
        core.flags.set(MaterialFlags::TWO_SIDED, params.two_sided);
        Self {
            core,
            color: params.color,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn copy_from(&mut self, source: &BasicMaterial) {
        self.core.copy_from(&source.core);
        self.color = source.color;
    }
}

impl Default for BasicMaterial {
    fn default() -> Self {
        Self::new(BasicMaterialParameters::default())
    }
}

impl Clone for BasicMaterial {
    fn clone(&self) -> Self {
        let mut material = BasicMaterial::default();
        material.copy_from(self);
        material
    }
}

impl Material for BasicMaterial {
    fn core(&self) -> &MaterialCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MaterialCore {
        &mut self.core
    }

    fn shader_id(&self) -> ShaderId {
        ShaderId::Basic
    }

    fn uniforms(&self) -> UniformSet {
        let mut uniforms = UniformSet::new();
        uniforms.insert("diffuse", UniformValue::Vec3(self.color));
        uniforms.insert("opacity", UniformValue::Float(self.core.opacity));
        uniforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_gets_a_new_identity() {
        let material = BasicMaterial::new(BasicMaterialParameters {
            color: Vec3::new(1.0, 0.0, 0.0),
            opacity: 0.5,
            ..Default::default()
        });
        let copy = material.clone();

        assert_ne!(copy.id(), material.id());
        assert_eq!(copy.color, material.color);
        assert_eq!(copy.core().opacity, 0.5);
    }

    #[test]
    fn parameters_deserialize_with_defaults() {
        let params: BasicMaterialParameters =
            serde_json::from_str(r#"{ "name": "road", "transparent": true }"#).unwrap();
        assert_eq!(params.name, "road");
        assert!(params.transparent);
        assert_eq!(params.color, Vec3::ONE);

        let material = BasicMaterial::new(params);
        assert!(material.is_transparent());
        assert_eq!(material.uniforms().float("opacity"), Some(1.0));
    }
}
