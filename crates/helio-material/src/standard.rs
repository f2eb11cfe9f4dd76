use crate::material::{Material, MaterialCore, MaterialFlags};
use crate::shader_lib::ShaderId;
use crate::uniforms::{UniformSet, UniformValue};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Construction options for [`StandardMaterial`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardMaterialParameters {
    pub name: String,
    pub base_color: Vec3,
    pub opacity: f32,
    pub transparent: bool,
    pub two_sided: bool,
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: Vec3,
    pub emissive_strength: f32,
}

impl Default for StandardMaterialParameters {
    fn default() -> Self {
        Self {
            name: String::from("Standard"),
            base_color: Vec3::ONE,
            opacity: 1.0,
            transparent: false,
            two_sided: false,
            metallic: 0.0,
            roughness: 0.5,
            emissive: Vec3::ZERO,
            emissive_strength: 1.0,
        }
    }
}

/// Lit metallic/roughness material
#[derive(Debug)]
pub struct StandardMaterial {
    core: MaterialCore,
    pub base_color: Vec3,
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: Vec3,
    pub emissive_strength: f32,
}

impl StandardMaterial {
    pub fn new(params: StandardMaterialParameters) -> Self {
        let mut core = MaterialCore::new(params.name);
        core.opacity = params.opacity;
        core.transparent = params.transparent;
        core.flags.set(MaterialFlags::TWO_SIDED, params.two_sided);
        Self {
            core,
            base_color: params.base_color,
            metallic: params.metallic,
            roughness: params.roughness,
            emissive: params.emissive,
            emissive_strength: params.emissive_strength,
        }
    }

    pub fn with_metallic_roughness(mut self, metallic: f32, roughness: f32) -> Self {
        self.metallic = metallic;
        self.roughness = roughness;
        self
    }

    pub fn with_emissive(mut self, color: Vec3, strength: f32) -> Self {
        self.emissive = color;
        self.emissive_strength = strength;
        self
    }

    pub fn copy_from(&mut self, source: &StandardMaterial) {
        self.core.copy_from(&source.core);
        self.base_color = source.base_color;
        self.metallic = source.metallic;
        self.roughness = source.roughness;
        self.emissive = source.emissive;
        self.emissive_strength = source.emissive_strength;
    }
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self::new(StandardMaterialParameters::default())
    }
}

impl Clone for StandardMaterial {
    fn clone(&self) -> Self {
        let mut material = StandardMaterial::default();
        material.copy_from(self);
        material
    }
}

impl Material for StandardMaterial {
    fn core(&self) -> &MaterialCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MaterialCore {
        &mut self.core
    }

    fn shader_id(&self) -> ShaderId {
        ShaderId::Standard
    }

    fn uniforms(&self) -> UniformSet {
        let mut uniforms = UniformSet::new();
        uniforms.insert("diffuse", UniformValue::Vec3(self.base_color));
        uniforms.insert("emissive", UniformValue::Vec3(self.emissive * self.emissive_strength));
        uniforms.insert("opacity", UniformValue::Float(self.core.opacity));
        uniforms.insert("metalness", UniformValue::Float(self.metallic));
        uniforms.insert("roughness", UniformValue::Float(self.roughness));
        uniforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_fold_emissive_strength() {
        let material = StandardMaterial::default()
            .with_metallic_roughness(1.0, 0.2)
            .with_emissive(Vec3::new(1.0, 0.5, 0.0), 2.0);

        let uniforms = material.uniforms();
        assert_eq!(uniforms.get("emissive"), Some(&UniformValue::Vec3(Vec3::new(2.0, 1.0, 0.0))));
        assert_eq!(uniforms.float("metalness"), Some(1.0));
        assert_eq!(uniforms.float("roughness"), Some(0.2));
    }

    #[test]
    fn clone_copies_surface_parameters() {
        let material = StandardMaterial::new(StandardMaterialParameters {
            name: "metal".into(),
            metallic: 1.0,
            roughness: 0.1,
            two_sided: true,
            ..Default::default()
        });
        let copy = material.clone();

        assert_ne!(copy.id(), material.id());
        assert_eq!(copy.core().name, "metal");
        assert_eq!(copy.metallic, 1.0);
        assert_eq!(copy.roughness, 0.1);
        assert!(copy.core().flags.contains(MaterialFlags::TWO_SIDED));
    }
}
