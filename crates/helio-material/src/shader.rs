use crate::shader_lib::ShaderId;
use crate::uniforms::UniformSet;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Compile-time shader define value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShaderDefine {
    /// Marker define with no value (`#define NAME`)
    Flag,
    Bool(bool),
    U32(u32),
    F32(f32),
}

impl ShaderDefine {
    fn directive(&self, name: &str) -> String {
        match self {
            ShaderDefine::Flag => format!("#define {}", name),
            ShaderDefine::Bool(value) => format!("#define {} {}", name, *value as u32),
            ShaderDefine::U32(value) => format!("#define {} {}u", name, value),
            ShaderDefine::F32(value) => format!("#define {} {:?}", name, value),
        }
    }
}

/// Defines attached to a material, ordered by name.
pub type ShaderDefines = BTreeMap<String, ShaderDefine>;

/// Render `defines` as a block of `#define` lines.
pub fn defines_preamble(defines: &ShaderDefines) -> String {
    defines
        .iter()
        .map(|(name, value)| value.directive(name) + "\n")
        .collect()
}

/// Shader sources and uniforms for a program that is about to be compiled.
///
/// Materials receive this in [`Material::on_before_compile`](crate::Material::on_before_compile)
/// and may rewrite the template text or declare extra uniforms. Includes are
/// still unresolved at that point.
#[derive(Debug, Clone)]
pub struct CompileShader {
    pub shader_id: ShaderId,
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub uniforms: UniformSet,
}

impl CompileShader {
    pub fn new(shader_id: ShaderId, uniforms: UniformSet) -> Self {
        Self {
            shader_id,
            vertex_shader: shader_id.vertex_template().to_string(),
            fragment_shader: shader_id.fragment_template().to_string(),
            uniforms,
        }
    }

    pub fn source(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex_shader,
            ShaderStage::Fragment => &self.fragment_shader,
        }
    }

    pub fn source_mut(&mut self, stage: ShaderStage) -> &mut String {
        match stage {
            ShaderStage::Vertex => &mut self.vertex_shader,
            ShaderStage::Fragment => &mut self.fragment_shader,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_renders_each_define_kind() {
        let mut defines = ShaderDefines::new();
        defines.insert("USE_FOG".into(), ShaderDefine::Flag);
        defines.insert("DOUBLE_SIDED".into(), ShaderDefine::Bool(true));
        defines.insert("MAX_LIGHTS".into(), ShaderDefine::U32(8));
        defines.insert("ALPHA_CUTOFF".into(), ShaderDefine::F32(0.5));

        assert_eq!(
            defines_preamble(&defines),
            "#define ALPHA_CUTOFF 0.5\n#define DOUBLE_SIDED 1\n#define MAX_LIGHTS 8u\n#define USE_FOG\n"
        );
    }

    #[test]
    fn compile_shader_starts_from_templates() {
        let shader = CompileShader::new(ShaderId::Basic, UniformSet::new());
        assert_eq!(shader.source(ShaderStage::Vertex), ShaderId::Basic.vertex_template());
        assert_eq!(shader.source(ShaderStage::Fragment), ShaderId::Basic.fragment_template());
    }
}
