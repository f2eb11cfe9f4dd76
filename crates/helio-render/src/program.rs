use crate::{Error, Result};
use helio_core::ShaderChunkRegistry;
use helio_material::{defines_preamble, CompileShader, Material, ShaderId, UniformSet};

/// Prepended to every assembled stage
pub const GLSL_PREAMBLE: &str = "#version 300 es\nprecision highp float;\n";

/// Fully assembled program for one material version.
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    pub shader_id: ShaderId,
    /// Material version this program was built for
    pub version: u64,
    pub vertex_source: String,
    pub fragment_source: String,
    /// Live uniform values; writes here reach the GPU on the next upload.
    pub uniforms: UniformSet,
}

impl CompiledProgram {
    pub(crate) fn build(material: &dyn Material, chunks: &ShaderChunkRegistry) -> Result<Self> {
        let shader_id = material.shader_id();
        let mut shader = CompileShader::new(shader_id, material.uniforms());
        material.on_before_compile(&mut shader);

        let defines = material
            .core()
            .defines
            .as_ref()
            .map(defines_preamble)
            .unwrap_or_default();

        let resolve = |source: &str| {
            chunks.resolve(source).map_err(|source| Error::Shader {
                program: shader_id.name().to_string(),
                source,
            })
        };

        let vertex_source = format!("{}{}{}", GLSL_PREAMBLE, defines, resolve(&shader.vertex_shader)?);
        let fragment_source = format!("{}{}{}", GLSL_PREAMBLE, defines, resolve(&shader.fragment_shader)?);

        Ok(Self {
            shader_id,
            version: material.core().version(),
            vertex_source,
            fragment_source,
            uniforms: shader.uniforms,
        })
    }
}

/// Renderer-side state kept for each material it has drawn.
#[derive(Debug, Clone)]
pub struct MaterialProperties {
    pub program: CompiledProgram,
    /// Number of uniform block uploads issued for this material
    pub uniform_uploads: u64,
}

impl MaterialProperties {
    pub(crate) fn new(program: CompiledProgram) -> Self {
        Self {
            program,
            uniform_uploads: 0,
        }
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.program.uniforms
    }

    pub fn uniforms_mut(&mut self) -> &mut UniformSet {
        &mut self.program.uniforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helio_material::{BasicMaterial, ShaderDefine, BASE_CHUNKS};

    fn base_registry() -> ShaderChunkRegistry {
        ShaderChunkRegistry::with_chunks(BASE_CHUNKS.iter().copied())
    }

    #[test]
    fn program_has_preamble_defines_and_resolved_chunks() {
        let mut material = BasicMaterial::default();
        material.core_mut().set_define("USE_FOG", ShaderDefine::Flag);

        let program = CompiledProgram::build(&material, &base_registry()).unwrap();

        assert!(program.vertex_source.starts_with(GLSL_PREAMBLE));
        assert!(program.vertex_source.contains("#define USE_FOG\n"));
        assert!(program.fragment_source.contains("#define USE_FOG\n"));
        assert!(!program.fragment_source.contains("#include"));
        assert!(program.uniforms.contains("diffuse"));
        assert_eq!(program.version, material.core().version());
    }

    #[test]
    fn missing_chunk_names_the_program() {
        let err = CompiledProgram::build(&BasicMaterial::default(), &ShaderChunkRegistry::new())
            .unwrap_err();
        assert!(matches!(err, Error::Shader { ref program, .. } if program == "basic"));
    }
}
