//! Textual patch that wires the fading chunks into the base templates.
//!
//! The base templates have no injection points for fading. The patch finds
//! the fog include directives by literal text and inserts the matching
//! fading include right after each one. This only works against the template
//! layout named by [`TARGET_SHADER_LIBRARY`]; a template that no longer
//! contains an anchor silently compiles without that part of the fade.

use crate::chunks::{FADING_FRAGMENT, FADING_PARS_FRAGMENT, FADING_PARS_VERTEX, FADING_VERTEX};
use crate::params::{UNIFORM_FADE_FAR, UNIFORM_FADE_NEAR};
use crate::state::FadingState;
use helio_core::include_directive;
use helio_material::{CompileShader, ShaderStage, UniformValue};

/// Base shader library layout the anchors below were written against
pub const TARGET_SHADER_LIBRARY: &str = "helio-shaderlib/1";

pub const PATCH_BEGIN: &str = "// <fading>";
pub const PATCH_END: &str = "// </fading>";

/// One include inserted after an existing include directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadingAnchor {
    pub stage: ShaderStage,
    /// Directive text matched verbatim
    pub anchor: &'static str,
    /// Chunk whose include is inserted after the anchor
    pub chunk: &'static str,
    /// Body insertions get a leading tab, declaration insertions do not
    pub indented: bool,
}

pub const FADING_ANCHORS: [FadingAnchor; 4] = [
    FadingAnchor {
        stage: ShaderStage::Vertex,
        anchor: "#include <fog_pars_vertex>",
        chunk: FADING_PARS_VERTEX,
        indented: false,
    },
    FadingAnchor {
        stage: ShaderStage::Vertex,
        anchor: "#include <fog_vertex>",
        chunk: FADING_VERTEX,
        indented: true,
    },
    FadingAnchor {
        stage: ShaderStage::Fragment,
        anchor: "#include <fog_pars_fragment>",
        chunk: FADING_PARS_FRAGMENT,
        indented: false,
    },
    FadingAnchor {
        stage: ShaderStage::Fragment,
        anchor: "#include <fog_fragment>",
        chunk: FADING_FRAGMENT,
        indented: true,
    },
];

/// What a call to [`patch_fading_shader`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderPatch {
    /// Chunks inserted
    pub applied: Vec<&'static str>,
    /// Anchors that were not found
    pub missing: Vec<&'static str>,
}

impl ShaderPatch {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty() && self.missing.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.applied.len() == FADING_ANCHORS.len()
    }
}

/// Insert `#include <chunk>` after the first occurrence of `anchor`.
///
/// Returns `false` and leaves `source` untouched if `anchor` is absent.
pub fn insert_after_anchor(source: &mut String, anchor: &str, chunk: &str, indented: bool) -> bool {
    let Some(start) = source.find(anchor) else {
        return false;
    };
    let indent = if indented { "\t" } else { "" };
    let insertion = format!(
        "\n{}\n{}{}\n{}",
        PATCH_BEGIN,
        indent,
        include_directive(chunk),
        PATCH_END
    );
    source.insert_str(start + anchor.len(), &insertion);
    true
}

/// Compile-time hook body for fading materials.
///
/// Does nothing unless the patch is installed on the material and
/// `fade_far > 0`. Otherwise declares the `fadeNear`/`fadeFar` uniforms with
/// the current values and inserts the four fading includes.
pub fn patch_fading_shader(state: &FadingState, shader: &mut CompileShader) -> ShaderPatch {
    let mut patch = ShaderPatch::default();
    if !state.is_installed() || !state.is_enabled() {
        return patch;
    }

    shader
        .uniforms
        .insert(UNIFORM_FADE_NEAR, UniformValue::Float(state.fade_near()));
    shader
        .uniforms
        .insert(UNIFORM_FADE_FAR, UniformValue::Float(state.fade_far()));

    for anchor in FADING_ANCHORS {
        let source = shader.source_mut(anchor.stage);
        if insert_after_anchor(source, anchor.anchor, anchor.chunk, anchor.indented) {
            patch.applied.push(anchor.chunk);
        } else {
            log::warn!(
                "Fading anchor '{}' not found in '{}' {:?} shader; expected layout {}",
                anchor.anchor,
                shader.shader_id.name(),
                anchor.stage,
                TARGET_SHADER_LIBRARY
            );
            patch.missing.push(anchor.anchor);
        }
    }

    patch
}
