//! Fading shader chunks and their one-time registration

use helio_material::shader_chunks;
use std::sync::Once;

pub const FADING_PARS_VERTEX: &str = "fading_pars_vertex";
pub const FADING_VERTEX: &str = "fading_vertex";
pub const FADING_PARS_FRAGMENT: &str = "fading_pars_fragment";
pub const FADING_FRAGMENT: &str = "fading_fragment";

pub const FADING_CHUNKS: [(&str, &str); 4] = [
    (FADING_PARS_VERTEX, include_str!("../shaders/fading_pars_vertex.glsl")),
    (FADING_VERTEX, include_str!("../shaders/fading_vertex.glsl")),
    (FADING_PARS_FRAGMENT, include_str!("../shaders/fading_pars_fragment.glsl")),
    (FADING_FRAGMENT, include_str!("../shaders/fading_fragment.glsl")),
];

static INSTALL: Once = Once::new();

/// Add the fading chunks to the global shader chunk registry.
///
/// Only the first call in the process touches the registry; it returns
/// `true`, every later call returns `false`. Concurrent callers block until
/// the first one has finished.
pub fn install_fading_chunks() -> bool {
    let mut installed = false;
    INSTALL.call_once(|| {
        let mut registry = shader_chunks().write();
        for (name, source) in FADING_CHUNKS {
            registry.insert(name, source);
        }
        log::debug!("Registered {} fading shader chunks", FADING_CHUNKS.len());
        installed = true;
    });
    installed
}

pub fn fading_chunks_installed() -> bool {
    INSTALL.is_completed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FadingBasicMaterial, FadingStandardMaterial};

    #[test]
    fn chunks_are_registered_once_across_constructions() {
        install_fading_chunks();
        assert!(fading_chunks_installed());
        let revision = shader_chunks().read().revision();

        let _a = FadingBasicMaterial::default();
        let _b = FadingStandardMaterial::default();
        let _c = FadingBasicMaterial::default().clone();

        assert_eq!(shader_chunks().read().revision(), revision);
        assert!(!install_fading_chunks());

        let registry = shader_chunks().read();
        for (name, source) in FADING_CHUNKS {
            assert_eq!(registry.get(name), Some(source));
        }
    }
}
