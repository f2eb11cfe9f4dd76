use crate::shader::{CompileShader, ShaderDefine, ShaderDefines};
use crate::shader_lib::ShaderId;
use crate::uniforms::UniformSet;
use bitflags::bitflags;
use std::sync::atomic::{AtomicU64, Ordering};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MaterialFlags: u32 {
        const TWO_SIDED = 1 << 0;
        const DEPTH_TEST = 1 << 1;
        const DEPTH_WRITE = 1 << 2;
    }
}

impl Default for MaterialFlags {
    fn default() -> Self {
        MaterialFlags::DEPTH_TEST | MaterialFlags::DEPTH_WRITE
    }
}

/// Identity of a material instance, used by the renderer to cache programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(u64);

impl MaterialId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// State shared by every material type.
#[derive(Debug)]
pub struct MaterialCore {
    id: MaterialId,
    pub name: String,
    /// Drawn in the transparent pass when set.
    pub transparent: bool,
    pub opacity: f32,
    pub flags: MaterialFlags,
    /// Created on first use; most materials never need any.
    pub defines: Option<ShaderDefines>,
    /// Uniform values changed without a recompile; cleared by the renderer on upload.
    pub uniforms_need_update: bool,
    version: u64,
}

impl MaterialCore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MaterialId::next(),
            name: name.into(),
            transparent: false,
            opacity: 1.0,
            flags: MaterialFlags::default(),
            defines: None,
            uniforms_need_update: false,
            version: 0,
        }
    }

    pub fn id(&self) -> MaterialId {
        self.id
    }

    /// Bumped every time the program has to be rebuilt.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Request a program rebuild on the next draw.
    pub fn set_needs_update(&mut self) {
        self.version += 1;
    }

    /// The defines map, created if it does not exist yet.
    pub fn defines_mut(&mut self) -> &mut ShaderDefines {
        self.defines.get_or_insert_with(ShaderDefines::new)
    }

    pub fn has_define(&self, name: &str) -> bool {
        self.defines
            .as_ref()
            .is_some_and(|defines| defines.contains_key(name))
    }

    pub fn set_define(&mut self, name: &str, value: ShaderDefine) {
        self.defines_mut().insert(name.to_string(), value);
    }

    pub fn remove_define(&mut self, name: &str) -> Option<ShaderDefine> {
        self.defines.as_mut().and_then(|defines| defines.remove(name))
    }

    /// Copy everything except identity from `source`.
    pub fn copy_from(&mut self, source: &MaterialCore) {
        self.name = source.name.clone();
        self.transparent = source.transparent;
        self.opacity = source.opacity;
        self.flags = source.flags;
        self.defines = source.defines.clone();
        self.set_needs_update();
    }
}

/// A surface description the renderer can build a program for.
///
/// The renderer calls [`on_before_compile`](Material::on_before_compile) each
/// time it (re)builds the program for a material whose
/// [`version`](MaterialCore::version) changed.
pub trait Material: Send + Sync + AsAny {
    fn core(&self) -> &MaterialCore;

    fn core_mut(&mut self) -> &mut MaterialCore;

    /// Template the program is built from
    fn shader_id(&self) -> ShaderId;

    /// Uniform values the material feeds its program
    fn uniforms(&self) -> UniformSet;

    /// Last chance to edit template text and uniforms before includes are resolved
    fn on_before_compile(&self, shader: &mut CompileShader) {
        let _ = shader;
    }

    fn id(&self) -> MaterialId {
        self.core().id()
    }

    fn is_transparent(&self) -> bool {
        self.core().transparent
    }
}

/// Helper trait for downcasting material trait objects
pub trait AsAny {
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

impl<T: Material + 'static> AsAny for T {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
