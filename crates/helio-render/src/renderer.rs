use crate::object::{RenderHookContext, RenderObject};
use crate::program::{CompiledProgram, MaterialProperties};
use crate::Result;
use helio_core::Camera;
use helio_material::{shader_chunks, Material, MaterialFlags, MaterialId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Sort opaque draws by render order and transparent draws back to front
    pub sort_objects: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self { sort_objects: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPass {
    Opaque,
    Transparent,
}

/// One recorded draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Index into the object slice passed to [`Renderer::render`]
    pub object: usize,
    pub material: MaterialId,
    pub pass: RenderPass,
    pub flags: MaterialFlags,
    pub program_version: u64,
    pub render_order: i32,
    pub view_depth: f32,
}

/// Summary of one [`Renderer::render`] call
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub frame: u64,
    /// Opaque draws followed by transparent draws, in submission order
    pub draws: Vec<DrawCall>,
    pub programs_built: usize,
    pub uniform_uploads: usize,
    pub uploaded_bytes: usize,
}

impl FrameReport {
    pub fn draws_in(&self, pass: RenderPass) -> impl Iterator<Item = &DrawCall> {
        self.draws.iter().filter(move |draw| draw.pass == pass)
    }

    pub fn draw_for(&self, object: usize) -> Option<&DrawCall> {
        self.draws.iter().find(|draw| draw.object == object)
    }
}

pub struct Renderer {
    config: RendererConfig,
    properties: HashMap<MaterialId, MaterialProperties>,
    frame: u64,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            properties: HashMap::new(),
            frame: 0,
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Number of frames rendered so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Cached state for a material, present once it has been drawn or compiled.
    pub fn material_properties(&self, id: MaterialId) -> Option<&MaterialProperties> {
        self.properties.get(&id)
    }

    pub fn material_properties_mut(&mut self, id: MaterialId) -> Option<&mut MaterialProperties> {
        self.properties.get_mut(&id)
    }

    /// Drop cached state for a material that is no longer used.
    pub fn dispose_material(&mut self, id: MaterialId) -> bool {
        self.properties.remove(&id).is_some()
    }

    /// Build the program for `material` unless the cached one is current.
    ///
    /// Returns `true` when a new program was built.
    pub fn compile(&mut self, material: &dyn Material) -> Result<bool> {
        let id = material.id();
        let version = material.core().version();
        if let Some(props) = self.properties.get(&id) {
            if props.program.version == version {
                log::trace!("Using cached program for material {:?}", id);
                return Ok(false);
            }
        }

        log::debug!(
            "Building '{}' program for material '{}' (version {})",
            material.shader_id().name(),
            material.core().name,
            version
        );

        let program = {
            let chunks = shader_chunks().read();
            CompiledProgram::build(material, &chunks)?
        };

        match self.properties.get_mut(&id) {
            Some(props) => props.program = program,
            None => {
                self.properties.insert(id, MaterialProperties::new(program));
            }
        }
        Ok(true)
    }

    /// Record draws for every visible object.
    ///
    /// For each object, in slice order: the before-render hook runs, the
    /// program is rebuilt if the material changed, dirty uniforms are
    /// uploaded, the draw is assigned to a pass from the material's
    /// `transparent` flag, and the after-render hook runs.
    pub fn render(&mut self, objects: &mut [RenderObject], camera: &Camera) -> Result<FrameReport> {
        camera.validate().map_err(crate::Error::Camera)?;

        self.frame += 1;
        let mut report = FrameReport {
            frame: self.frame,
            ..Default::default()
        };
        let mut opaque = Vec::new();
        let mut transparent = Vec::new();

        for (index, object) in objects.iter_mut().enumerate() {
            if !object.visible {
                continue;
            }

            if let Some(hook) = object.on_before_render.as_mut() {
                let mut ctx = RenderHookContext {
                    renderer: &mut *self,
                    camera,
                    material: object.material.as_mut(),
                };
                hook(&mut ctx);
            }

            let material = object.material.as_mut();
            let built = self.compile(&*material)?;
            if built {
                report.programs_built += 1;
            }

            let id = material.id();
            let Some(props) = self.properties.get_mut(&id) else {
                continue;
            };
            props.program.uniforms.extend(&material.uniforms());
            if built || material.core().uniforms_need_update {
                let bytes = props.program.uniforms.to_bytes();
                props.uniform_uploads += 1;
                report.uniform_uploads += 1;
                report.uploaded_bytes += bytes.len();
                material.core_mut().uniforms_need_update = false;
            }

            let pass = if material.is_transparent() {
                RenderPass::Transparent
            } else {
                RenderPass::Opaque
            };
            let draw = DrawCall {
                object: index,
                material: id,
                pass,
                flags: material.core().flags,
                program_version: props.program.version,
                render_order: object.render_order,
                view_depth: camera.view_depth(object.position),
            };
            match pass {
                RenderPass::Opaque => opaque.push(draw),
                RenderPass::Transparent => transparent.push(draw),
            }

            if let Some(hook) = object.on_after_render.as_mut() {
                let mut ctx = RenderHookContext {
                    renderer: &mut *self,
                    camera,
                    material: object.material.as_mut(),
                };
                hook(&mut ctx);
            }
        }

        if self.config.sort_objects {
            opaque.sort_by_key(|draw: &DrawCall| draw.render_order);
            transparent.sort_by(|a, b| b.view_depth.total_cmp(&a.view_depth));
        }

        report.draws = opaque;
        report.draws.extend(transparent);

        log::trace!(
            "Frame {}: {} draws, {} programs built, {} uniform uploads",
            report.frame,
            report.draws.len(),
            report.programs_built,
            report.uniform_uploads
        );
        Ok(report)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use helio_material::{BasicMaterial, BasicMaterialParameters, StandardMaterial};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn transparent_basic() -> BasicMaterial {
        BasicMaterial::new(BasicMaterialParameters {
            transparent: true,
            ..Default::default()
        })
    }

    #[test]
    fn programs_are_cached_until_the_material_changes() {
        let mut renderer = Renderer::default();
        let camera = Camera::default();
        let mut objects = vec![RenderObject::new("cube", StandardMaterial::default())];

        let first = renderer.render(&mut objects, &camera).unwrap();
        assert_eq!(first.programs_built, 1);
        assert_eq!(first.uniform_uploads, 1);

        let second = renderer.render(&mut objects, &camera).unwrap();
        assert_eq!(second.programs_built, 0);
        assert_eq!(second.uniform_uploads, 0);

        objects[0].material.core_mut().set_needs_update();
        let third = renderer.render(&mut objects, &camera).unwrap();
        assert_eq!(third.programs_built, 1);
        assert_eq!(renderer.frame(), 3);
    }

    #[test]
    fn uniform_flag_triggers_upload_without_rebuild() {
        let mut renderer = Renderer::default();
        let camera = Camera::default();
        let mut objects = vec![RenderObject::new("quad", BasicMaterial::default())];
        renderer.render(&mut objects, &camera).unwrap();

        objects[0].material.core_mut().uniforms_need_update = true;
        let report = renderer.render(&mut objects, &camera).unwrap();

        assert_eq!(report.programs_built, 0);
        assert_eq!(report.uniform_uploads, 1);
        assert!(report.uploaded_bytes > 0);
        assert!(!objects[0].material.core().uniforms_need_update);
    }

    #[test]
    fn transparent_draws_follow_opaque_back_to_front() {
        let mut renderer = Renderer::default();
        let camera = Camera::default();
        let mut objects = vec![
            RenderObject::new("near glass", transparent_basic()).with_position(Vec3::new(0.0, 0.0, -5.0)),
            RenderObject::new("wall", BasicMaterial::default()).with_render_order(2),
            RenderObject::new("far glass", transparent_basic()).with_position(Vec3::new(0.0, 0.0, -50.0)),
            RenderObject::new("floor", BasicMaterial::default()).with_render_order(1),
        ];

        let report = renderer.render(&mut objects, &camera).unwrap();
        let order: Vec<usize> = report.draws.iter().map(|draw| draw.object).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
        assert_eq!(report.draws_in(RenderPass::Transparent).count(), 2);
    }

    #[test]
    fn hooks_run_around_each_visible_draw() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut renderer = Renderer::default();
        let camera = Camera::default();

        let mut hidden = RenderObject::new("hidden", BasicMaterial::default());
        hidden.visible = false;
        let mut shown = RenderObject::new("shown", BasicMaterial::default());

        for object in [&mut hidden, &mut shown] {
            let before = calls.clone();
            object.set_on_before_render(move |ctx| {
                before.fetch_add(1, Ordering::SeqCst);
                ctx.material.core_mut().transparent = true;
            });
            let after = calls.clone();
            object.set_on_after_render(move |ctx| {
                after.fetch_add(10, Ordering::SeqCst);
                ctx.material.core_mut().transparent = false;
            });
        }

        let mut objects = vec![hidden, shown];
        let report = renderer.render(&mut objects, &camera).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 11);
        assert_eq!(report.draws.len(), 1);
        assert_eq!(report.draws[0].pass, RenderPass::Transparent);
        assert!(!objects[1].material.is_transparent());
    }

    #[test]
    fn invalid_camera_is_rejected() {
        let mut renderer = Renderer::default();
        let camera = Camera::new_perspective(1.0, 1.0, 1.0, 0.5);
        let mut objects = vec![RenderObject::new("cube", BasicMaterial::default())];
        assert!(matches!(
            renderer.render(&mut objects, &camera),
            Err(crate::Error::Camera(_))
        ));
        assert_eq!(renderer.frame(), 0);
    }

    struct BrokenIncludeMaterial(BasicMaterial);

    impl Material for BrokenIncludeMaterial {
        fn core(&self) -> &helio_material::MaterialCore {
            self.0.core()
        }

        fn core_mut(&mut self) -> &mut helio_material::MaterialCore {
            self.0.core_mut()
        }

        fn shader_id(&self) -> helio_material::ShaderId {
            self.0.shader_id()
        }

        fn uniforms(&self) -> helio_material::UniformSet {
            self.0.uniforms()
        }

        fn on_before_compile(&self, shader: &mut helio_material::CompileShader) {
            shader.vertex_shader.push_str("\n#include <no_such_chunk>\n");
        }
    }

    #[test]
    fn unresolved_include_is_a_shader_error() {
        let mut renderer = Renderer::default();
        let mut objects = vec![RenderObject::new(
            "broken",
            BrokenIncludeMaterial(BasicMaterial::default()),
        )];
        let err = renderer.render(&mut objects, &Camera::default()).unwrap_err();
        assert!(matches!(err, crate::Error::Shader { ref program, .. } if program == "basic"));
        assert!(!err.to_string().starts_with("Camera error"));
    }

    #[test]
    fn dispose_forgets_cached_program() {
        let mut renderer = Renderer::default();
        let material = BasicMaterial::default();
        assert!(renderer.compile(&material).unwrap());
        assert!(!renderer.compile(&material).unwrap());
        assert!(renderer.material_properties(material.id()).is_some());
        assert!(renderer.dispose_material(material.id()));
        assert!(renderer.material_properties(material.id()).is_none());
    }
}
