use crate::Renderer;
use glam::Vec3;
use helio_core::Camera;
use helio_material::Material;

/// Everything a render hook may look at or change for the object being drawn.
pub struct RenderHookContext<'a> {
    pub renderer: &'a mut Renderer,
    pub camera: &'a Camera,
    pub material: &'a mut dyn Material,
}

/// Per-object callback run once per frame around the object's draw
pub type RenderHook = Box<dyn FnMut(&mut RenderHookContext<'_>) + Send>;

/// A drawable object: a material placed in the world, plus optional hooks.
pub struct RenderObject {
    pub name: String,
    pub position: Vec3,
    /// Sort key within the opaque pass (ascending)
    pub render_order: i32,
    pub visible: bool,
    pub material: Box<dyn Material>,
    pub on_before_render: Option<RenderHook>,
    pub on_after_render: Option<RenderHook>,
}

impl RenderObject {
    pub fn new(name: impl Into<String>, material: impl Material + 'static) -> Self {
        Self {
            name: name.into(),
            position: Vec3::ZERO,
            render_order: 0,
            visible: true,
            material: Box::new(material),
            on_before_render: None,
            on_after_render: None,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_render_order(mut self, render_order: i32) -> Self {
        self.render_order = render_order;
        self
    }

    pub fn set_on_before_render(
        &mut self,
        hook: impl FnMut(&mut RenderHookContext<'_>) + Send + 'static,
    ) {
        self.on_before_render = Some(Box::new(hook));
    }

    pub fn set_on_after_render(
        &mut self,
        hook: impl FnMut(&mut RenderHookContext<'_>) + Send + 'static,
    ) {
        self.on_after_render = Some(Box::new(hook));
    }

    /// Typed access to the material, if it is an `M`.
    pub fn material_as<M: Material + 'static>(&self) -> Option<&M> {
        self.material.as_any().downcast_ref::<M>()
    }

    pub fn material_as_mut<M: Material + 'static>(&mut self) -> Option<&mut M> {
        self.material.as_any_mut().downcast_mut::<M>()
    }
}

impl std::fmt::Debug for RenderObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderObject")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("render_order", &self.render_order)
            .field("visible", &self.visible)
            .field("material", &self.material.id())
            .field("on_before_render", &self.on_before_render.is_some())
            .field("on_after_render", &self.on_after_render.is_some())
            .finish()
    }
}
