//! Per-frame hooks that keep fading materials in sync with the camera

use crate::materials::as_fading_material_mut;
use crate::params::{DEFAULT_FADE_FAR, DEFAULT_FADE_NEAR, UNIFORM_FADE_FAR, UNIFORM_FADE_NEAR};
use crate::state::FadingMaterial;
use helio_core::Camera;
use helio_material::{Material, UniformValue};
use helio_render::{RenderHookContext, RenderObject, Renderer};
use serde::{Deserialize, Serialize};

/// Caller callback run at the end of the before-render hook
pub type AdditionalCallback = Box<dyn FnMut(&mut Renderer, &mut dyn Material) + Send>;

/// Finds the fading capability of an object's material
pub type FadingMaterialResolver = fn(&mut dyn Material) -> Option<&mut dyn FadingMaterial>;

/// Hook settings. Fade distances are fractions of the camera far plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadingHookConfig {
    pub fade_near: Option<f32>,
    pub fade_far: Option<f32>,
    /// Draw the object in the transparent pass, but only for its own draw
    pub force_material_to_transparent: bool,
    /// Write the distances straight into the live program's uniforms
    pub update_uniforms: bool,
}

impl FadingHookConfig {
    /// World-space `(near, far)` for `camera`, or the disabled sentinels for unset values.
    pub fn world_distances(&self, camera: &Camera) -> (f32, f32) {
        let near = self
            .fade_near
            .map_or(DEFAULT_FADE_NEAR, |near| near * camera.far_plane);
        let far = self
            .fade_far
            .map_or(DEFAULT_FADE_FAR, |far| far * camera.far_plane);
        (near, far)
    }
}

/// Before/after-render hooks for one object.
///
/// ```ignore
/// FadingHooks::new(FadingHookConfig {
///     fade_near: Some(0.1),
///     fade_far: Some(0.5),
///     force_material_to_transparent: true,
///     update_uniforms: true,
/// })
/// .attach(&mut object);
/// ```
pub struct FadingHooks {
    config: FadingHookConfig,
    callback: Option<AdditionalCallback>,
    resolver: FadingMaterialResolver,
}

impl FadingHooks {
    pub fn new(config: FadingHookConfig) -> Self {
        Self {
            config,
            callback: None,
            resolver: as_fading_material_mut,
        }
    }

    pub fn with_callback(
        mut self,
        callback: impl FnMut(&mut Renderer, &mut dyn Material) + Send + 'static,
    ) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Use a custom lookup for fading materials defined outside this crate.
    pub fn with_resolver(mut self, resolver: FadingMaterialResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &FadingHookConfig {
        &self.config
    }

    /// Install both hooks on `object`. Hooks the object already has keep
    /// running, ahead of the fading work.
    pub fn attach(self, object: &mut RenderObject) {
        let FadingHooks {
            config,
            mut callback,
            resolver,
        } = self;
        let mut reported = false;
        let name = object.name.clone();
        let mut previous_before = object.on_before_render.take();
        let mut previous_after = object.on_after_render.take();

        object.set_on_before_render(move |ctx| {
            if let Some(hook) = previous_before.as_mut() {
                hook(&mut *ctx);
            }
            before_render(&config, resolver, callback.as_mut(), ctx, &mut || {
                if !reported {
                    log::debug!("Object '{}' has no fading material; skipping fade update", name);
                    reported = true;
                }
            });
        });

        object.set_on_after_render(move |ctx| {
            if let Some(hook) = previous_after.as_mut() {
                hook(&mut *ctx);
            }
            if config.force_material_to_transparent {
                ctx.material.core_mut().transparent = false;
            }
        });
    }
}

fn before_render(
    config: &FadingHookConfig,
    resolver: FadingMaterialResolver,
    callback: Option<&mut AdditionalCallback>,
    ctx: &mut RenderHookContext<'_>,
    on_unresolved: &mut dyn FnMut(),
) {
    if config.force_material_to_transparent {
        ctx.material.core_mut().transparent = true;
    }

    let (fade_near, fade_far) = config.world_distances(ctx.camera);
    match resolver(&mut *ctx.material) {
        Some(material) => {
            material.set_fade_near(fade_near);
            material.set_fade_far(fade_far);
        }
        None => on_unresolved(),
    }

    if config.update_uniforms {
        if let Some(props) = ctx.renderer.material_properties_mut(ctx.material.id()) {
            let uniforms = props.uniforms_mut();
            let near_set = uniforms.set(UNIFORM_FADE_NEAR, UniformValue::Float(fade_near));
            let far_set = uniforms.set(UNIFORM_FADE_FAR, UniformValue::Float(fade_far));
            if near_set || far_set {
                ctx.material.core_mut().uniforms_need_update = true;
            }
        }
    }

    if let Some(callback) = callback {
        callback(&mut *ctx.renderer, &mut *ctx.material);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_scale_with_far_plane() {
        let camera = Camera::new_perspective(1.0, 1.0, 0.1, 1000.0);
        let config = FadingHookConfig {
            fade_near: Some(0.1),
            fade_far: Some(0.5),
            ..Default::default()
        };
        assert_eq!(config.world_distances(&camera), (100.0, 500.0));
    }

    #[test]
    fn unset_distances_use_sentinels() {
        let camera = Camera::default();
        let config = FadingHookConfig::default();
        assert_eq!(config.world_distances(&camera), (DEFAULT_FADE_NEAR, DEFAULT_FADE_FAR));

        let far_only = FadingHookConfig {
            fade_far: Some(1.0),
            ..Default::default()
        };
        assert_eq!(far_only.world_distances(&camera), (DEFAULT_FADE_NEAR, camera.far_plane));
    }

    #[test]
    fn config_from_json() {
        let config: FadingHookConfig = serde_json::from_str(
            r#"{ "fade_near": 0.25, "fade_far": 0.75, "force_material_to_transparent": true }"#,
        )
        .unwrap();
        assert_eq!(config.fade_near, Some(0.25));
        assert!(config.force_material_to_transparent);
        assert!(!config.update_uniforms);
    }
}
