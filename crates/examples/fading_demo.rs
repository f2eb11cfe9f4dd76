//! Distance fading walkthrough
//!
//! Builds a row of buildings with fading materials, pulls the camera back over
//! a few frames and logs which pass every object lands in. Pass a JSON scene
//! file as the first argument to replace the built-in one.
//!
//!   RUST_LOG=debug cargo run --bin fading_demo [scene.json]

use glam::Vec3;
use helio_core::Camera;
use helio_feature_fading::{
    FadingBasicMaterial, FadingFeatureParameters, FadingHookConfig, FadingHooks, FadingMaterial,
    FadingStandardMaterial, DEFAULT_FADE_FAR, DEFAULT_FADE_NEAR,
};
use helio_material::{BasicMaterialParameters, StandardMaterialParameters};
use helio_render::{RenderObject, RenderPass, Renderer, RendererConfig};
use serde::Deserialize;

const DEFAULT_SCENE: &str = r#"{
    "renderer": { "sort_objects": true },
    "far_plane": 500.0,
    "camera_step": 40.0,
    "frames": 4,
    "hooks": {
        "fade_near": 0.2,
        "fade_far": 0.6,
        "force_material_to_transparent": true,
        "update_uniforms": true
    },
    "objects": [
        { "name": "tower",     "kind": "standard", "position": [0.0, 0.0, -60.0],  "color": [0.7, 0.7, 0.8] },
        { "name": "warehouse", "kind": "standard", "position": [12.0, 0.0, -140.0], "color": [0.6, 0.4, 0.3] },
        { "name": "sign",      "kind": "basic",    "position": [-8.0, 4.0, -220.0], "color": [1.0, 0.9, 0.1] }
    ]
}"#;

#[derive(Debug, Deserialize)]
struct SceneConfig {
    #[serde(default)]
    renderer: RendererConfig,
    far_plane: f32,
    camera_step: f32,
    frames: u32,
    hooks: FadingHookConfig,
    objects: Vec<ObjectConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MaterialKind {
    Basic,
    Standard,
}

#[derive(Debug, Deserialize)]
struct ObjectConfig {
    name: String,
    kind: MaterialKind,
    position: [f32; 3],
    color: [f32; 3],
}

impl ObjectConfig {
    fn build(&self, hooks: FadingHookConfig) -> RenderObject {
        let color = Vec3::from(self.color);
        let mut object = match self.kind {
            MaterialKind::Basic => RenderObject::new(
                self.name.as_str(),
                FadingBasicMaterial::new(
                    BasicMaterialParameters {
                        name: self.name.clone(),
                        color,
                        ..Default::default()
                    },
                    FadingFeatureParameters::default(),
                ),
            ),
            MaterialKind::Standard => RenderObject::new(
                self.name.as_str(),
                FadingStandardMaterial::new(
                    StandardMaterialParameters {
                        name: self.name.clone(),
                        base_color: color,
                        ..Default::default()
                    },
                    FadingFeatureParameters::default(),
                ),
            ),
        }
        .with_position(Vec3::from(self.position));

        let name = self.name.clone();
        FadingHooks::new(hooks)
            .with_callback(move |renderer, material| {
                log::trace!(
                    "Frame {}: '{}' before draw (version {})",
                    renderer.frame(),
                    name,
                    material.core().version()
                );
            })
            .attach(&mut object);
        object
    }
}

fn load_scene() -> Result<SceneConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading scene from {}", path);
            let text = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(serde_json::from_str(DEFAULT_SCENE)?),
    }
}

fn fade_distances(object: &RenderObject) -> Option<(f32, f32)> {
    if let Some(material) = object.material_as::<FadingStandardMaterial>() {
        return Some((material.fade_near(), material.fade_far()));
    }
    object
        .material_as::<FadingBasicMaterial>()
        .map(|material| (material.fade_near(), material.fade_far()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Starting Helio fading demo");

    let scene = load_scene()?;
    let mut renderer = Renderer::new(scene.renderer.clone());
    let mut objects: Vec<RenderObject> = scene
        .objects
        .iter()
        .map(|object| object.build(scene.hooks))
        .collect();
    log::info!("Scene created with {} objects", objects.len());

    let mut camera = Camera::default();
    camera.set_far_plane(scene.far_plane);

    for step in 0..scene.frames {
        camera.position = Vec3::new(0.0, 2.0, step as f32 * scene.camera_step);
        let report = renderer.render(&mut objects, &camera)?;

        log::info!(
            "Frame {}: {} opaque, {} transparent, {} programs built, {} uploads ({} bytes)",
            report.frame,
            report.draws_in(RenderPass::Opaque).count(),
            report.draws_in(RenderPass::Transparent).count(),
            report.programs_built,
            report.uniform_uploads,
            report.uploaded_bytes
        );
        for draw in &report.draws {
            let object = &objects[draw.object];
            let (near, far) =
                fade_distances(object).unwrap_or((DEFAULT_FADE_NEAR, DEFAULT_FADE_FAR));
            log::info!(
                "  {:<10} {:?} depth {:>7.1} fade {:.1}..{:.1}",
                object.name,
                draw.pass,
                draw.view_depth,
                near,
                far
            );
        }
    }

    if let Some(props) = objects
        .first()
        .and_then(|object| renderer.material_properties(object.material.id()))
    {
        log::debug!("Fragment shader for '{}':\n{}", objects[0].name, props.program.fragment_source);
    }

    log::info!("Fading demo finished");
    Ok(())
}
