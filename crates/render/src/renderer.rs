use scrollscape_scene::{Appearance, Camera, Scene};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads scene and camera state and produces output. It never
/// mutates either; animation and interaction own those mutations.
pub trait SceneRenderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the given scene through the camera.
    fn render(&self, scene: &Scene, camera: &Camera) -> Self::Output;
}

/// Text renderer: a human-readable snapshot of the scene.
///
/// Useful for CLI output, logging, and testing the render interface
/// without a graphics device.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SceneRenderer for TextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, camera: &Camera) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Scene ({} objects) ===\n", scene.object_count()));
        out.push_str(&format!(
            "Camera: pos=({:.4}, {:.4}, {:.4}) yaw={:.4} fov={:.0}\n",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.rotation.y,
            camera.fov_y.to_degrees(),
        ));
        match scene.point_light() {
            Some(light) => {
                let p = light.position;
                out.push_str(&format!(
                    "Point light: ({:.1}, {:.1}, {:.1}) intensity={:.1}\n",
                    p.x, p.y, p.z, light.intensity
                ));
            }
            None => out.push_str("Point light: none\n"),
        }
        match scene.ambient_light() {
            Some(light) => {
                out.push_str(&format!("Ambient light: intensity={:.1}\n", light.intensity));
            }
            None => out.push_str("Ambient light: none\n"),
        }
        if let Some(background) = scene.background() {
            out.push_str(&format!("Background: {background}\n"));
        }

        for (id, object) in scene.objects() {
            let p = object.transform.position;
            let r = object.transform.rotation;
            let surface = match &object.appearance {
                Appearance::Flat(_) => "flat",
                Appearance::Textured { lit: true, .. } => "textured",
                Appearance::Textured { lit: false, .. } => "textured-unlit",
            };
            out.push_str(&format!(
                "  [{:>3}] {:<8} {:<14} pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3})\n",
                id.0,
                object.shape.label(),
                surface,
                p.x,
                p.y,
                p.z,
                r.x,
                r.y,
                r.z
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollscape_scene::{Showcase, ShowcaseConfig};

    #[test]
    fn text_renderer_empty_scene() {
        let scene = Scene::new();
        let camera = Camera::default();
        let output = TextRenderer::new().render(&scene, &camera);

        assert!(output.contains("0 objects"));
        assert!(output.contains("Point light: none"));
    }

    #[test]
    fn text_renderer_full_showcase() {
        let (scene, camera, _) = Showcase::build(&ShowcaseConfig::default());
        let output = TextRenderer::new().render(&scene, &camera);

        assert!(output.contains("203 objects"));
        assert!(output.contains("torus"));
        assert!(output.contains("textured-unlit"));
        assert!(output.contains("Background: space.png"));
        assert!(output.contains("fov=75"));
    }

    #[test]
    fn identical_scenes_render_identically() {
        let config = ShowcaseConfig::default();
        let (scene_a, camera_a, _) = Showcase::build(&config);
        let (scene_b, camera_b, _) = Showcase::build(&config);
        let renderer = TextRenderer::new();
        assert_eq!(
            renderer.render(&scene_a, &camera_a),
            renderer.render(&scene_b, &camera_b)
        );
    }
}
