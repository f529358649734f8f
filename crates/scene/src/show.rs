use glam::Vec3;
use scrollscape_common::{Color, ObjectId};
use tracing::debug;

use crate::camera::Camera;
use crate::graph::Scene;
use crate::light::{AmbientLight, PointLight};
use crate::object::{Appearance, SceneObject, Shape};
use crate::starfield;

/// Torus rotation applied once per rendered frame (radians/frame).
///
/// Deliberately per-frame rather than per-second: the spin speed follows
/// the display refresh rate.
pub const TORUS_FRAME_SPIN: Vec3 = Vec3::new(0.01, 0.005, 0.01);

/// Moon rotation applied once per scroll event (radians/event).
pub const MOON_SCROLL_SPIN: Vec3 = Vec3::new(0.05, 0.075, 0.05);

/// Avatar cube rotation applied once per scroll event (radians/event).
pub const AVATAR_SCROLL_SPIN: Vec3 = Vec3::new(0.0, 0.01, 0.01);

/// Camera dolly per unit of scroll offset: `position.z = t * CAMERA_DOLLY_RATE`.
pub const CAMERA_DOLLY_RATE: f32 = -0.01;

/// Camera sidestep per unit of scroll offset: `position.x = t * CAMERA_TRUCK_RATE`.
pub const CAMERA_TRUCK_RATE: f32 = -0.0002;

/// Camera yaw per unit of scroll offset: `rotation.y = t * CAMERA_YAW_RATE`.
pub const CAMERA_YAW_RATE: f32 = -0.0002;

/// Everything needed to build the showcase scene.
///
/// The texture fields name image files; the renderer resolves them against
/// its asset directory and falls back to flat placeholders when a file is
/// missing or unreadable.
#[derive(Debug, Clone)]
pub struct ShowcaseConfig {
    pub star_count: usize,
    pub star_spread: f32,
    pub star_seed: u64,
    pub background: String,
    pub avatar_map: String,
    pub moon_map: String,
    pub moon_normal_map: String,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            star_count: 200,
            star_spread: 100.0,
            star_seed: 1,
            background: "space.png".to_string(),
            avatar_map: "avatar.png".to_string(),
            moon_map: "moon.png".to_string(),
            moon_normal_map: "moon_normal.png".to_string(),
        }
    }
}

/// Handles to the three animated objects of the showcase scene.
///
/// [`Showcase::build`] owns scene construction end to end and returns a
/// fresh container each time, so rebuilding (a dev-loop restart, a test)
/// can never double-populate an existing scene.
#[derive(Debug, Clone)]
pub struct Showcase {
    torus: ObjectId,
    avatar: ObjectId,
    moon: ObjectId,
    star_count: usize,
}

impl Showcase {
    /// Build the complete scene: tomato torus, lights, starfield,
    /// background, avatar cube, and the moon. Returns the populated
    /// container, the camera (dollied back to z = 30), and the handles.
    pub fn build(config: &ShowcaseConfig) -> (Scene, Camera, Showcase) {
        let mut scene = Scene::new();

        let torus = scene.add(SceneObject::new(
            Shape::Torus {
                radius: 10.0,
                tube: 3.0,
                radial_segments: 16,
                tubular_segments: 100,
            },
            Appearance::Flat(Color::from_hex(0xFF6347)),
        ));

        scene.set_point_light(PointLight {
            position: Vec3::new(5.0, 5.0, 5.0),
            ..PointLight::default()
        });
        scene.set_ambient_light(AmbientLight::default());

        let stars = starfield::scatter(
            &mut scene,
            config.star_count,
            config.star_spread,
            config.star_seed,
        );

        scene.set_background(config.background.clone());

        let avatar = scene.add(SceneObject::new(
            Shape::Cuboid {
                width: 3.0,
                height: 3.0,
                depth: 3.0,
            },
            Appearance::textured_unlit(config.avatar_map.clone()),
        ));

        let mut moon = SceneObject::new(
            Shape::Sphere {
                radius: 3.0,
                width_segments: 32,
                height_segments: 32,
            },
            Appearance::textured_with_normal(
                config.moon_map.clone(),
                config.moon_normal_map.clone(),
            ),
        );
        moon.transform.position = Vec3::new(-10.0, 0.0, 30.0);
        let moon = scene.add(moon);

        let camera = Camera {
            position: Vec3::new(0.0, 0.0, 30.0),
            ..Camera::default()
        };

        debug!(
            objects = scene.object_count(),
            stars = stars.len(),
            "showcase scene built"
        );

        let showcase = Showcase {
            torus,
            avatar,
            moon,
            star_count: stars.len(),
        };
        (scene, camera, showcase)
    }

    pub fn torus(&self) -> ObjectId {
        self.torus
    }

    pub fn avatar(&self) -> ObjectId {
        self.avatar
    }

    pub fn moon(&self) -> ObjectId {
        self.moon
    }

    pub fn star_count(&self) -> usize {
        self.star_count
    }

    /// Per-frame update: spin the torus by its fixed deltas.
    ///
    /// Takes no elapsed time on purpose; one call is one frame.
    pub fn advance_frame(&self, scene: &mut Scene) {
        if let Some(torus) = scene.object_mut(self.torus) {
            torus.transform.rotation += TORUS_FRAME_SPIN;
        }
    }

    /// Scroll response for offset `t` (0 at the top of the page, more
    /// negative further down).
    ///
    /// Moon and avatar rotations accumulate per call; the camera terms are
    /// recomputed from `t` alone, so dropped or repeated events cause no
    /// drift. `camera.position.y`, pitch, and roll are left untouched.
    pub fn apply_scroll(&self, scene: &mut Scene, camera: &mut Camera, t: f32) {
        if let Some(moon) = scene.object_mut(self.moon) {
            moon.transform.rotation += MOON_SCROLL_SPIN;
        }
        if let Some(avatar) = scene.object_mut(self.avatar) {
            avatar.transform.rotation += AVATAR_SCROLL_SPIN;
        }
        camera.position.z = t * CAMERA_DOLLY_RATE;
        camera.position.x = t * CAMERA_TRUCK_RATE;
        camera.rotation.y = t * CAMERA_YAW_RATE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> (Scene, Camera, Showcase) {
        Showcase::build(&ShowcaseConfig::default())
    }

    #[test]
    fn build_populates_full_scene() {
        let (scene, camera, show) = build();
        // torus + 200 stars + avatar + moon
        assert_eq!(scene.object_count(), 203);
        assert_eq!(show.star_count(), 200);
        assert!(scene.point_light().is_some());
        assert!(scene.ambient_light().is_some());
        assert_eq!(scene.background(), Some("space.png"));
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 30.0));
    }

    #[test]
    fn build_places_the_fixtures() {
        let (scene, _, show) = build();

        let torus = scene.object(show.torus()).unwrap();
        assert_eq!(torus.appearance, Appearance::Flat(Color::from_hex(0xFF6347)));
        assert_eq!(torus.transform.position, Vec3::ZERO);

        let avatar = scene.object(show.avatar()).unwrap();
        assert!(!avatar.appearance.is_lit());

        let moon = scene.object(show.moon()).unwrap();
        assert_eq!(moon.transform.position, Vec3::new(-10.0, 0.0, 30.0));
        assert!(matches!(
            &moon.appearance,
            Appearance::Textured { normal_map: Some(_), lit: true, .. }
        ));
    }

    #[test]
    fn build_twice_never_double_populates() {
        let (a, _, _) = build();
        let (b, _, _) = build();
        assert_eq!(a.object_count(), 203);
        assert_eq!(b.object_count(), 203);
    }

    #[test]
    fn point_light_sits_at_five_five_five() {
        let (scene, _, _) = build();
        assert_eq!(
            scene.point_light().unwrap().position,
            Vec3::new(5.0, 5.0, 5.0)
        );
    }

    #[test]
    fn torus_spins_fixed_delta_per_frame() {
        let (mut scene, _, show) = build();
        show.advance_frame(&mut scene);
        assert_eq!(
            scene.object(show.torus()).unwrap().transform.rotation,
            TORUS_FRAME_SPIN
        );

        // Accumulates with no time input at all: one call is one frame.
        let mut expected = TORUS_FRAME_SPIN;
        for _ in 0..9 {
            show.advance_frame(&mut scene);
            expected += TORUS_FRAME_SPIN;
        }
        assert_eq!(
            scene.object(show.torus()).unwrap().transform.rotation,
            expected
        );
    }

    #[test]
    fn frame_advance_leaves_other_objects_alone() {
        let (mut scene, _, show) = build();
        show.advance_frame(&mut scene);
        assert_eq!(
            scene.object(show.moon()).unwrap().transform.rotation,
            Vec3::ZERO
        );
        assert_eq!(
            scene.object(show.avatar()).unwrap().transform.rotation,
            Vec3::ZERO
        );
    }

    #[test]
    fn scroll_camera_terms_are_exact() {
        let (mut scene, mut camera, show) = build();
        let t = -480.0_f32;
        show.apply_scroll(&mut scene, &mut camera, t);
        assert_eq!(camera.position.z, t * CAMERA_DOLLY_RATE);
        assert_eq!(camera.position.x, t * CAMERA_TRUCK_RATE);
        assert_eq!(camera.rotation.y, t * CAMERA_YAW_RATE);
    }

    #[test]
    fn scroll_camera_is_absolute_not_cumulative() {
        let (mut scene, mut camera, show) = build();
        show.apply_scroll(&mut scene, &mut camera, -100.0);
        show.apply_scroll(&mut scene, &mut camera, -480.0);
        // Latest offset wins; two events do not sum.
        assert_eq!(camera.position.z, -480.0 * CAMERA_DOLLY_RATE);
        assert_eq!(camera.position.x, -480.0 * CAMERA_TRUCK_RATE);
        assert_eq!(camera.rotation.y, -480.0 * CAMERA_YAW_RATE);
    }

    #[test]
    fn scroll_rotations_accumulate_per_event() {
        let (mut scene, mut camera, show) = build();
        show.apply_scroll(&mut scene, &mut camera, -100.0);
        show.apply_scroll(&mut scene, &mut camera, -480.0);

        assert_eq!(
            scene.object(show.moon()).unwrap().transform.rotation,
            MOON_SCROLL_SPIN + MOON_SCROLL_SPIN
        );

        let avatar = scene.object(show.avatar()).unwrap();
        assert_eq!(avatar.transform.rotation.x, 0.0);
        assert_eq!(
            avatar.transform.rotation,
            AVATAR_SCROLL_SPIN + AVATAR_SCROLL_SPIN
        );
    }

    #[test]
    fn scroll_leaves_camera_height_and_tilt_alone() {
        let (mut scene, mut camera, show) = build();
        camera.position.y = 5.0;
        camera.rotation.x = 0.25;
        camera.rotation.z = -0.25;
        show.apply_scroll(&mut scene, &mut camera, -1000.0);
        assert_eq!(camera.position.y, 5.0);
        assert_eq!(camera.rotation.x, 0.25);
        assert_eq!(camera.rotation.z, -0.25);
    }

    #[test]
    fn scroll_back_to_top_restores_the_origin_transform() {
        let (mut scene, mut camera, show) = build();
        show.apply_scroll(&mut scene, &mut camera, -2000.0);
        show.apply_scroll(&mut scene, &mut camera, 0.0);
        assert_eq!(camera.position.z, 0.0);
        assert_eq!(camera.position.x, 0.0);
        assert_eq!(camera.rotation.y, 0.0);
    }

    #[test]
    fn scroll_does_not_touch_the_torus() {
        let (mut scene, mut camera, show) = build();
        show.apply_scroll(&mut scene, &mut camera, -50.0);
        assert_eq!(
            scene.object(show.torus()).unwrap().transform.rotation,
            Vec3::ZERO
        );
    }
}
