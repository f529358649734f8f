use glam::{Vec2, Vec3};
use scrollscape_scene::Camera;

/// Mouse-drag orbit: rotates the camera around a fixed target point.
///
/// Raw drag deltas accumulate in `pending` as events arrive and are folded
/// into the camera once per frame by [`update`](OrbitControls::update).
/// The orbit sphere is derived from the camera's current position at that
/// moment, so camera movement applied elsewhere (the scroll response)
/// shifts the orbit rather than being overwritten by it.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    /// Radians of orbit per pixel of drag.
    pub rotate_speed: f32,
    pub enabled: bool,
    pending: Vec2,
    dragging: bool,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            rotate_speed: 0.005,
            enabled: true,
            pending: Vec2::ZERO,
            dragging: false,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the drag button state.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Record raw mouse motion. Ignored unless a drag is in progress.
    pub fn handle_drag(&mut self, dx: f32, dy: f32) {
        if self.dragging && self.enabled {
            self.pending += Vec2::new(dx, dy);
        }
    }

    /// Fold pending drag input into the camera. Returns whether the camera
    /// changed; with nothing pending the camera is left exactly as is.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if self.pending == Vec2::ZERO {
            return false;
        }
        let pending = std::mem::take(&mut self.pending);

        let offset = camera.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            // Camera sits on the target; no orbit is defined.
            return false;
        }

        let max_pitch = 89.0_f32.to_radians();
        let mut yaw = offset.x.atan2(offset.z);
        let mut pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
        yaw -= pending.x * self.rotate_speed;
        pitch = (pitch - pending.y * self.rotate_speed).clamp(-max_pitch, max_pitch);

        camera.position = self.target
            + Vec3::new(
                radius * pitch.cos() * yaw.sin(),
                radius * pitch.sin(),
                radius * pitch.cos() * yaw.cos(),
            );
        camera.look_at(self.target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(position: Vec3) -> Camera {
        Camera {
            position,
            ..Camera::default()
        }
    }

    #[test]
    fn no_pending_input_leaves_camera_untouched() {
        let mut orbit = OrbitControls::new();
        let mut camera = camera_at(Vec3::new(0.096, 0.0, 4.8));
        camera.rotation.y = 0.096;
        assert!(!orbit.update(&mut camera));
        assert_eq!(camera.position, Vec3::new(0.096, 0.0, 4.8));
        assert_eq!(camera.rotation.y, 0.096);
    }

    #[test]
    fn drag_preserves_orbit_radius() {
        let mut orbit = OrbitControls::new();
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 30.0));
        orbit.set_dragging(true);
        orbit.handle_drag(120.0, 35.0);
        assert!(orbit.update(&mut camera));
        assert!((camera.position.length() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn horizontal_drag_yaws_around_the_target() {
        let mut orbit = OrbitControls::new();
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 30.0));
        orbit.set_dragging(true);
        orbit.handle_drag(100.0, 0.0);
        orbit.update(&mut camera);
        // 100 px at 0.005 rad/px swings half a radian sideways.
        assert!(camera.position.x < 0.0);
        assert!(camera.position.y.abs() < 1e-5);
        assert!((camera.rotation.y + 0.5).abs() < 1e-4);
    }

    #[test]
    fn vertical_drag_clamps_below_the_pole() {
        let mut orbit = OrbitControls::new();
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 30.0));
        orbit.set_dragging(true);
        orbit.handle_drag(0.0, -100_000.0);
        orbit.update(&mut camera);
        let max_height = 30.0 * 89.0_f32.to_radians().sin();
        assert!(camera.position.y <= max_height + 1e-3);
        assert!(camera.position.y > 29.0);
    }

    #[test]
    fn motion_without_a_drag_is_ignored() {
        let mut orbit = OrbitControls::new();
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 30.0));
        orbit.handle_drag(100.0, 50.0);
        assert!(!orbit.update(&mut camera));
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 30.0));
    }

    #[test]
    fn disabled_controls_ignore_drags() {
        let mut orbit = OrbitControls::new();
        orbit.enabled = false;
        orbit.set_dragging(true);
        orbit.handle_drag(100.0, 50.0);
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 30.0));
        assert!(!orbit.update(&mut camera));
    }

    #[test]
    fn pending_input_is_consumed_by_update() {
        let mut orbit = OrbitControls::new();
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 30.0));
        orbit.set_dragging(true);
        orbit.handle_drag(10.0, 10.0);
        assert!(orbit.update(&mut camera));
        assert!(!orbit.update(&mut camera));
    }

    #[test]
    fn camera_on_the_target_cannot_orbit() {
        let mut orbit = OrbitControls::new();
        let mut camera = camera_at(Vec3::ZERO);
        orbit.set_dragging(true);
        orbit.handle_drag(10.0, 10.0);
        assert!(!orbit.update(&mut camera));
        assert_eq!(camera.position, Vec3::ZERO);
    }
}
