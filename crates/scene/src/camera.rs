use glam::{EulerRot, Mat4, Quat, Vec3};

/// Perspective camera.
///
/// Position and rotation are plain fields because two independent systems
/// write them: the scroll handler assigns absolute values and the orbit
/// control reorients around a target. Rotation is Euler angles in radians,
/// composed in XYZ order, matching [`scrollscape_common::Transform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov_y: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Update the aspect ratio, typically on window resize.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Orientation as a quaternion, composed in XYZ order.
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation_quat(), self.position).inverse()
    }

    /// View-to-clip matrix (right-handed, -Z forward).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Reorient to face `target`, keeping +Y as up. No-op when the target
    /// coincides with the camera position.
    pub fn look_at(&mut self, target: Vec3) {
        if (target - self.position).length_squared() <= f32::EPSILON {
            return;
        }
        let view = Mat4::look_at_rh(self.position, target, Vec3::Y);
        let (x, y, z) = Quat::from_mat4(&view.inverse()).to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn default_lens() {
        let c = Camera::default();
        assert_eq!(c.fov_y, 75.0_f32.to_radians());
        assert_eq!(c.near, 0.1);
        assert_eq!(c.far, 1000.0);
        assert_eq!(c.position, Vec3::ZERO);
        assert_eq!(c.rotation, Vec3::ZERO);
    }

    #[test]
    fn set_aspect_ignores_zero_height() {
        let mut c = Camera::default();
        c.set_aspect(1920, 1080);
        assert_eq!(c.aspect, 1920.0 / 1080.0);
        c.set_aspect(1920, 0);
        assert_eq!(c.aspect, 1920.0 / 1080.0);
    }

    #[test]
    fn view_inverts_translation() {
        let c = Camera {
            position: Vec3::new(0.0, 0.0, 30.0),
            ..Camera::default()
        };
        let view = c.view_matrix();
        let origin_in_view = view.transform_point3(Vec3::new(0.0, 0.0, 30.0));
        assert!(origin_in_view.length() < 1e-5);
    }

    #[test]
    fn look_at_down_negative_z_is_identity() {
        let mut c = Camera {
            position: Vec3::new(0.0, 0.0, 30.0),
            ..Camera::default()
        };
        c.look_at(Vec3::ZERO);
        assert!(c.rotation.x.abs() < 1e-6);
        assert!(c.rotation.y.abs() < 1e-6);
        assert!(c.rotation.z.abs() < 1e-6);
    }

    #[test]
    fn look_at_yaws_toward_target() {
        let mut c = Camera::default();
        c.look_at(Vec3::new(1.0, 0.0, -1.0));
        assert!((c.rotation.y + FRAC_PI_4).abs() < 1e-5);
        assert!(c.rotation.x.abs() < 1e-5);
        assert!(c.rotation.z.abs() < 1e-5);
    }

    #[test]
    fn look_at_self_is_a_noop() {
        let mut c = Camera {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.1, 0.2, 0.3),
            ..Camera::default()
        };
        c.look_at(c.position);
        assert_eq!(c.rotation, Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn projection_is_finite() {
        let c = Camera::default();
        let m = c.projection_matrix();
        assert!(m.x_axis.x.is_finite() && m.x_axis.x > 0.0);
        assert!(m.y_axis.y.is_finite() && m.y_axis.y > 0.0);
    }
}
