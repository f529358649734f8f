use glam::{EulerRot, Mat4, Quat, Vec3};

/// Identifier for an object held by a scene container.
///
/// Ids are assigned by the container in insertion order, so iterating a
/// `BTreeMap<ObjectId, _>` visits objects in the order they were added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Spatial transform: position, Euler rotation (radians, applied X then Y
/// then Z), scale.
///
/// Rotation is kept as three independent angles rather than a quaternion
/// because the animation maths in this workspace accumulates per-axis
/// deltas on every frame and every scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    /// Rotation as a quaternion, composed in XYZ order.
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Object-to-world matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Linear-space RGB colour with unit range per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Channels plus an opaque alpha, in the layout GPU vertex data wants.
    pub fn to_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_ids_order_by_value() {
        let a = ObjectId(1);
        let b = ObjectId(2);
        assert!(a < b);
        assert_ne!(a, b);
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn transform_matrix_translates() {
        let mut t = Transform::default();
        t.position = Vec3::new(-10.0, 0.0, 30.0);
        let m = t.matrix();
        assert_eq!(m.w_axis.x, -10.0);
        assert_eq!(m.w_axis.y, 0.0);
        assert_eq!(m.w_axis.z, 30.0);
    }

    #[test]
    fn rotation_quat_matches_single_axis() {
        let mut t = Transform::default();
        t.rotation = Vec3::new(0.0, 0.5, 0.0);
        assert_eq!(t.rotation_quat(), Quat::from_rotation_y(0.5));
    }

    #[test]
    fn color_from_hex_unpacks_channels() {
        let c = Color::from_hex(0xFF6347);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 99.0 / 255.0);
        assert_eq!(c.b, 71.0 / 255.0);
    }

    #[test]
    fn color_white_is_default() {
        assert_eq!(Color::default(), Color::WHITE);
        assert_eq!(Color::WHITE.to_rgba(), [1.0, 1.0, 1.0, 1.0]);
    }
}
