use scrollscape_common::{Color, Transform};

/// Geometry of a drawable object.
///
/// Segment counts control tessellation only; renderers may cache one mesh
/// per distinct shape value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Ring with a circular cross-section, lying in the XY plane.
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    /// UV sphere with poles on the Y axis.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Axis-aligned box centred on the origin.
    Cuboid { width: f32, height: f32, depth: f32 },
}

impl Shape {
    /// Short label for logs and text output.
    pub fn label(&self) -> &'static str {
        match self {
            Shape::Torus { .. } => "torus",
            Shape::Sphere { .. } => "sphere",
            Shape::Cuboid { .. } => "cuboid",
        }
    }
}

/// Surface description of a drawable object.
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    /// Solid colour shaded by the scene lights.
    Flat(Color),
    /// Image-mapped surface. `map` and `normal_map` name image files to be
    /// resolved by the renderer; `lit` selects between shaded and
    /// full-bright output.
    Textured {
        map: String,
        normal_map: Option<String>,
        lit: bool,
    },
}

impl Appearance {
    /// Shaded texture map with a normal map.
    pub fn textured_with_normal(map: impl Into<String>, normal_map: impl Into<String>) -> Self {
        Appearance::Textured {
            map: map.into(),
            normal_map: Some(normal_map.into()),
            lit: true,
        }
    }

    /// Full-bright texture map, ignoring scene lights.
    pub fn textured_unlit(map: impl Into<String>) -> Self {
        Appearance::Textured {
            map: map.into(),
            normal_map: None,
            lit: false,
        }
    }

    /// Whether scene lights affect this surface.
    pub fn is_lit(&self) -> bool {
        match self {
            Appearance::Flat(_) => true,
            Appearance::Textured { lit, .. } => *lit,
        }
    }
}

/// A drawable object: shape, appearance, and a spatial transform.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub appearance: Appearance,
    pub transform: Transform,
}

impl SceneObject {
    /// Construct with the identity transform: origin, zero rotation,
    /// unit scale. Callers reposition after construction.
    pub fn new(shape: Shape, appearance: Appearance) -> Self {
        Self {
            shape,
            appearance,
            transform: Transform::default(),
        }
    }
}
