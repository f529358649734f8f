use std::collections::BTreeMap;

use scrollscape_common::ObjectId;

use crate::light::{AmbientLight, PointLight};
use crate::object::SceneObject;

/// The scene container: every drawable object plus global lighting and the
/// background image.
///
/// All content is added before the first frame is drawn; the render loop
/// only mutates transforms of objects that already exist. Draw order is
/// resolved by depth, not insertion order, so the map is free to iterate
/// in id order.
///
/// Uses BTreeMap for deterministic iteration order across all platforms.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: BTreeMap<ObjectId, SceneObject>,
    point_light: Option<PointLight>,
    ambient_light: Option<AmbientLight>,
    background: Option<String>,
    next_id: u32,
}

impl Scene {
    /// Create an empty scene with no lights and no background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its id. Ids are strictly increasing.
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        self.objects.insert(id, object);
        id
    }

    /// Number of objects in the scene.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get a reference to an object.
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Get a mutable reference to an object.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Read-only access to all objects (BTreeMap for deterministic iteration).
    pub fn objects(&self) -> &BTreeMap<ObjectId, SceneObject> {
        &self.objects
    }

    /// Install or replace the single point light.
    pub fn set_point_light(&mut self, light: PointLight) {
        self.point_light = Some(light);
    }

    pub fn point_light(&self) -> Option<&PointLight> {
        self.point_light.as_ref()
    }

    /// Install or replace the single ambient light.
    pub fn set_ambient_light(&mut self, light: AmbientLight) {
        self.ambient_light = Some(light);
    }

    pub fn ambient_light(&self) -> Option<&AmbientLight> {
        self.ambient_light.as_ref()
    }

    /// Set the background image by file name.
    pub fn set_background(&mut self, path: impl Into<String>) {
        self.background = Some(path.into());
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Appearance, Shape};
    use scrollscape_common::Color;

    fn cube() -> SceneObject {
        SceneObject::new(
            Shape::Cuboid {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Appearance::Flat(Color::WHITE),
        )
    }

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new();
        assert_eq!(s.object_count(), 0);
        assert!(s.point_light().is_none());
        assert!(s.ambient_light().is_none());
        assert!(s.background().is_none());
    }

    #[test]
    fn add_assigns_increasing_ids() {
        let mut s = Scene::new();
        let a = s.add(cube());
        let b = s.add(cube());
        let c = s.add(cube());
        assert!(a < b && b < c);
        assert_eq!(s.object_count(), 3);
    }

    #[test]
    fn objects_retrievable_by_id() {
        let mut s = Scene::new();
        let id = s.add(cube());
        assert!(s.object(id).is_some());
        s.object_mut(id).unwrap().transform.position.x = 5.0;
        assert_eq!(s.object(id).unwrap().transform.position.x, 5.0);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut s = Scene::new();
        let ids: Vec<ObjectId> = (0..100).map(|_| s.add(cube())).collect();
        let keys: Vec<ObjectId> = s.objects().keys().copied().collect();
        assert_eq!(keys, ids);
    }

    #[test]
    fn lights_replace_instead_of_stacking() {
        let mut s = Scene::new();
        s.set_point_light(PointLight::default());
        s.set_point_light(PointLight {
            intensity: 2.0,
            ..PointLight::default()
        });
        assert_eq!(s.point_light().unwrap().intensity, 2.0);

        s.set_ambient_light(AmbientLight::default());
        assert_eq!(s.ambient_light().unwrap().intensity, 1.0);
    }

    #[test]
    fn background_is_stored() {
        let mut s = Scene::new();
        s.set_background("space.png");
        assert_eq!(s.background(), Some("space.png"));
    }
}
