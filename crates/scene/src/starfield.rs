use glam::Vec3;
use scrollscape_common::{Color, ObjectId};

use crate::graph::Scene;
use crate::object::{Appearance, SceneObject, Shape};

/// Geometry shared by every star.
const STAR_SHAPE: Shape = Shape::Sphere {
    radius: 0.25,
    width_segments: 24,
    height_segments: 24,
};

/// Scatter `count` white star spheres into the scene, positioned uniformly
/// in a cube of side `spread` centred on the origin.
///
/// Deterministic for a given seed. Each call adds `count` fresh objects;
/// calling again on the same scene simply adds more stars.
pub fn scatter(scene: &mut Scene, count: usize, spread: f32, seed: u64) -> Vec<ObjectId> {
    let mut rng = SplitMix64::new(seed);
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let mut star = SceneObject::new(STAR_SHAPE, Appearance::Flat(Color::WHITE));
        star.transform.position = Vec3::new(
            rng.next_spread(spread),
            rng.next_spread(spread),
            rng.next_spread(spread),
        );
        ids.push(scene.add(star));
    }
    ids
}

/// Splitmix64 ... a fast, high-quality deterministic PRNG. Used so star
/// placement is reproducible across platforms without floating-point
/// ordering concerns.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform f32 in [0, 1) built from the top 24 bits.
    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform f32 in [-spread / 2, spread / 2).
    fn next_spread(&mut self, spread: f32) -> f32 {
        spread * (self.next_f32() - 0.5)
    }
}
