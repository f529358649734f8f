//! Scene Kernel: authoritative scene contents, camera state, and the
//! deterministic animation maths that drives them.
//!
//! # Invariants
//! - Object ids are container-assigned and strictly increasing.
//! - Animation steps are pure arithmetic on scene state; nothing here reads
//!   a clock or touches the GPU.

pub mod camera;
pub mod graph;
pub mod light;
pub mod object;
pub mod show;
pub mod starfield;

pub use camera::Camera;
pub use graph::Scene;
pub use light::{AmbientLight, PointLight};
pub use object::{Appearance, SceneObject, Shape};
pub use show::{Showcase, ShowcaseConfig};
