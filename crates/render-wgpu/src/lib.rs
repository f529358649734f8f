//! wgpu render backend for the showcase scene.
//!
//! Renders the scene's primitive meshes with instancing (all 200 stars go
//! out in one draw), image-mapped surfaces with optional normal maps, a
//! fullscreen background, and the grid/light helper overlays.
//!
//! # Invariants
//! - The renderer never mutates scene or camera state.
//! - Missing or unreadable texture files degrade to flat placeholders;
//!   they never abort rendering.
//! - One mesh is generated and uploaded per distinct shape value.

mod gpu;
mod mesh;
mod shaders;
mod texture;

pub use gpu::GpuRenderer;
pub use texture::{Texture, TextureError};
