//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers cannot mutate scene or camera state; they read and produce
//!   output.
//! - Scene construction and animation never depend on a GPU being present.
//!
//! The trait ships with a text renderer so the CLI and tests can exercise
//! the full scene path headless; the wgpu implementation lives in its own
//! crate and plugs in without changing consumers.

mod renderer;

pub use renderer::{SceneRenderer, TextRenderer};

pub fn crate_info() -> &'static str {
    "scrollscape-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
