//! Interaction Layer: mouse-drag orbit and page-scroll tracking mapped to
//! camera and scene state.
//!
//! # Invariants
//! - No windowing-toolkit types cross this boundary; callers feed in raw
//!   deltas and read back camera state.
//! - Pending drag input is reconciled once per frame by `OrbitControls::update`.

pub mod orbit;
pub mod scroll;

pub use orbit::OrbitControls;
pub use scroll::ScrollTracker;

pub fn crate_info() -> &'static str {
    "scrollscape-controls v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("controls"));
    }
}
