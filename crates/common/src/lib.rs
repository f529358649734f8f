//! Shared Types: identifiers, transforms, and colours used across the workspace.
//!
//! # Invariants
//! - `ObjectId` values are issued by a scene container, never constructed ad hoc.
//! - `Transform::default()` is the identity: origin, zero rotation, unit scale.

pub mod types;

pub use types::{Color, ObjectId, Transform};
