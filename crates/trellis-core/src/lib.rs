//! Core types for the Trellis layout engine.
//!
//! This crate provides the foundational types used by `trellis-layout`:
//! - Integer geometry (points, sizes, rectangles, edge insets)
//! - Per-node sizing directives and alignment enums
//! - Node handles and visibility
//! - Error types

pub mod errors;
pub mod geometry;
pub mod types;

pub use errors::*;
pub use geometry::*;
pub use types::*;
