//! Testing infrastructure for wardrive integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: isolated data directory plus CLI command setup
//! - `fixtures`: capture CSV generation and sample placement
//! - `assertions`: checks against the emitted GeoJSON document

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::{CaptureBuilder, CaptureRow};
pub use world::TestWorld;
