//! Crate-level tests for the whole game loop.
//!
//! - `scenarios.rs`: end-to-end gameplay scenarios through `Game::step`
//! - `determinism.rs`: same seed and inputs give identical frames
//! - `properties.rs`: property tests over physics, damage and camera
//! - `helpers.rs`: test setup utilities and factory functions

mod helpers;

pub use helpers::*;
