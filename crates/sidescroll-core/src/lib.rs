//! # Sidescroll Core
//!
//! Deterministic fixed-timestep engine for a side-scrolling platformer.
//!
//! This crate advances player physics, resolves collisions against static
//! platforms, drives patrol and boss AI, manages projectiles and pickups,
//! scrolls a camera over a level wider than the screen, and runs the
//! playing / level-complete / game-over state machine. It never draws, plays
//! sound or polls devices: input arrives as a value and every tick produces a
//! [`RenderFrame`](render::RenderFrame) and a batch of events.
//!
//! ## Architecture
//!
//! - **Entities**: player, enemies (boss as a tagged variant), projectiles,
//!   collectibles, platforms
//! - **World**: single owner of all entities and the score
//! - **Resolvers**: physics (gravity, platform collision) and combat
//!   (damage, kills, pickups)
//! - **Levels**: declarative spawn tables and the load lifecycle
//! - **Game**: fixed tick ordering and state transitions
//!
//! ## Usage
//!
//! ```
//! use sidescroll_core::{Buttons, Game, GameConfig, InputFrame};
//!
//! let mut game = Game::new(GameConfig::default(), 7)?;
//! let run_right = InputFrame::new(Buttons::RIGHT, Buttons::empty());
//!
//! for _ in 0..60 {
//!     game.step(run_right);
//! }
//!
//! let frame = game.render_frame();
//! assert_eq!(frame.tick, 60);
//! assert!(game.world().player.rect.x > 100.0);
//! # Ok::<(), sidescroll_core::GameError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod camera;
pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod level;
pub mod render;
pub mod resolver;
pub mod world;

pub use camera::{Camera, CameraPolicy};
pub use config::GameConfig;
pub use error::GameError;
pub use game::{Game, GameState, Outcome};
pub use input::{Buttons, InputFrame};
pub use level::{LevelManager, LevelTable};
pub use render::RenderFrame;
pub use resolver::GameEvent;
pub use world::World;

#[cfg(test)]
mod tests;
