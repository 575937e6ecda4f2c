//! Resolvers that turn one tick of intent into world mutations.
//!
//! Entities only know how to update themselves. Everything that involves
//! more than one entity (platform collision, damage, pickups) is applied by
//! a resolver borrowing the [`World`](crate::world::World) for one call.
//!
//! # Invariants
//!
//! - Resolvers are deterministic: given the same world and inputs they make
//!   the same mutations in the same order.
//! - Collections are walked through id snapshots, so removals during a pass
//!   never skip or repeat an entity.
//!
//! # Available Resolvers
//!
//! - [`PhysicsResolver`]: gravity, platform collision, projectile motion
//! - [`CombatResolver`]: damage, kills, pickups
//! - [`EventLog`]: records [`GameEvent`]s for collaborators (no state mutation)

mod combat;
mod event;
mod physics;

pub use combat::CombatResolver;
pub use event::{EventLog, GameEvent};
pub use physics::{resolve_horizontal, resolve_vertical, PhysicsResolver};
