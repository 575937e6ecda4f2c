//! Entity types for the platformer.
//!
//! This module provides the things that live in a level:
//! - [`EntityId`]: unique identifier for dynamic entities
//! - [`EntityKind`]: classification used by the render snapshot
//! - [`Player`]: the single player character
//! - [`Enemy`]: patrolling enemies, including the boss ([`EnemyKind::Boss`])
//! - [`Projectile`], [`Collectible`], [`Platform`]: simple data entities
//!
//! # Architecture
//!
//! Entities are plain structs with their own per-type update rules. There is
//! no dynamic capability probing: the boss is a tagged variant of [`Enemy`]
//! and projectile ownership is an [`Owner`] enum, so every branch is an
//! exhaustive `match`. Cross-entity interactions (collisions, damage, pickup
//! effects) live in the [`resolver`](crate::resolver) module.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use sidescroll_core::config::GameConfig;
//! use sidescroll_core::entity::{Owner, Player};
//!
//! let config = GameConfig::default();
//! let player = Player::new(&config.player, Vec2::new(100.0, 400.0), config.hitboxes.player);
//!
//! let shot = player.shoot(config.hitboxes.player_shot);
//! assert_eq!(shot.owner, Owner::Player);
//! assert!(shot.velocity.x > 0.0);
//! ```

pub mod components;
pub mod enemy;
pub mod player;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{Collectible, CollectibleKind, Owner, Platform, Projectile};
pub use enemy::{BossState, Enemy, EnemyKind};
pub use player::{DamageOutcome, Player};

/// Unique identifier for a dynamic entity (enemy, projectile, collectible).
///
/// Identifiers are handed out by the [`World`](crate::world::World) in
/// increasing order and are never reused within a game, so ordering by id is
/// ordering by spawn time.
///
/// # Example
///
/// ```
/// use sidescroll_core::entity::EntityId;
///
/// let id1 = EntityId::new(1);
/// let id2 = EntityId::new(2);
///
/// assert!(id1 < id2);
/// assert_eq!(id1.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Classification of anything the renderer may draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player character.
    Player,
    /// A regular patrolling enemy.
    Enemy,
    /// The end-of-game boss.
    Boss,
    /// A projectile fired by the player.
    PlayerShot,
    /// A projectile fired by an enemy.
    EnemyShot,
    /// A pickup of the given kind.
    Collectible(CollectibleKind),
    /// Static level geometry.
    Platform,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "Player"),
            Self::Enemy => write!(f, "Enemy"),
            Self::Boss => write!(f, "Boss"),
            Self::PlayerShot => write!(f, "PlayerShot"),
            Self::EnemyShot => write!(f, "EnemyShot"),
            Self::Collectible(kind) => write!(f, "Collectible({kind})"),
            Self::Platform => write!(f, "Platform"),
        }
    }
}
