//! Simple data entities: platforms, projectiles and collectibles.
//!
//! None of these carry behaviour beyond moving themselves; interactions with
//! the player and enemies are applied by the resolvers.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Rect;

/// Static level geometry. Immutable once the level is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Solid area.
    pub rect: Rect,
}

impl Platform {
    /// Creates a platform occupying `rect`.
    #[must_use]
    pub const fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

impl From<Rect> for Platform {
    fn from(rect: Rect) -> Self {
        Self::new(rect)
    }
}

/// Which side fired a projectile. Player shots only hurt enemies and enemy
/// shots only hurt the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Fired by the player.
    Player,
    /// Fired by an enemy (the boss).
    Enemy,
}

/// A single-hit, non-piercing shot moving at a fixed velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Hitbox.
    pub rect: Rect,
    /// Displacement per tick.
    pub velocity: Vec2,
    /// Damage dealt on impact.
    pub damage: u32,
    /// Side that fired the shot.
    pub owner: Owner,
}

impl Projectile {
    /// Creates a projectile.
    #[must_use]
    pub const fn new(rect: Rect, velocity: Vec2, damage: u32, owner: Owner) -> Self {
        Self {
            rect,
            velocity,
            damage,
            owner,
        }
    }

    /// Advances the projectile by one tick.
    pub fn update(&mut self) {
        self.rect.translate(self.velocity);
    }

    /// Returns `true` once the hitbox lies entirely outside `bounds`.
    ///
    /// A projectile that still touches the bounds on any side is kept.
    #[must_use]
    pub fn is_outside(&self, bounds: &Rect) -> bool {
        self.rect.right() < bounds.left()
            || self.rect.left() > bounds.right()
            || self.rect.bottom() < bounds.top()
            || self.rect.top() > bounds.bottom()
    }
}

/// What a collectible does when picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Adds points to the score.
    Score,
    /// Restores player health.
    Health,
    /// Grants extra lives.
    Life,
}

impl fmt::Display for CollectibleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Score => write!(f, "Score"),
            Self::Health => write!(f, "Health"),
            Self::Life => write!(f, "Life"),
        }
    }
}

/// A single-use pickup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    /// Hitbox.
    pub rect: Rect,
    /// Effect applied on pickup.
    pub kind: CollectibleKind,
    /// Magnitude of the effect: points, health or lives depending on `kind`.
    pub value: u32,
}

impl Collectible {
    /// Creates a collectible.
    #[must_use]
    pub const fn new(rect: Rect, kind: CollectibleKind, value: u32) -> Self {
        Self { rect, kind, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod projectile_tests {
        use super::*;

        fn bounds() -> Rect {
            Rect::new(0.0, 0.0, 3000.0, 500.0)
        }

        #[test]
        fn update_moves_by_velocity() {
            let mut p = Projectile::new(
                Rect::new(100.0, 100.0, 15.0, 5.0),
                Vec2::new(10.0, 0.0),
                40,
                Owner::Player,
            );
            p.update();
            p.update();
            assert_eq!(p.rect.position(), Vec2::new(120.0, 100.0));
        }

        #[test]
        fn partially_inside_is_kept() {
            let p = Projectile::new(
                Rect::new(-10.0, 100.0, 15.0, 5.0),
                Vec2::ZERO,
                1,
                Owner::Player,
            );
            assert!(!p.is_outside(&bounds()));
        }

        #[test]
        fn fully_outside_on_any_side() {
            let make =
                |x, y| Projectile::new(Rect::new(x, y, 15.0, 5.0), Vec2::ZERO, 1, Owner::Enemy);
            assert!(make(-16.0, 100.0).is_outside(&bounds()));
            assert!(make(3001.0, 100.0).is_outside(&bounds()));
            assert!(make(100.0, -6.0).is_outside(&bounds()));
            assert!(make(100.0, 501.0).is_outside(&bounds()));
        }
    }

    mod collectible_tests {
        use super::*;

        #[test]
        fn kind_serializes_by_name() {
            let json = serde_json::to_string(&CollectibleKind::Health).unwrap();
            assert_eq!(json, "\"Health\"");
        }
    }
}
