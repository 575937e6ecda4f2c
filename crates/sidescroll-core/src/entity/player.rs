//! The player character.
//!
//! The player owns its kinematic state (hitbox, velocity, facing), its
//! vitals (health, lives, invincibility) and the ground bookkeeping used for
//! jumping (on-ground flag and coyote timer). Gravity and platform collision
//! are applied by [`PhysicsResolver`](crate::resolver::PhysicsResolver);
//! damage and pickups by [`CombatResolver`](crate::resolver::CombatResolver).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;
use crate::entity::components::{Owner, Projectile};
use crate::geometry::{Facing, Rect};

/// Result of [`Player::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// The player was invincible; nothing changed.
    Ignored,
    /// Health dropped but stayed above zero.
    Hurt,
    /// Health reached zero, a life was consumed and health was refilled.
    LifeLost,
    /// Health reached zero on the last life.
    Exhausted,
}

/// The player character.
///
/// # Invariants
///
/// - `health` stays within `[0, max_health]`; it only reads 0 once lives are
///   exhausted.
/// - The invincibility timer gates all damage: while it is non-zero,
///   [`take_damage`](Self::take_damage) is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Hitbox in level coordinates.
    pub rect: Rect,
    /// Displacement per tick.
    pub velocity: Vec2,
    /// Direction used for shooting.
    pub facing: Facing,
    health: u32,
    lives: u32,
    invincibility: u32,
    on_ground: bool,
    coyote: u32,
    tuning: PlayerConfig,
}

impl Player {
    /// Creates a player with full health whose top-left corner is at `spawn`.
    #[must_use]
    pub fn new(tuning: &PlayerConfig, spawn: Vec2, size: Vec2) -> Self {
        Self {
            rect: Rect::from_position(spawn, size),
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            health: tuning.max_health,
            lives: tuning.starting_lives,
            invincibility: 0,
            on_ground: false,
            coyote: 0,
            tuning: *tuning,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Health after a refill.
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.tuning.max_health
    }

    /// Health as a fraction of max health, in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.tuning.max_health.max(1) as f32
    }

    /// Remaining lives.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Returns `true` once every life has been spent.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.lives == 0
    }

    /// Ticks of damage immunity left.
    #[must_use]
    pub const fn invincibility(&self) -> u32 {
        self.invincibility
    }

    /// Returns `true` while damage is ignored.
    #[must_use]
    pub const fn is_invincible(&self) -> bool {
        self.invincibility > 0
    }

    /// Whether the last physics update ended standing on a platform.
    #[must_use]
    pub const fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// Ticks left in the post-ledge jump window.
    #[must_use]
    pub const fn coyote(&self) -> u32 {
        self.coyote
    }

    /// Tuning this player was created with.
    #[must_use]
    pub const fn tuning(&self) -> &PlayerConfig {
        &self.tuning
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Sets horizontal velocity from a direction in `{-1, 0, 1}`.
    ///
    /// Facing only changes for a non-zero direction. (Named `walk` because
    /// `move` is a Rust keyword.)
    pub fn walk(&mut self, direction: i8) {
        let direction = direction.signum();
        self.velocity.x = f32::from(direction) * self.tuning.speed;
        if let Some(facing) = Facing::from_direction(direction) {
            self.facing = facing;
        }
    }

    /// Jumps if standing on a platform or still inside the coyote window.
    ///
    /// Returns `true` if the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground && self.coyote == 0 {
            return false;
        }
        self.velocity.y = -self.tuning.jump_strength;
        self.on_ground = false;
        self.coyote = 0;
        true
    }

    /// Creates a player-owned projectile at the leading edge, vertically
    /// centred, flying in the facing direction.
    #[must_use]
    pub fn shoot(&self, size: Vec2) -> Projectile {
        let edge = match self.facing {
            Facing::Right => self.rect.right(),
            Facing::Left => self.rect.left(),
        };
        let center = Vec2::new(edge, self.rect.center().y);
        Projectile::new(
            Rect::from_center(center, size),
            self.facing.unit() * self.tuning.shot.speed,
            self.tuning.shot.damage,
            Owner::Player,
        )
    }

    /// Applies damage unless invincible.
    ///
    /// A hit starts the invincibility window. When health reaches zero a life
    /// is consumed and health refills to max, unless that was the last life,
    /// in which case health stays at zero.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.is_invincible() {
            return DamageOutcome::Ignored;
        }
        self.health = self.health.saturating_sub(amount);
        self.invincibility = self.tuning.invincibility_frames;
        if self.health > 0 {
            return DamageOutcome::Hurt;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            DamageOutcome::Exhausted
        } else {
            self.health = self.tuning.max_health;
            DamageOutcome::LifeLost
        }
    }

    /// Restores health up to max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.tuning.max_health);
        self.health - before
    }

    /// Adds lives.
    pub fn gain_lives(&mut self, count: u32) {
        self.lives = self.lives.saturating_add(count);
    }

    /// Moves the player to `spawn` with no momentum, keeping health and
    /// lives. Used when a new level starts.
    pub fn respawn_at(&mut self, spawn: Vec2) {
        self.rect.set_position(spawn);
        self.velocity = Vec2::ZERO;
        self.facing = Facing::Right;
        self.on_ground = false;
        self.coyote = 0;
    }

    // =========================================================================
    // Physics bookkeeping
    // =========================================================================

    /// Counts down timers at the start of a physics update.
    ///
    /// The coyote timer only runs down on ticks that begin airborne.
    pub(crate) fn begin_update(&mut self) {
        self.invincibility = self.invincibility.saturating_sub(1);
        if !self.on_ground {
            self.coyote = self.coyote.saturating_sub(1);
        }
    }

    /// Records the ground state computed by the vertical collision pass.
    pub(crate) fn set_grounded(&mut self, grounded: bool) {
        self.on_ground = grounded;
        if grounded {
            self.coyote = self.tuning.coyote_frames;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn player() -> Player {
        let config = GameConfig::default();
        Player::new(&config.player, Vec2::new(100.0, 400.0), config.hitboxes.player)
    }

    mod movement_tests {
        use super::*;

        #[test]
        fn walk_sets_velocity_and_facing() {
            let mut p = player();
            p.walk(-1);
            assert_eq!(p.velocity.x, -5.0);
            assert_eq!(p.facing, Facing::Left);
            p.walk(0);
            assert_eq!(p.velocity.x, 0.0);
            assert_eq!(p.facing, Facing::Left);
        }

        #[test]
        fn jump_requires_ground_or_coyote() {
            let mut p = player();
            assert!(!p.jump());
            assert_eq!(p.velocity.y, 0.0);

            p.set_grounded(true);
            assert!(p.jump());
            assert_eq!(p.velocity.y, -15.0);
            assert!(!p.on_ground());
            assert_eq!(p.coyote(), 0);
            // No double jump.
            assert!(!p.jump());
        }

        #[test]
        fn coyote_window_allows_late_jump() {
            let mut p = player();
            p.set_grounded(true);
            p.set_grounded(false);
            assert!(p.coyote() > 0);
            assert!(p.jump());
        }

        #[test]
        fn respawn_keeps_vitals() {
            let mut p = player();
            p.take_damage(30);
            p.velocity = Vec2::new(5.0, 3.0);
            p.respawn_at(Vec2::new(10.0, 20.0));
            assert_eq!(p.rect.position(), Vec2::new(10.0, 20.0));
            assert_eq!(p.velocity, Vec2::ZERO);
            assert_eq!(p.health(), 70);
            assert_eq!(p.lives(), 3);
        }
    }

    mod shoot_tests {
        use super::*;

        #[test]
        fn shot_leaves_leading_edge_facing_right() {
            let p = player();
            let shot = p.shoot(Vec2::new(15.0, 5.0));
            assert_eq!(shot.rect.center(), Vec2::new(p.rect.right(), p.rect.center().y));
            assert_eq!(shot.velocity, Vec2::new(10.0, 0.0));
            assert_eq!(shot.damage, 40);
            assert_eq!(shot.owner, Owner::Player);
        }

        #[test]
        fn shot_leaves_leading_edge_facing_left() {
            let mut p = player();
            p.walk(-1);
            let shot = p.shoot(Vec2::new(15.0, 5.0));
            assert_eq!(shot.rect.center().x, p.rect.left());
            assert_eq!(shot.velocity, Vec2::new(-10.0, 0.0));
        }
    }

    mod damage_tests {
        use super::*;

        #[test]
        fn invincibility_gates_second_hit() {
            let mut p = player();
            assert_eq!(p.take_damage(20), DamageOutcome::Hurt);
            assert_eq!(p.take_damage(20), DamageOutcome::Ignored);
            assert_eq!(p.health(), 80);
            assert_eq!(p.invincibility(), 60);
        }

        #[test]
        fn invincibility_expires_after_window() {
            let mut p = player();
            p.take_damage(20);
            for _ in 0..60 {
                p.begin_update();
            }
            assert!(!p.is_invincible());
            assert_eq!(p.take_damage(20), DamageOutcome::Hurt);
            assert_eq!(p.health(), 60);
        }

        #[test]
        fn lethal_hit_consumes_life_and_refills() {
            let mut p = player();
            assert_eq!(p.take_damage(250), DamageOutcome::LifeLost);
            assert_eq!(p.health(), 100);
            assert_eq!(p.lives(), 2);
        }

        #[test]
        fn last_life_leaves_zero_health() {
            let mut p = player();
            for _ in 0..2 {
                p.take_damage(100);
                p.invincibility = 0;
            }
            assert_eq!(p.take_damage(100), DamageOutcome::Exhausted);
            assert_eq!(p.health(), 0);
            assert_eq!(p.lives(), 0);
            assert!(p.is_exhausted());
        }

        #[test]
        fn heal_caps_at_max() {
            let mut p = player();
            p.take_damage(20);
            assert_eq!(p.heal(30), 20);
            assert_eq!(p.health(), 100);
            assert_eq!(p.heal(30), 0);
        }

        #[test]
        fn health_fraction() {
            let mut p = player();
            p.take_damage(25);
            assert!((p.health_fraction() - 0.75).abs() < f32::EPSILON);
        }
    }
}
