//! Patrolling enemies and the boss.
//!
//! Every enemy walks back and forth between its patrol bounds at constant
//! speed. The boss is the same patrol with a fire-cooldown layered on top:
//! [`EnemyKind::Boss`] carries the [`BossState`] that decides when to shoot
//! at the player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{BossConfig, EnemyConfig, ShotConfig};
use crate::entity::components::{Owner, Projectile};
use crate::geometry::{Facing, Rect};

/// Boss-only behaviour: periodic aimed fire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    /// Ticks until the next shot is allowed.
    pub cooldown: u32,
    /// Value the cooldown resets to after firing.
    pub fire_interval: u32,
    /// Maximum horizontal distance to the player for firing.
    pub fire_range: f32,
    /// Projectile speed and damage.
    pub shot: ShotConfig,
    /// Projectile hitbox size.
    pub shot_size: Vec2,
}

impl BossState {
    /// Creates a boss state with a full cooldown.
    #[must_use]
    pub fn new(config: &BossConfig, shot_size: Vec2) -> Self {
        Self {
            cooldown: config.fire_interval,
            fire_interval: config.fire_interval,
            fire_range: config.fire_range,
            shot: config.shot,
            shot_size,
        }
    }

    /// Runs the cooldown for one tick and fires if ready.
    ///
    /// The cooldown is decremented exactly once per call. When it is zero and
    /// the player is within range, a shot aimed from `origin` at `target` is
    /// returned and the cooldown restarts. Out of range, the cooldown holds
    /// at zero. If `target` coincides with `origin` the shot flies along
    /// `fallback`.
    pub fn tick(&mut self, origin: Vec2, target: Vec2, fallback: Facing) -> Option<Projectile> {
        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown > 0 || (target.x - origin.x).abs() > self.fire_range {
            return None;
        }
        let direction = (target - origin).try_normalize().unwrap_or(fallback.unit());
        self.cooldown = self.fire_interval;
        Some(Projectile::new(
            Rect::from_center(origin, self.shot_size),
            direction * self.shot.speed,
            self.shot.damage,
            Owner::Enemy,
        ))
    }
}

/// Enemy variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Patrol and contact damage only.
    Normal,
    /// Patrol plus aimed fire.
    Boss(BossState),
}

/// A patrolling enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Hitbox in level coordinates.
    pub rect: Rect,
    /// Leftmost x of the patrol.
    pub origin_x: f32,
    /// Distance the left edge travels from `origin_x`.
    pub patrol_width: f32,
    /// Patrol speed per tick.
    pub speed: f32,
    /// Current patrol direction.
    pub direction: Facing,
    health: u32,
    max_health: u32,
    /// Damage dealt to the player on contact.
    pub contact_damage: u32,
    /// Points awarded for the kill.
    pub score: u32,
    /// Normal enemy or boss.
    pub kind: EnemyKind,
}

impl Enemy {
    /// Creates a regular enemy whose top-left corner is `position`, patrolling
    /// `patrol_width` pixels to the right of it.
    #[must_use]
    pub fn normal(position: Vec2, patrol_width: f32, config: &EnemyConfig, size: Vec2) -> Self {
        Self {
            rect: Rect::from_position(position, size),
            origin_x: position.x,
            patrol_width: patrol_width.max(0.0),
            speed: config.speed,
            direction: Facing::Right,
            health: config.health,
            max_health: config.health,
            contact_damage: config.contact_damage,
            score: config.score,
            kind: EnemyKind::Normal,
        }
    }

    /// Creates a boss whose top-left corner is `position`.
    #[must_use]
    pub fn boss(
        position: Vec2,
        patrol_width: f32,
        config: &BossConfig,
        size: Vec2,
        shot_size: Vec2,
    ) -> Self {
        Self {
            rect: Rect::from_position(position, size),
            origin_x: position.x,
            patrol_width: patrol_width.max(0.0),
            speed: config.speed,
            direction: Facing::Right,
            health: config.health,
            max_health: config.health,
            contact_damage: config.contact_damage,
            score: config.score,
            kind: EnemyKind::Boss(BossState::new(config, shot_size)),
        }
    }

    /// Current health. Always positive for an enemy still in the world.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Starting health.
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Health as a fraction of max health.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health.max(1) as f32
    }

    /// Returns `true` for the boss variant.
    #[must_use]
    pub const fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss(_))
    }

    /// Rightmost x the left edge may reach.
    #[must_use]
    pub fn patrol_end(&self) -> f32 {
        self.origin_x + self.patrol_width
    }

    /// Advances the patrol and, for the boss, the fire cooldown.
    ///
    /// Returns a projectile if the boss fired this tick.
    pub fn update(&mut self, player_center: Vec2) -> Option<Projectile> {
        self.patrol();
        let center = self.rect.center();
        let direction = self.direction;
        match &mut self.kind {
            EnemyKind::Normal => None,
            EnemyKind::Boss(state) => state.tick(center, player_center, direction),
        }
    }

    /// Applies damage. Returns `true` if the enemy survives.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health > 0
    }

    fn patrol(&mut self) {
        self.rect.x += self.direction.sign() * self.speed;
        if self.rect.x <= self.origin_x {
            self.rect.x = self.origin_x;
            self.direction = Facing::Right;
        } else if self.rect.x >= self.patrol_end() {
            self.rect.x = self.patrol_end();
            self.direction = Facing::Left;
        }
    }
}
