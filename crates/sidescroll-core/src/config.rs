//! Game configuration.
//!
//! [`GameConfig`] gathers every tunable constant of the simulation. The
//! defaults reproduce the reference game (900×500 viewport, 3000 px levels,
//! gravity 0.8, jump strength 15, 60 Hz ticks). All speeds are in pixels per
//! tick and all durations are in ticks.
//!
//! Every section is `#[serde(default)]`, so a JSON override file only needs
//! to name the values it changes:
//!
//! ```
//! use sidescroll_core::config::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{ "physics": { "gravity": 1.0 } }"#).unwrap();
//! assert_eq!(config.physics.gravity, 1.0);
//! assert_eq!(config.player.jump_strength, 15.0);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::camera::CameraPolicy;
use crate::error::GameError;

/// Reference tick rate in ticks per second.
pub const TICK_RATE_HZ: u32 = 60;

// =============================================================================
// Sections
// =============================================================================

/// Size of the visible window in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Visible width.
    pub width: f32,
    /// Visible height. Also the vertical extent of every level.
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 500.0,
        }
    }
}

/// Level-wide layout and progression settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Horizontal extent of every level.
    pub width: f32,
    /// The level is complete once the player's left edge passes
    /// `width - end_margin`.
    pub end_margin: f32,
    /// Ticks spent in the level-complete state before the next level loads.
    pub transition_ticks: u32,
    /// Top-left corner where the player starts each level.
    pub spawn_point: Vec2,
    /// Height of the full-width ground platform in the reference layout.
    pub ground_height: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: 3000.0,
            end_margin: 60.0,
            transition_ticks: 60,
            spawn_point: Vec2::new(100.0, 400.0),
            ground_height: 40.0,
        }
    }
}

/// Global physics constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration added to vertical velocity every tick.
    pub gravity: f32,
    /// Maximum downward speed. Kept below the thinnest platform so a falling
    /// body cannot skip over one in a single tick.
    pub terminal_velocity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            terminal_velocity: 16.0,
        }
    }
}

/// A projectile template: how fast it flies and how hard it hits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    /// Speed in pixels per tick.
    pub speed: f32,
    /// Damage dealt on impact.
    pub damage: u32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            damage: 40,
        }
    }
}

/// Player tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal speed while a direction is held.
    pub speed: f32,
    /// Upward speed given by a jump.
    pub jump_strength: f32,
    /// Health at spawn and after losing a life.
    pub max_health: u32,
    /// Lives at the start of a game.
    pub starting_lives: u32,
    /// Ticks of damage immunity after being hurt.
    pub invincibility_frames: u32,
    /// Ticks after leaving the ground during which a jump still succeeds.
    /// Zero disables the grace window.
    pub coyote_frames: u32,
    /// The player's projectile.
    pub shot: ShotConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            jump_strength: 15.0,
            max_health: 100,
            starting_lives: 3,
            invincibility_frames: 60,
            coyote_frames: 6,
            shot: ShotConfig::default(),
        }
    }
}

/// Regular enemy tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Patrol speed.
    pub speed: f32,
    /// Starting health.
    pub health: u32,
    /// Damage dealt to the player on contact.
    pub contact_damage: u32,
    /// Score awarded for the kill.
    pub score: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            health: 40,
            contact_damage: 20,
            score: 100,
        }
    }
}

/// Boss tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    /// Patrol speed.
    pub speed: f32,
    /// Starting health.
    pub health: u32,
    /// Damage dealt to the player on contact.
    pub contact_damage: u32,
    /// Score awarded for the kill.
    pub score: u32,
    /// Ticks between shots.
    pub fire_interval: u32,
    /// The boss only fires while the player is within this horizontal
    /// distance of its centre.
    pub fire_range: f32,
    /// The boss's projectile.
    pub shot: ShotConfig,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            health: 200,
            contact_damage: 40,
            score: 1000,
            fire_interval: 90,
            fire_range: 900.0,
            shot: ShotConfig {
                speed: 6.0,
                damage: 20,
            },
        }
    }
}

/// Collectible values. Fixed here once for every level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectibleConfig {
    /// Points granted by a score pickup.
    pub score_value: u32,
    /// Health restored by a health pickup (capped at max health).
    pub health_value: u32,
    /// Bonus points for picking up health.
    pub health_pickup_score: u32,
    /// Lives granted by a life pickup.
    pub life_value: u32,
    /// Bonus points for picking up a life.
    pub life_pickup_score: u32,
}

impl Default for CollectibleConfig {
    fn default() -> Self {
        Self {
            score_value: 10,
            health_value: 30,
            health_pickup_score: 20,
            life_value: 1,
            life_pickup_score: 100,
        }
    }
}

/// Hitbox dimensions supplied by the asset side. Only the sizes matter to
/// the simulation; pixels are the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxSizes {
    /// Player hitbox.
    pub player: Vec2,
    /// Regular enemy hitbox.
    pub enemy: Vec2,
    /// Boss hitbox.
    pub boss: Vec2,
    /// Player projectile hitbox.
    pub player_shot: Vec2,
    /// Boss projectile hitbox.
    pub boss_shot: Vec2,
    /// Collectible hitbox.
    pub collectible: Vec2,
}

impl Default for HitboxSizes {
    fn default() -> Self {
        Self {
            player: Vec2::new(40.0, 60.0),
            enemy: Vec2::new(40.0, 60.0),
            boss: Vec2::new(60.0, 90.0),
            player_shot: Vec2::new(15.0, 5.0),
            boss_shot: Vec2::new(12.0, 12.0),
            collectible: Vec2::new(30.0, 30.0),
        }
    }
}

// =============================================================================
// GameConfig
// =============================================================================

/// Complete configuration for a [`Game`](crate::game::Game).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Visible window.
    pub viewport: ViewportConfig,
    /// Level layout and progression.
    pub level: LevelConfig,
    /// Gravity and terminal velocity.
    pub physics: PhysicsConfig,
    /// Player tuning.
    pub player: PlayerConfig,
    /// Regular enemy tuning.
    pub enemy: EnemyConfig,
    /// Boss tuning.
    pub boss: BossConfig,
    /// Pickup values.
    pub collectible: CollectibleConfig,
    /// Camera follow policy.
    pub camera: CameraPolicy,
    /// Hitbox dimensions.
    pub hitboxes: HitboxSizes,
}

impl GameConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Parse`] for malformed JSON and
    /// [`GameError::InvalidConfig`] if the parsed values fail [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable by the simulation.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] naming the first offending value.
    pub fn validate(&self) -> Result<(), GameError> {
        fn check(ok: bool, message: &str) -> Result<(), GameError> {
            if ok {
                Ok(())
            } else {
                Err(GameError::InvalidConfig(message.to_string()))
            }
        }

        check(
            self.viewport.width > 0.0 && self.viewport.height > 0.0,
            "viewport dimensions must be positive",
        )?;
        check(
            self.level.width >= self.viewport.width,
            "level width must be at least the viewport width",
        )?;
        check(
            self.level.end_margin >= 0.0 && self.level.end_margin < self.level.width,
            "level end margin must lie inside the level",
        )?;
        check(
            self.level.end_margin > self.hitboxes.player.x,
            "level end margin must exceed the player width",
        )?;
        check(self.physics.gravity > 0.0, "gravity must be positive")?;
        check(
            self.physics.terminal_velocity > 0.0,
            "terminal velocity must be positive",
        )?;
        check(self.player.speed >= 0.0, "player speed must not be negative")?;
        check(
            self.player.jump_strength > 0.0,
            "jump strength must be positive",
        )?;
        check(self.player.max_health > 0, "max health must be positive")?;
        check(self.enemy.health > 0, "enemy health must be positive")?;
        check(self.boss.health > 0, "boss health must be positive")?;
        check(self.boss.fire_interval > 0, "boss fire interval must be positive")?;
        if let CameraPolicy::Smoothed { lag, anchor } = self.camera {
            check(lag > 0.0 && lag <= 1.0, "camera lag must lie in (0, 1]")?;
            check(
                (0.0..=1.0).contains(&anchor),
                "camera anchor must lie in [0, 1]",
            )?;
        }
        let sizes = [
            self.hitboxes.player,
            self.hitboxes.enemy,
            self.hitboxes.boss,
            self.hitboxes.player_shot,
            self.hitboxes.boss_shot,
            self.hitboxes.collectible,
        ];
        check(
            sizes.iter().all(|s| s.x > 0.0 && s.y > 0.0),
            "hitbox sizes must be positive",
        )?;
        Ok(())
    }

    /// Horizontal range the camera offset may take.
    #[must_use]
    pub fn max_camera_offset(&self) -> f32 {
        (self.level.width - self.viewport.width).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_game() {
        let config = GameConfig::default();
        assert_eq!(config.viewport.width, 900.0);
        assert_eq!(config.viewport.height, 500.0);
        assert_eq!(config.level.width, 3000.0);
        assert_eq!(config.physics.gravity, 0.8);
        assert_eq!(config.player.jump_strength, 15.0);
        assert_eq!(config.player.speed, 5.0);
        assert_eq!(config.player.invincibility_frames, 60);
        assert_eq!(config.boss.health, 200);
        assert_eq!(config.player.shot.damage, 40);
    }

    #[test]
    fn defaults_validate() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_viewport_wider_than_level() {
        let mut config = GameConfig::default();
        config.level.width = 500.0;
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_non_positive_gravity() {
        let mut config = GameConfig::default();
        config.physics.gravity = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_camera_lag_out_of_range() {
        let mut config = GameConfig::default();
        config.camera = CameraPolicy::Smoothed {
            lag: 1.5,
            anchor: 0.5,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = GameConfig::from_json(
            r#"{ "player": { "coyote_frames": 0 }, "camera": "Centered" }"#,
        )
        .unwrap();
        assert_eq!(config.player.coyote_frames, 0);
        assert_eq!(config.player.max_health, 100);
        assert_eq!(config.camera, CameraPolicy::Centered);
    }

    #[test]
    fn from_json_validates() {
        let result = GameConfig::from_json(r#"{ "player": { "max_health": 0 } }"#);
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn serialization_roundtrip() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn max_camera_offset() {
        let config = GameConfig::default();
        assert_eq!(config.max_camera_offset(), 2100.0);
    }
}
