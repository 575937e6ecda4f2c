//! Declarative levels and the load/unload lifecycle.
//!
//! A [`LevelTable`] maps level numbers (from 1, contiguous) to [`LevelSpec`]
//! spawn tables. Tables are plain serde data, so a host can ship them as JSON;
//! [`LevelTable::reference`] generates the built-in three-level layout from a
//! seed.
//!
//! The [`LevelManager`] owns a validated table and populates a
//! [`World`](crate::world::World) from it. Loading replaces every platform,
//! enemy, projectile and collectible but never touches the player.
//!
//! # Example
//!
//! ```
//! use sidescroll_core::config::GameConfig;
//! use sidescroll_core::entity::Player;
//! use sidescroll_core::level::{LevelManager, LevelTable};
//! use sidescroll_core::world::World;
//! use sidescroll_core::GameError;
//!
//! let config = GameConfig::default();
//! let mut manager = LevelManager::new(LevelTable::reference(&config, 7), config).unwrap();
//! let player = Player::new(&config.player, config.level.spawn_point, config.hitboxes.player);
//! let mut world = World::new(player, config.level.width, config.viewport.height);
//!
//! manager.load(1, &mut world).unwrap();
//! assert_eq!(world.platforms().len(), 11);
//!
//! let err = manager.load(9, &mut world).unwrap_err();
//! assert!(matches!(err, GameError::InvalidLevel { level: 9, .. }));
//! ```

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GameConfig;
use crate::entity::{Collectible, CollectibleKind, Enemy, Platform};
use crate::error::GameError;
use crate::geometry::Rect;
use crate::world::World;

/// Number of levels in the reference layout. The boss guards the last one.
pub const REFERENCE_LEVEL_COUNT: u32 = 3;

// Reference layout constants.
const ELEVATED_PLATFORMS: u8 = 10;
const FIRST_PLATFORM_X: f32 = 300.0;
const END_CLEARANCE: f32 = 200.0;
const PLATFORM_JITTER: f32 = 50.0;
const JITTER_SHARE: f32 = 0.2;
const PLATFORM_BASE_RISE: f32 = 120.0;
const PLATFORM_RISE_RANGE: f32 = 120.0;
const PLATFORM_SIZE: Vec2 = Vec2::new(120.0, 20.0);
const BOSS_INSET: f32 = 300.0;
const BOSS_PATROL: f32 = 200.0;

// =============================================================================
// Spawn tables
// =============================================================================

/// Enemy variant to spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    /// A regular patrolling enemy.
    Normal,
    /// The boss.
    Boss,
}

/// One enemy in a level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Variant.
    pub kind: SpawnKind,
    /// Top-left corner at spawn, also the left end of the patrol.
    pub position: Vec2,
    /// Patrol length to the right of `position`.
    #[serde(default)]
    pub patrol_width: f32,
}

/// One collectible in a level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectibleSpawn {
    /// Effect.
    pub kind: CollectibleKind,
    /// Top-left corner.
    pub position: Vec2,
    /// Overrides the configured value for this kind.
    #[serde(default)]
    pub value: Option<u32>,
}

/// Everything placed in one level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Static geometry.
    pub platforms: Vec<Rect>,
    /// Enemies, spawned in order.
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    /// Pickups, spawned in order.
    #[serde(default)]
    pub collectibles: Vec<CollectibleSpawn>,
}

/// Level specs keyed by level number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    levels: BTreeMap<u32, LevelSpec>,
}

impl FromIterator<(u32, LevelSpec)> for LevelTable {
    fn from_iter<I: IntoIterator<Item = (u32, LevelSpec)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}

impl LevelTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a level.
    pub fn insert(&mut self, level: u32, spec: LevelSpec) {
        self.levels.insert(level, spec);
    }

    /// Looks up a level.
    #[must_use]
    pub fn get(&self, level: u32) -> Option<&LevelSpec> {
        self.levels.get(&level)
    }

    /// Defined level numbers in ascending order.
    #[must_use]
    pub fn level_numbers(&self) -> Vec<u32> {
        self.levels.keys().copied().collect()
    }

    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` if no levels are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Checks that the table is non-empty, numbered 1, 2, 3, ... without gaps,
    /// and that every level has a platform.
    ///
    /// # Errors
    ///
    /// [`GameError::EmptyLevelTable`], [`GameError::NonContiguousLevels`] or
    /// [`GameError::EmptyLevel`].
    pub fn validate(&self) -> Result<(), GameError> {
        if self.levels.is_empty() {
            return Err(GameError::EmptyLevelTable);
        }
        for (expected, (&found, spec)) in (1..).zip(&self.levels) {
            if found != expected {
                return Err(GameError::NonContiguousLevels { expected, found });
            }
            if spec.platforms.is_empty() {
                return Err(GameError::EmptyLevel(found));
            }
        }
        Ok(())
    }

    /// Parses and validates a table from JSON.
    ///
    /// # Errors
    ///
    /// [`GameError::Parse`] for malformed JSON, otherwise whatever
    /// [`validate`](Self::validate) reports.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Serializes the table as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`GameError::Parse`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the reference layout: [`REFERENCE_LEVEL_COUNT`] levels, each a
    /// full-width ground plus ten jittered elevated platforms, with the boss
    /// near the end of the last level. The same seed always yields the same
    /// table.
    #[must_use]
    pub fn reference(config: &GameConfig, seed: u64) -> Self {
        (1..=REFERENCE_LEVEL_COUNT)
            .map(|level| (level, reference_level(config, seed, level)))
            .collect()
    }
}

fn level_rng(seed: u64, level: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed ^ u64::from(level).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn reference_level(config: &GameConfig, seed: u64, level: u32) -> LevelSpec {
    let mut rng = level_rng(seed, level);
    let width = config.level.width;
    let height = config.viewport.height;
    let ground_height = config.level.ground_height;
    let sizes = &config.hitboxes;

    let mut spec = LevelSpec {
        platforms: vec![Rect::new(0.0, height - ground_height, width, ground_height)],
        ..LevelSpec::default()
    };

    // Platforms spread over the level width; 250 apart at the default 3000.
    let spacing =
        ((width - FIRST_PLATFORM_X - END_CLEARANCE) / f32::from(ELEVATED_PLATFORMS)).max(0.0);
    let jitter = PLATFORM_JITTER.min(spacing * JITTER_SHARE);
    let max_x = (width - PLATFORM_SIZE.x).max(0.0);

    for i in 0..ELEVATED_PLATFORMS {
        let x = FIRST_PLATFORM_X + f32::from(i) * spacing + rng.gen_range(-jitter..=jitter);
        let x = x.min(max_x).max(0.0);
        let y = height - PLATFORM_BASE_RISE - rng.gen_range(0.0..PLATFORM_RISE_RANGE);
        let platform = Rect::from_position(Vec2::new(x, y), PLATFORM_SIZE);
        spec.platforms.push(platform);

        let pickup_at = Vec2::new(
            platform.center().x - sizes.collectible.x * 0.5,
            platform.top() - sizes.collectible.y,
        );
        if i % 3 == 0 {
            spec.enemies.push(EnemySpawn {
                kind: SpawnKind::Normal,
                position: Vec2::new(platform.left(), platform.top() - sizes.enemy.y),
                patrol_width: (platform.w - sizes.enemy.x).max(0.0),
            });
        }
        if i % 4 == 0 {
            spec.collectibles.push(CollectibleSpawn {
                kind: CollectibleKind::Health,
                position: pickup_at,
                value: None,
            });
        }
        if i == 2 || i == 6 {
            spec.collectibles.push(CollectibleSpawn {
                kind: CollectibleKind::Score,
                position: pickup_at,
                value: None,
            });
        }
        if level == 2 && i == 7 {
            spec.collectibles.push(CollectibleSpawn {
                kind: CollectibleKind::Life,
                position: pickup_at,
                value: None,
            });
        }
    }

    if level == REFERENCE_LEVEL_COUNT {
        let x = (width - BOSS_INSET).max(0.0);
        spec.enemies.push(EnemySpawn {
            kind: SpawnKind::Boss,
            position: Vec2::new(x, height - ground_height - sizes.boss.y),
            patrol_width: BOSS_PATROL.min(width - x - sizes.boss.x).max(0.0),
        });
    }
    spec
}

// =============================================================================
// LevelManager
// =============================================================================

/// Owns the level table and populates the world from it.
#[derive(Debug, Clone)]
pub struct LevelManager {
    table: LevelTable,
    config: GameConfig,
    current: u32,
}

impl LevelManager {
    /// Creates a manager over a validated table. No level is loaded yet.
    ///
    /// # Errors
    ///
    /// Whatever [`LevelTable::validate`] reports.
    pub fn new(table: LevelTable, config: GameConfig) -> Result<Self, GameError> {
        table.validate()?;
        Ok(Self {
            table,
            config,
            current: 0,
        })
    }

    /// The level table.
    #[must_use]
    pub const fn table(&self) -> &LevelTable {
        &self.table
    }

    /// Level currently loaded, 0 before the first load.
    #[must_use]
    pub const fn current_level(&self) -> u32 {
        self.current
    }

    /// Level after the current one, if any.
    #[must_use]
    pub fn next_level(&self) -> Option<u32> {
        let next = self.current.checked_add(1)?;
        self.table.get(next).map(|_| next)
    }

    /// Replaces the world's level contents with level `level`.
    ///
    /// The player and the score are left as they are.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidLevel`] if the table has no such level. The world
    /// is not modified in that case.
    pub fn load(&mut self, level: u32, world: &mut World) -> Result<(), GameError> {
        let spec = self.table.get(level).ok_or_else(|| GameError::InvalidLevel {
            level,
            available: self.table.level_numbers(),
        })?;

        world.clear_level();
        for rect in &spec.platforms {
            world.add_platform(Platform::new(*rect));
        }
        for spawn in &spec.enemies {
            world.spawn_enemy(self.build_enemy(spawn));
        }
        for spawn in &spec.collectibles {
            world.spawn_collectible(self.build_collectible(spawn));
        }
        self.current = level;

        info!(
            level,
            platforms = spec.platforms.len(),
            enemies = spec.enemies.len(),
            collectibles = spec.collectibles.len(),
            "level loaded"
        );
        Ok(())
    }

    fn build_enemy(&self, spawn: &EnemySpawn) -> Enemy {
        let sizes = &self.config.hitboxes;
        match spawn.kind {
            SpawnKind::Normal => Enemy::normal(
                spawn.position,
                spawn.patrol_width,
                &self.config.enemy,
                sizes.enemy,
            ),
            SpawnKind::Boss => Enemy::boss(
                spawn.position,
                spawn.patrol_width,
                &self.config.boss,
                sizes.boss,
                sizes.boss_shot,
            ),
        }
    }

    fn build_collectible(&self, spawn: &CollectibleSpawn) -> Collectible {
        let values = &self.config.collectible;
        let value = spawn.value.unwrap_or(match spawn.kind {
            CollectibleKind::Score => values.score_value,
            CollectibleKind::Health => values.health_value,
            CollectibleKind::Life => values.life_value,
        });
        Collectible::new(
            Rect::from_position(spawn.position, self.config.hitboxes.collectible),
            spawn.kind,
            value,
        )
    }
}
