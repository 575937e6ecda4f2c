//! Game loop and state machine.
//!
//! The `Game` struct owns everything and advances it one fixed tick per
//! [`Game::step`] call:
//!
//! 1. **INPUT**: walk from held buttons, jump and shoot from pressed buttons
//! 2. **PLAYER**: gravity, axis-separated move and resolve, timers
//! 3. **ENEMIES**: patrol, boss fire
//! 4. **PROJECTILES**: move, prune at the level bounds
//! 5. **COMBAT**: projectile↔player, enemy↔player, projectile↔enemy,
//!    player↔collectible
//! 6. **LEVEL END**: the player's left edge passed the end margin
//! 7. **GAME OVER**: lives exhausted, which overrides a same-tick level end
//! 8. **CAMERA**: follow the player
//!
//! # States
//!
//! ```text
//! Playing ──end reached──▶ LevelComplete ──countdown──▶ Playing (next level)
//!    │
//!    ├──lives exhausted──▶ GameOver(Defeat)
//!    └──last level ended──▶ GameOver(Victory) ──restart──▶ Playing (level 1)
//! ```
//!
//! # Determinism
//!
//! Given the same configuration, seed and input sequence, a game produces an
//! identical sequence of states and render frames: level layouts come from a
//! seeded `ChaCha8Rng`, entity collections iterate in id order and nothing
//! reads the wall clock.
//!
//! # Example
//!
//! ```
//! use sidescroll_core::config::GameConfig;
//! use sidescroll_core::game::{Game, GameState};
//! use sidescroll_core::input::InputFrame;
//!
//! let mut game = Game::new(GameConfig::default(), 42).unwrap();
//!
//! for _ in 0..10 {
//!     game.step(InputFrame::idle());
//! }
//!
//! assert_eq!(game.tick(), 10);
//! assert_eq!(game.state(), GameState::Playing);
//! assert!(game.world().player.on_ground());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, info, trace};

use crate::camera::Camera;
use crate::config::GameConfig;
use crate::entity::Player;
use crate::error::GameError;
use crate::input::InputFrame;
use crate::level::{LevelManager, LevelTable};
use crate::render::{Hud, RenderFrame};
use crate::resolver::{CombatResolver, EventLog, GameEvent, PhysicsResolver};
use crate::world::World;

// =============================================================================
// State
// =============================================================================

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every life was lost.
    Defeat,
    /// The last level was cleared.
    Victory,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defeat => write!(f, "Defeat"),
            Self::Victory => write!(f, "Victory"),
        }
    }
}

/// Top-level game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// The simulation is running.
    Playing,
    /// Pause between levels.
    LevelComplete {
        /// Level loaded when the countdown ends.
        next_level: u32,
        /// Ticks left in the pause.
        ticks_remaining: u32,
    },
    /// The game has ended; only restart is accepted.
    GameOver(Outcome),
}

// =============================================================================
// Game
// =============================================================================

/// A running game: world, level manager, camera and state machine.
///
/// All game state is owned here. Subsystems borrow the world for one call at
/// a time.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    world: World,
    levels: LevelManager,
    camera: Camera,
    physics: PhysicsResolver,
    combat: CombatResolver,
    events: EventLog,
    state: GameState,
    tick: u64,
    quit: bool,
}

impl Game {
    /// Creates a game on the reference level layout generated from `seed`,
    /// with level 1 loaded.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        let table = LevelTable::reference(&config, seed);
        Self::with_levels(config, table, seed)
    }

    /// Creates a game on a custom level table, with level 1 loaded.
    ///
    /// # Errors
    ///
    /// Configuration or level-table validation errors.
    pub fn with_levels(
        config: GameConfig,
        table: LevelTable,
        seed: u64,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let mut levels = LevelManager::new(table, config)?;
        let mut world = Self::fresh_world(&config);
        levels.load(1, &mut world)?;

        let mut events = EventLog::new();
        events.record(GameEvent::LevelLoaded { level: 1 });
        info!(seed, levels = levels.table().len(), "game created");

        Ok(Self {
            camera: Camera::new(config.camera, config.viewport.width, config.level.width),
            physics: PhysicsResolver::from_config(&config),
            combat: CombatResolver::from_config(&config),
            config,
            seed,
            world,
            levels,
            events,
            state: GameState::Playing,
            tick: 0,
            quit: false,
        })
    }

    fn fresh_world(config: &GameConfig) -> World {
        let player = Player::new(&config.player, config.level.spawn_point, config.hitboxes.player);
        World::new(player, config.level.width, config.viewport.height)
    }

    // ===== Accessors =====

    /// State after the last tick.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Number of ticks stepped, quit ticks excluded.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Seed the reference layout was generated from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably. Intended for tests and tooling.
    #[must_use]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Level currently loaded.
    #[must_use]
    pub const fn current_level(&self) -> u32 {
        self.levels.current_level()
    }

    /// Score so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.world.score()
    }

    /// Returns `true` once quit has been pressed.
    #[must_use]
    pub const fn is_quit(&self) -> bool {
        self.quit
    }

    /// Returns `true` in the game-over state.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.state, GameState::GameOver(_))
    }

    /// Drains the events recorded by the last [`step`](Self::step), or by
    /// construction or [`restart`](Self::restart) if no step has run since.
    ///
    /// Every `step` starts a fresh log, so events a caller never drains are
    /// dropped rather than accumulated.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.take_events()
    }

    /// Snapshot for the renderer.
    #[must_use]
    pub fn render_frame(&self) -> RenderFrame {
        let hud = Hud::new(&self.world, self.levels.current_level(), self.state);
        let viewport = glam::Vec2::new(self.config.viewport.width, self.config.viewport.height);
        RenderFrame::capture(self.tick, &self.world, &self.camera, viewport, hud)
    }

    // ===== Stepping =====

    /// Advances the game by one tick and returns the resulting state.
    ///
    /// Quit is handled first and does not count as a tick. While playing the
    /// tick runs the full update; during the level pause only the countdown
    /// runs; after game over only restart does anything.
    pub fn step(&mut self, input: InputFrame) -> GameState {
        self.events.clear();
        if input.quit() {
            if !self.quit {
                info!(tick = self.tick, "quit requested");
            }
            self.quit = true;
            return self.state;
        }

        self.tick += 1;
        match self.state {
            GameState::Playing => self.step_playing(input),
            GameState::LevelComplete {
                next_level,
                ticks_remaining,
            } => {
                let ticks_remaining = ticks_remaining.saturating_sub(1);
                if ticks_remaining == 0 {
                    self.enter_level(next_level);
                } else {
                    self.state = GameState::LevelComplete {
                        next_level,
                        ticks_remaining,
                    };
                }
            }
            GameState::GameOver(_) => {
                if input.restart() {
                    if let Err(err) = self.restart() {
                        error!(%err, "restart failed");
                    }
                }
            }
        }
        trace!(tick = self.tick, state = ?self.state, "tick");
        self.state
    }

    fn step_playing(&mut self, input: InputFrame) {
        self.apply_input(input);

        let (player, platforms) = self.world.player_and_platforms_mut();
        self.physics.update_player(player, platforms);

        self.update_enemies();
        self.physics.update_projectiles(&mut self.world);
        self.combat.resolve(&mut self.world, &mut self.events);

        let level_end = self.config.level.width - self.config.level.end_margin;
        let reached_end = self.world.player.rect.left() > level_end;
        if self.world.player.is_exhausted() {
            self.finish(Outcome::Defeat);
        } else if reached_end {
            self.complete_level();
        }

        self.camera.update(&self.world.player.rect);
    }

    fn apply_input(&mut self, input: InputFrame) {
        let player = &mut self.world.player;
        player.walk(input.direction());
        if input.jump() && player.jump() {
            self.events.record(GameEvent::PlayerJumped);
        }
        if input.shoot() {
            let shot = self.world.player.shoot(self.config.hitboxes.player_shot);
            let owner = shot.owner;
            let id = self.world.spawn_projectile(shot);
            self.events.record(GameEvent::ProjectileFired { id, owner });
        }
    }

    fn update_enemies(&mut self) {
        let target = self.world.player.rect.center();
        for id in self.world.enemy_ids() {
            let Some(shot) = self.world.enemy_mut(id).and_then(|e| e.update(target)) else {
                continue;
            };
            let owner = shot.owner;
            let shot_id = self.world.spawn_projectile(shot);
            debug!(boss = %id, projectile = %shot_id, "boss fired");
            self.events.record(GameEvent::ProjectileFired { id: shot_id, owner });
        }
    }

    fn complete_level(&mut self) {
        let level = self.levels.current_level();
        self.events.record(GameEvent::LevelCompleted { level });
        match self.levels.next_level() {
            Some(next_level) => {
                info!(level, next_level, score = self.world.score(), "level complete");
                self.state = GameState::LevelComplete {
                    next_level,
                    ticks_remaining: self.config.level.transition_ticks,
                };
            }
            None => self.finish(Outcome::Victory),
        }
    }

    /// A level that cannot be loaded ends the game as a defeat; the previous
    /// level is never resumed.
    fn enter_level(&mut self, level: u32) {
        if let Err(err) = self.levels.load(level, &mut self.world) {
            error!(%err, level, "level load failed, ending game");
            self.finish(Outcome::Defeat);
            return;
        }
        self.world.player.respawn_at(self.config.level.spawn_point);
        self.camera.reset();
        self.events.record(GameEvent::LevelLoaded { level });
        self.state = GameState::Playing;
    }

    fn finish(&mut self, outcome: Outcome) {
        let score = self.world.score();
        info!(%outcome, score, level = self.levels.current_level(), "game over");
        self.events.record(GameEvent::GameOver { outcome, score });
        self.state = GameState::GameOver(outcome);
    }

    /// Starts over from level 1 with a fresh player and zero score.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidLevel`] if the table has no level 1, which a
    /// validated table always has. The game is unchanged on error.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let mut world = Self::fresh_world(&self.config);
        self.levels.load(1, &mut world)?;
        self.world = world;
        self.camera.reset();
        self.state = GameState::Playing;
        self.events.record(GameEvent::Restarted);
        self.events.record(GameEvent::LevelLoaded { level: 1 });
        info!(tick = self.tick, "game restarted");
        Ok(())
    }
}
