//! Test helper functions for setting up games and worlds.

use glam::Vec2;

use crate::config::GameConfig;
use crate::entity::{Enemy, EntityId, Owner, Player, Projectile};
use crate::game::{Game, GameState};
use crate::geometry::Rect;
use crate::input::{Buttons, InputFrame};
use crate::level::{EnemySpawn, LevelSpec, LevelTable, SpawnKind};
use crate::world::World;

// =============================================================================
// Levels
// =============================================================================

/// The full-width ground of the default configuration.
pub fn ground_rect() -> Rect {
    Rect::new(0.0, 460.0, 3000.0, 40.0)
}

/// A level with nothing but the ground.
pub fn flat_level() -> LevelSpec {
    LevelSpec {
        platforms: vec![ground_rect()],
        ..LevelSpec::default()
    }
}

/// A table of `count` flat levels.
pub fn flat_table(count: u32) -> LevelTable {
    (1..=count).map(|level| (level, flat_level())).collect()
}

/// A single flat level guarded by a boss whose left edge starts at `boss_x`.
pub fn boss_table(boss_x: f32) -> LevelTable {
    let mut level = flat_level();
    level.enemies.push(EnemySpawn {
        kind: SpawnKind::Boss,
        position: Vec2::new(boss_x, 370.0),
        patrol_width: 0.0,
    });
    [(1, level)].into_iter().collect()
}

// =============================================================================
// Games
// =============================================================================

/// A game over `count` flat levels with the default configuration.
pub fn flat_game(count: u32) -> Game {
    Game::with_levels(GameConfig::default(), flat_table(count), 0).unwrap()
}

/// A game over `table` with `config`.
pub fn game_with(config: GameConfig, table: LevelTable) -> Game {
    Game::with_levels(config, table, 0).unwrap()
}

/// A fresh player at the default spawn point.
pub fn spawn_player(config: &GameConfig) -> Player {
    Player::new(&config.player, config.level.spawn_point, config.hitboxes.player)
}

/// An empty world around a fresh player.
pub fn empty_world(config: &GameConfig) -> World {
    World::new(spawn_player(config), config.level.width, config.viewport.height)
}

/// Moves the player to `x`, standing on the ground.
pub fn teleport_player(game: &mut Game, x: f32) {
    let player = &mut game.world_mut().player;
    player.rect.set_position(Vec2::new(x, 400.0));
    player.velocity = Vec2::ZERO;
}

/// Spawns a motionless projectile centred on `center`.
pub fn place_shot(game: &mut Game, center: Vec2, owner: Owner, damage: u32) -> EntityId {
    game.world_mut().spawn_projectile(Projectile::new(
        Rect::from_center(center, Vec2::new(15.0, 5.0)),
        Vec2::ZERO,
        damage,
        owner,
    ))
}

/// The only boss in the world, if alive.
pub fn boss_of(game: &Game) -> Option<(EntityId, &Enemy)> {
    game.world().enemies().find(|(_, e)| e.is_boss())
}

// =============================================================================
// Input
// =============================================================================

/// Buttons held with nothing newly pressed.
pub fn hold(buttons: Buttons) -> InputFrame {
    InputFrame::new(buttons, Buttons::empty())
}

/// Buttons pressed this tick.
pub fn press(buttons: Buttons) -> InputFrame {
    InputFrame::new(buttons, buttons)
}

/// Steps `ticks` times with the same input and returns the final state.
pub fn run(game: &mut Game, input: InputFrame, ticks: usize) -> GameState {
    for _ in 0..ticks {
        game.step(input);
    }
    game.state()
}

/// A deterministic input script mixing walking, jumping and shooting.
pub fn scripted_inputs(len: usize) -> Vec<InputFrame> {
    let mut previous = Buttons::empty();
    (0..len)
        .map(|tick| {
            let mut current = match (tick / 90) % 4 {
                0 | 1 => Buttons::RIGHT,
                2 => Buttons::RIGHT | Buttons::SHOOT,
                _ => Buttons::LEFT,
            };
            if tick % 37 == 0 {
                current |= Buttons::JUMP;
            }
            if tick % 11 == 0 {
                current.remove(Buttons::SHOOT);
            }
            let frame = InputFrame::from_key_states(previous, current);
            previous = current;
            frame
        })
        .collect()
}
