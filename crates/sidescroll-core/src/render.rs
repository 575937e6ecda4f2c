//! Per-tick snapshot for the renderer.
//!
//! The core never draws. Once per tick a host asks the game for a
//! [`RenderFrame`]: every visible entity as a screen-space rectangle plus the
//! HUD values. Frames are plain serde data so a host can stream them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::entity::{EntityId, EntityKind, Owner};
use crate::game::{GameState, Outcome};
use crate::geometry::Rect;
use crate::world::World;

/// One drawable thing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// What to draw.
    pub kind: EntityKind,
    /// Entity id for dynamic entities, `None` for the player and platforms.
    pub id: Option<EntityId>,
    /// Screen-space rectangle.
    pub rect: Rect,
    /// Health bar fill for entities that have health.
    pub health_fraction: Option<f32>,
}

/// Heads-up display values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    /// Player health as a fraction of max.
    pub health_fraction: f32,
    /// Player health.
    pub health: u32,
    /// Remaining lives.
    pub lives: u32,
    /// Score.
    pub score: u32,
    /// Level number.
    pub level: u32,
    /// Game state after the tick.
    pub state: GameState,
    /// Whether the game has ended.
    pub game_over: bool,
    /// How it ended, once it has.
    pub outcome: Option<Outcome>,
}

impl Hud {
    /// Builds the HUD from the world and the game state.
    #[must_use]
    pub fn new(world: &World, level: u32, state: GameState) -> Self {
        let outcome = match state {
            GameState::GameOver(outcome) => Some(outcome),
            GameState::Playing | GameState::LevelComplete { .. } => None,
        };
        Self {
            health_fraction: world.player.health_fraction(),
            health: world.player.health(),
            lives: world.player.lives(),
            score: world.score(),
            level,
            state,
            game_over: outcome.is_some(),
            outcome,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Tick this frame was captured after.
    pub tick: u64,
    /// Camera offset into level space.
    pub camera_offset: f32,
    /// Visible entities, back to front: platforms, collectibles, enemies,
    /// projectiles, player.
    pub sprites: Vec<Sprite>,
    /// HUD values.
    pub hud: Hud,
}

impl RenderFrame {
    /// Captures the visible part of `world` through `camera`.
    ///
    /// Entities entirely outside the `viewport` are left out.
    #[must_use]
    pub fn capture(tick: u64, world: &World, camera: &Camera, viewport: Vec2, hud: Hud) -> Self {
        let screen = Rect::from_position(Vec2::ZERO, viewport);
        let mut sprites = Vec::new();
        let mut push = |kind: EntityKind,
                        id: Option<EntityId>,
                        rect: &Rect,
                        health_fraction: Option<f32>| {
            let rect = camera.apply(rect);
            if rect.intersects(&screen) {
                sprites.push(Sprite {
                    kind,
                    id,
                    rect,
                    health_fraction,
                });
            }
        };

        for platform in world.platforms() {
            push(EntityKind::Platform, None, &platform.rect, None);
        }
        for (id, item) in world.collectibles() {
            push(EntityKind::Collectible(item.kind), Some(id), &item.rect, None);
        }
        for (id, enemy) in world.enemies() {
            let kind = if enemy.is_boss() {
                EntityKind::Boss
            } else {
                EntityKind::Enemy
            };
            push(kind, Some(id), &enemy.rect, Some(enemy.health_fraction()));
        }
        for (id, shot) in world.projectiles() {
            let kind = match shot.owner {
                Owner::Player => EntityKind::PlayerShot,
                Owner::Enemy => EntityKind::EnemyShot,
            };
            push(kind, Some(id), &shot.rect, None);
        }
        push(
            EntityKind::Player,
            None,
            &world.player.rect,
            Some(world.player.health_fraction()),
        );

        Self {
            tick,
            camera_offset: camera.offset(),
            sprites,
            hud,
        }
    }

    /// Sprites of one kind.
    pub fn sprites_of(&self, kind: EntityKind) -> impl Iterator<Item = &Sprite> + '_ {
        self.sprites.iter().filter(move |s| s.kind == kind)
    }
}
