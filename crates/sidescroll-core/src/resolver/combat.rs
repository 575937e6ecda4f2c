//! Combat resolver for cross-entity collisions.
//!
//! The `CombatResolver` handles, in this fixed order:
//! 1. Enemy projectiles hitting the player
//! 2. Contact damage from enemies touching the player
//! 3. Player projectiles hitting enemies
//! 4. The player picking up collectibles
//!
//! # Removal Handling
//!
//! Spent projectiles, dead enemies and collected pickups are removed from the
//! world immediately. Each pass snapshots the ids it walks first, then looks
//! every entity up again, so removals never skip or repeat an entity.

use tracing::debug;

use crate::config::{CollectibleConfig, GameConfig};
use crate::entity::{CollectibleKind, DamageOutcome, EntityId, Owner};
use crate::world::World;

use super::event::{EventLog, GameEvent};

/// Resolver for damage, kills and pickups.
///
/// Overlap is plain rectangle intersection, not a sweep; a very fast
/// projectile can tunnel past a thin target.
///
/// # Example
///
/// ```
/// use sidescroll_core::config::GameConfig;
/// use sidescroll_core::entity::Player;
/// use sidescroll_core::resolver::{CombatResolver, EventLog};
/// use sidescroll_core::world::World;
///
/// let config = GameConfig::default();
/// let player = Player::new(&config.player, config.level.spawn_point, config.hitboxes.player);
/// let mut world = World::new(player, config.level.width, config.viewport.height);
/// let mut events = EventLog::new();
///
/// CombatResolver::from_config(&config).resolve(&mut world, &mut events);
/// assert!(events.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatResolver {
    collectibles: CollectibleConfig,
}

impl CombatResolver {
    /// Creates a combat resolver with the given pickup bonuses.
    #[must_use]
    pub const fn new(collectibles: CollectibleConfig) -> Self {
        Self { collectibles }
    }

    /// Creates a combat resolver from a full game configuration.
    #[must_use]
    pub const fn from_config(config: &GameConfig) -> Self {
        Self::new(config.collectible)
    }

    /// Runs every collision pass once.
    ///
    /// Pickups are skipped once the player has spent the last life, so a
    /// life pickup cannot revive a player who died earlier in the same pass.
    pub fn resolve(&self, world: &mut World, events: &mut EventLog) {
        Self::projectiles_vs_player(world, events);
        Self::enemies_vs_player(world, events);
        Self::projectiles_vs_enemies(world, events);
        if !world.player.is_exhausted() {
            self.player_vs_collectibles(world, events);
        }
    }

    /// Applies damage to the player and records what happened.
    fn damage_player(world: &mut World, amount: u32, events: &mut EventLog) {
        match world.player.take_damage(amount) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt => events.record(GameEvent::PlayerHurt {
                damage: amount,
                health: world.player.health(),
            }),
            DamageOutcome::LifeLost => {
                let lives = world.player.lives();
                debug!(lives, "player lost a life");
                events.record(GameEvent::LifeLost { lives });
            }
            DamageOutcome::Exhausted => {
                debug!("player lost the last life");
                events.record(GameEvent::LivesExhausted);
            }
        }
    }

    /// Enemy shots touching the player are consumed whether or not the
    /// player is invincible.
    fn projectiles_vs_player(world: &mut World, events: &mut EventLog) {
        let player_rect = world.player.rect;
        let hits: Vec<EntityId> = world
            .projectiles()
            .filter(|(_, p)| p.owner == Owner::Enemy && p.rect.intersects(&player_rect))
            .map(|(id, _)| id)
            .collect();

        for id in hits {
            if let Some(projectile) = world.despawn_projectile(id) {
                Self::damage_player(world, projectile.damage, events);
            }
        }
    }

    fn enemies_vs_player(world: &mut World, events: &mut EventLog) {
        let player_rect = world.player.rect;
        let contacts: Vec<u32> = world
            .enemies()
            .filter(|(_, e)| e.rect.intersects(&player_rect))
            .map(|(_, e)| e.contact_damage)
            .collect();

        for damage in contacts {
            Self::damage_player(world, damage, events);
        }
    }

    /// Each player shot hits at most one enemy: the lowest id it overlaps.
    fn projectiles_vs_enemies(world: &mut World, events: &mut EventLog) {
        for projectile_id in world.projectile_ids() {
            let Some(projectile) = world.projectile(projectile_id).copied() else {
                continue;
            };
            if projectile.owner != Owner::Player {
                continue;
            }
            let target = world
                .enemies()
                .find(|(_, e)| e.rect.intersects(&projectile.rect))
                .map(|(id, _)| id);
            let Some(enemy_id) = target else {
                continue;
            };

            world.despawn_projectile(projectile_id);
            let Some(enemy) = world.enemy_mut(enemy_id) else {
                continue;
            };
            if enemy.take_damage(projectile.damage) {
                let health = enemy.health();
                events.record(GameEvent::EnemyHit {
                    id: enemy_id,
                    damage: projectile.damage,
                    health,
                });
            } else if let Some(dead) = world.despawn_enemy(enemy_id) {
                world.add_score(dead.score);
                debug!(%enemy_id, boss = dead.is_boss(), score = world.score(), "enemy killed");
                events.record(GameEvent::EnemyKilled {
                    id: enemy_id,
                    boss: dead.is_boss(),
                    score: dead.score,
                });
            }
        }
    }

    fn player_vs_collectibles(&self, world: &mut World, events: &mut EventLog) {
        let player_rect = world.player.rect;
        let touched: Vec<EntityId> = world
            .collectibles()
            .filter(|(_, c)| c.rect.intersects(&player_rect))
            .map(|(id, _)| id)
            .collect();

        for id in touched {
            let Some(item) = world.despawn_collectible(id) else {
                continue;
            };
            match item.kind {
                CollectibleKind::Score => world.add_score(item.value),
                CollectibleKind::Health => {
                    world.player.heal(item.value);
                    world.add_score(self.collectibles.health_pickup_score);
                }
                CollectibleKind::Life => {
                    world.player.gain_lives(item.value);
                    world.add_score(self.collectibles.life_pickup_score);
                }
            }
            debug!(%id, kind = %item.kind, value = item.value, "collectible picked up");
            events.record(GameEvent::CollectiblePicked {
                id,
                kind: item.kind,
                value: item.value,
            });
        }
    }
}
