//! World container for a running game.
//!
//! The [`World`] is the single owner of everything that exists in the current
//! level: the player, the static platforms, the dynamic entity collections
//! and the score. Subsystems borrow it mutably for the duration of one call.
//!
//! # Architecture
//!
//! Dynamic entities (enemies, projectiles, collectibles) live in `BTreeMap`s
//! keyed by [`EntityId`]. Ids come from one monotonically increasing counter
//! shared by all three collections, so iterating any collection visits
//! entities in spawn order and two runs with the same inputs visit them
//! identically.
//!
//! Code that removes entities while walking a collection first snapshots the
//! ids (`enemy_ids()` and friends) and then looks each one up again, so no
//! entity is skipped or visited twice.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use sidescroll_core::config::GameConfig;
//! use sidescroll_core::entity::{Enemy, Player};
//! use sidescroll_core::world::World;
//!
//! let config = GameConfig::default();
//! let player = Player::new(&config.player, config.level.spawn_point, config.hitboxes.player);
//! let mut world = World::new(player, config.level.width, config.viewport.height);
//!
//! let enemy_at = |x| Enemy::normal(Vec2::new(x, 0.0), 80.0, &config.enemy, config.hitboxes.enemy);
//! let a = world.spawn_enemy(enemy_at(300.0));
//! let b = world.spawn_enemy(enemy_at(600.0));
//!
//! assert_eq!(world.enemy_ids(), vec![a, b]);
//! assert!(world.despawn_enemy(a).is_some());
//! assert_eq!(world.enemy_count(), 1);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{Collectible, Enemy, EntityId, Platform, Player, Projectile};
use crate::geometry::Rect;

/// Container for the player, the level contents and the score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// The player character.
    pub player: Player,
    /// Static geometry of the current level.
    platforms: Vec<Platform>,
    /// Live enemies.
    enemies: BTreeMap<EntityId, Enemy>,
    /// Projectiles in flight.
    projectiles: BTreeMap<EntityId, Projectile>,
    /// Pickups not yet collected.
    collectibles: BTreeMap<EntityId, Collectible>,
    /// Points accumulated this game.
    score: u32,
    /// Monotonically increasing entity id counter.
    next_id: u64,
    /// `[0, level_width] × [0, viewport_height]`.
    bounds: Rect,
}

impl World {
    /// Creates an empty level around `player`.
    #[must_use]
    pub fn new(player: Player, level_width: f32, level_height: f32) -> Self {
        Self {
            player,
            platforms: Vec::new(),
            enemies: BTreeMap::new(),
            projectiles: BTreeMap::new(),
            collectibles: BTreeMap::new(),
            score: 0,
            next_id: 0,
            bounds: Rect::new(0.0, 0.0, level_width, level_height),
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Level extent. Projectiles leaving it are removed.
    #[must_use]
    pub const fn bounds(&self) -> &Rect {
        &self.bounds
    }

    // ===== Score =====

    /// Points accumulated this game.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Adds points, saturating at `u32::MAX`.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    // ===== Platforms =====

    /// Adds a platform to the current level.
    pub fn add_platform(&mut self, platform: Platform) {
        self.platforms.push(platform);
    }

    /// Static geometry of the current level.
    #[must_use]
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Borrows the player mutably alongside the platforms it collides with.
    pub fn player_and_platforms_mut(&mut self) -> (&mut Player, &[Platform]) {
        (&mut self.player, &self.platforms)
    }

    // ===== Enemies =====

    /// Adds an enemy and returns its id.
    pub fn spawn_enemy(&mut self, enemy: Enemy) -> EntityId {
        let id = self.allocate_id();
        self.enemies.insert(id, enemy);
        id
    }

    /// Removes an enemy.
    pub fn despawn_enemy(&mut self, id: EntityId) -> Option<Enemy> {
        self.enemies.remove(&id)
    }

    /// Looks up an enemy.
    #[must_use]
    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    /// Looks up an enemy mutably.
    #[must_use]
    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.get_mut(&id)
    }

    /// Snapshot of enemy ids in spawn order.
    #[must_use]
    pub fn enemy_ids(&self) -> Vec<EntityId> {
        self.enemies.keys().copied().collect()
    }

    /// Enemies in spawn order.
    pub fn enemies(&self) -> impl Iterator<Item = (EntityId, &Enemy)> + '_ {
        self.enemies.iter().map(|(id, e)| (*id, e))
    }

    /// Number of live enemies.
    #[must_use]
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    // ===== Projectiles =====

    /// Adds a projectile and returns its id.
    pub fn spawn_projectile(&mut self, projectile: Projectile) -> EntityId {
        let id = self.allocate_id();
        self.projectiles.insert(id, projectile);
        id
    }

    /// Removes a projectile.
    pub fn despawn_projectile(&mut self, id: EntityId) -> Option<Projectile> {
        self.projectiles.remove(&id)
    }

    /// Looks up a projectile.
    #[must_use]
    pub fn projectile(&self, id: EntityId) -> Option<&Projectile> {
        self.projectiles.get(&id)
    }

    /// Snapshot of projectile ids in spawn order.
    #[must_use]
    pub fn projectile_ids(&self) -> Vec<EntityId> {
        self.projectiles.keys().copied().collect()
    }

    /// Projectiles in spawn order.
    pub fn projectiles(&self) -> impl Iterator<Item = (EntityId, &Projectile)> + '_ {
        self.projectiles.iter().map(|(id, p)| (*id, p))
    }

    /// Projectiles in spawn order, mutably.
    pub fn projectiles_mut(&mut self) -> impl Iterator<Item = &mut Projectile> + '_ {
        self.projectiles.values_mut()
    }

    /// Number of projectiles in flight.
    #[must_use]
    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    // ===== Collectibles =====

    /// Adds a collectible and returns its id.
    pub fn spawn_collectible(&mut self, collectible: Collectible) -> EntityId {
        let id = self.allocate_id();
        self.collectibles.insert(id, collectible);
        id
    }

    /// Removes a collectible.
    pub fn despawn_collectible(&mut self, id: EntityId) -> Option<Collectible> {
        self.collectibles.remove(&id)
    }

    /// Looks up a collectible.
    #[must_use]
    pub fn collectible(&self, id: EntityId) -> Option<&Collectible> {
        self.collectibles.get(&id)
    }

    /// Snapshot of collectible ids in spawn order.
    #[must_use]
    pub fn collectible_ids(&self) -> Vec<EntityId> {
        self.collectibles.keys().copied().collect()
    }

    /// Collectibles in spawn order.
    pub fn collectibles(&self) -> impl Iterator<Item = (EntityId, &Collectible)> + '_ {
        self.collectibles.iter().map(|(id, c)| (*id, c))
    }

    /// Number of uncollected pickups.
    #[must_use]
    pub fn collectible_count(&self) -> usize {
        self.collectibles.len()
    }

    // ===== Lifecycle =====

    /// Removes every platform, enemy, projectile and collectible. The player
    /// and the score are untouched.
    pub fn clear_level(&mut self) {
        self.platforms.clear();
        self.enemies.clear();
        self.projectiles.clear();
        self.collectibles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entity::{CollectibleKind, Owner};
    use glam::Vec2;

    fn world() -> World {
        let config = GameConfig::default();
        let player = Player::new(&config.player, config.level.spawn_point, config.hitboxes.player);
        World::new(player, config.level.width, config.viewport.height)
    }

    fn shot() -> Projectile {
        Projectile::new(Rect::new(0.0, 0.0, 15.0, 5.0), Vec2::X, 40, Owner::Player)
    }

    mod id_tests {
        use super::*;

        #[test]
        fn ids_are_shared_and_monotonic() {
            let mut w = world();
            let p = w.spawn_projectile(shot());
            let c = w.spawn_collectible(Collectible::new(
                Rect::new(0.0, 0.0, 30.0, 30.0),
                CollectibleKind::Score,
                10,
            ));
            let q = w.spawn_projectile(shot());
            assert!(p < c && c < q);
        }

        #[test]
        fn ids_not_reused_after_despawn() {
            let mut w = world();
            let a = w.spawn_projectile(shot());
            w.despawn_projectile(a);
            let b = w.spawn_projectile(shot());
            assert_ne!(a, b);
        }

        #[test]
        fn snapshot_iteration_in_spawn_order() {
            let mut w = world();
            let ids: Vec<_> = (0..5).map(|_| w.spawn_projectile(shot())).collect();
            assert_eq!(w.projectile_ids(), ids);
            let iterated: Vec<_> = w.projectiles().map(|(id, _)| id).collect();
            assert_eq!(iterated, ids);
        }
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn clear_level_keeps_player_and_score() {
            let mut w = world();
            w.add_platform(Platform::new(Rect::new(0.0, 460.0, 3000.0, 40.0)));
            w.spawn_projectile(shot());
            w.add_score(150);
            w.player.take_damage(10);

            w.clear_level();

            assert!(w.platforms().is_empty());
            assert_eq!(w.projectile_count(), 0);
            assert_eq!(w.score(), 150);
            assert_eq!(w.player.health(), 90);
        }

        #[test]
        fn score_saturates() {
            let mut w = world();
            w.add_score(u32::MAX);
            w.add_score(5);
            assert_eq!(w.score(), u32::MAX);
        }

        #[test]
        fn bounds_span_level() {
            let w = world();
            assert_eq!(*w.bounds(), Rect::new(0.0, 0.0, 3000.0, 500.0));
        }
    }
}
