//! Physics resolver for gravity, platform collision and projectile motion.
//!
//! The `PhysicsResolver` handles:
//! - Gravity: `vel_y += gravity`, clamped to terminal velocity
//! - Axis-separated movement: horizontal move and resolve, then vertical
//!   move and resolve, against the static platforms
//! - Ground bookkeeping: on-ground flag and coyote timer
//! - Projectile integration and pruning at the level bounds
//!
//! # Fixed Timestep
//!
//! Velocities are expressed in pixels per tick, so integration is a plain
//! `position += velocity`. The host decides how ticks map to wall-clock time
//! (see [`clock`](crate::clock)).
//!
//! # Collision Model
//!
//! Overlap is strict rectangle intersection, so an entity whose bottom edge
//! equals a platform's top edge rests on it without being pushed. Each pass
//! uses the travel direction from before the pass began, so every
//! overlapping obstacle is resolved even after the velocity has been zeroed.
//! Movement is not swept: a body moving more than a platform's thickness in
//! one tick can pass through it, which is why terminal velocity must stay
//! below the thinnest platform.

use glam::Vec2;
use tracing::trace;

use crate::config::{GameConfig, PhysicsConfig};
use crate::entity::{EntityId, Platform, Player};
use crate::geometry::Rect;
use crate::world::World;

/// Resolver for gravity, movement and platform collision.
///
/// # Processing Order
///
/// For the player, each update:
/// 1. Count down the invincibility and coyote timers
/// 2. Apply gravity (clamped)
/// 3. Move horizontally, resolve, clamp to the level
/// 4. Move vertically, resolve, record on-ground
///
/// # Example
///
/// ```
/// use sidescroll_core::config::GameConfig;
/// use sidescroll_core::resolver::PhysicsResolver;
/// use glam::Vec2;
///
/// let resolver = PhysicsResolver::from_config(&GameConfig::default());
/// let mut velocity = Vec2::new(0.0, 15.5);
/// resolver.apply_gravity(&mut velocity);
/// assert_eq!(velocity.y, 16.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PhysicsResolver {
    /// Downward acceleration per tick.
    gravity: f32,
    /// Maximum downward speed.
    terminal_velocity: f32,
    /// Horizontal extent the player is kept within.
    level_width: f32,
}

impl Default for PhysicsResolver {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl PhysicsResolver {
    /// Creates a physics resolver.
    #[must_use]
    pub const fn new(physics: &PhysicsConfig, level_width: f32) -> Self {
        Self {
            gravity: physics.gravity,
            terminal_velocity: physics.terminal_velocity,
            level_width,
        }
    }

    /// Creates a physics resolver from a full game configuration.
    #[must_use]
    pub const fn from_config(config: &GameConfig) -> Self {
        Self::new(&config.physics, config.level.width)
    }

    /// Downward acceleration per tick.
    #[must_use]
    pub const fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Maximum downward speed.
    #[must_use]
    pub const fn terminal_velocity(&self) -> f32 {
        self.terminal_velocity
    }

    /// Adds one tick of gravity, clamped to terminal velocity.
    pub fn apply_gravity(&self, velocity: &mut Vec2) {
        velocity.y = (velocity.y + self.gravity).min(self.terminal_velocity);
    }

    /// Runs one physics update for the player against `platforms`.
    pub fn update_player(&self, player: &mut Player, platforms: &[Platform]) {
        player.begin_update();
        self.apply_gravity(&mut player.velocity);

        player.rect.x += player.velocity.x;
        resolve_horizontal(&mut player.rect, &mut player.velocity, platforms);
        let max_x = (self.level_width - player.rect.w).max(0.0);
        player.rect.x = player.rect.x.clamp(0.0, max_x);

        player.rect.y += player.velocity.y;
        let grounded = resolve_vertical(&mut player.rect, &mut player.velocity, platforms);
        player.set_grounded(grounded);
    }

    /// Moves every projectile and removes those that left the level.
    ///
    /// Returns the ids of the removed projectiles.
    pub fn update_projectiles(&self, world: &mut World) -> Vec<EntityId> {
        for projectile in world.projectiles_mut() {
            projectile.update();
        }

        let bounds = *world.bounds();
        let expired: Vec<EntityId> = world
            .projectiles()
            .filter(|(_, p)| p.is_outside(&bounds))
            .map(|(id, _)| id)
            .collect();

        for id in &expired {
            world.despawn_projectile(*id);
        }
        if !expired.is_empty() {
            trace!(count = expired.len(), "projectiles left the level");
        }
        expired
    }
}

/// Pushes `rect` out of every obstacle it overlaps along x.
///
/// Moving right snaps the right edge to the obstacle's left edge; moving
/// left snaps the left edge to the obstacle's right edge. Either way the
/// horizontal velocity is zeroed. A body that is not moving horizontally is
/// left alone.
pub fn resolve_horizontal(rect: &mut Rect, velocity: &mut Vec2, obstacles: &[Platform]) {
    let moving = velocity.x;
    if moving == 0.0 {
        return;
    }
    for obstacle in obstacles {
        if !rect.intersects(&obstacle.rect) {
            continue;
        }
        if moving > 0.0 {
            rect.set_right(obstacle.rect.left());
        } else {
            rect.set_left(obstacle.rect.right());
        }
        velocity.x = 0.0;
    }
}

/// Pushes `rect` out of every obstacle it overlaps along y.
///
/// Moving down lands on the obstacle's top edge; moving up bonks against its
/// bottom edge. Either way the vertical velocity is zeroed. Returns `true` if
/// the body landed.
pub fn resolve_vertical(rect: &mut Rect, velocity: &mut Vec2, obstacles: &[Platform]) -> bool {
    let moving = velocity.y;
    let mut landed = false;
    if moving == 0.0 {
        return landed;
    }
    for obstacle in obstacles {
        if !rect.intersects(&obstacle.rect) {
            continue;
        }
        if moving > 0.0 {
            rect.set_bottom(obstacle.rect.top());
            landed = true;
        } else {
            rect.set_top(obstacle.rect.bottom());
        }
        velocity.y = 0.0;
    }
    landed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Owner, Projectile};

    fn player_at(x: f32, y: f32) -> Player {
        let config = GameConfig::default();
        Player::new(&config.player, Vec2::new(x, y), config.hitboxes.player)
    }

    fn ground() -> Vec<Platform> {
        vec![Platform::new(Rect::new(0.0, 460.0, 3000.0, 40.0))]
    }

    mod gravity_tests {
        use super::*;

        #[test]
        fn accumulates_each_tick() {
            let resolver = PhysicsResolver::default();
            let mut v = Vec2::ZERO;
            resolver.apply_gravity(&mut v);
            resolver.apply_gravity(&mut v);
            assert!((v.y - 1.6).abs() < 1e-6);
        }

        #[test]
        fn clamps_to_terminal_velocity() {
            let resolver = PhysicsResolver::default();
            let mut v = Vec2::new(0.0, 100.0);
            resolver.apply_gravity(&mut v);
            assert_eq!(v.y, resolver.terminal_velocity());
        }

        #[test]
        fn does_not_touch_horizontal_velocity() {
            let resolver = PhysicsResolver::default();
            let mut v = Vec2::new(5.0, 0.0);
            resolver.apply_gravity(&mut v);
            assert_eq!(v.x, 5.0);
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn walking_right_into_wall_stops_at_its_left_edge() {
            let wall = vec![Platform::new(Rect::new(200.0, 0.0, 20.0, 500.0))];
            let mut rect = Rect::new(163.0, 100.0, 40.0, 60.0);
            let mut v = Vec2::new(5.0, 0.0);
            resolve_horizontal(&mut rect, &mut v, &wall);
            assert_eq!(rect.right(), 200.0);
            assert_eq!(v.x, 0.0);
        }

        #[test]
        fn walking_left_into_wall_stops_at_its_right_edge() {
            let wall = vec![Platform::new(Rect::new(200.0, 0.0, 20.0, 500.0))];
            let mut rect = Rect::new(217.0, 100.0, 40.0, 60.0);
            let mut v = Vec2::new(-5.0, 0.0);
            resolve_horizontal(&mut rect, &mut v, &wall);
            assert_eq!(rect.left(), 220.0);
            assert_eq!(v.x, 0.0);
        }

        #[test]
        fn falling_lands_on_top() {
            let mut rect = Rect::new(100.0, 405.0, 40.0, 60.0);
            let mut v = Vec2::new(0.0, 5.0);
            assert!(resolve_vertical(&mut rect, &mut v, &ground()));
            assert_eq!(rect.bottom(), 460.0);
            assert_eq!(v.y, 0.0);
        }

        #[test]
        fn rising_bonks_on_underside() {
            let ceiling = vec![Platform::new(Rect::new(0.0, 100.0, 500.0, 20.0))];
            let mut rect = Rect::new(100.0, 115.0, 40.0, 60.0);
            let mut v = Vec2::new(0.0, -10.0);
            assert!(!resolve_vertical(&mut rect, &mut v, &ceiling));
            assert_eq!(rect.top(), 120.0);
            assert_eq!(v.y, 0.0);
        }

        #[test]
        fn second_overlap_resolved_after_velocity_zeroed() {
            let steps = vec![
                Platform::new(Rect::new(0.0, 452.0, 120.0, 20.0)),
                Platform::new(Rect::new(120.0, 450.0, 120.0, 20.0)),
            ];
            let mut rect = Rect::new(100.0, 395.0, 40.0, 60.0);
            let mut v = Vec2::new(0.0, 6.0);
            assert!(resolve_vertical(&mut rect, &mut v, &steps));
            assert_eq!(rect.bottom(), 450.0);
            assert!(steps.iter().all(|p| !rect.intersects(&p.rect)));
        }

        #[test]
        fn touching_is_not_overlapping() {
            let mut rect = Rect::new(100.0, 400.0, 40.0, 60.0);
            let mut v = Vec2::new(0.0, 0.0);
            assert!(!resolve_vertical(&mut rect, &mut v, &ground()));
            assert_eq!(rect.bottom(), 460.0);
        }
    }

    mod player_update_tests {
        use super::*;

        #[test]
        fn resting_player_stays_grounded() {
            let resolver = PhysicsResolver::default();
            let mut p = player_at(100.0, 400.0);
            for _ in 0..10 {
                resolver.update_player(&mut p, &ground());
                assert!(p.on_ground());
                assert_eq!(p.rect.bottom(), 460.0);
                assert_eq!(p.velocity.y, 0.0);
            }
        }

        #[test]
        fn clamped_to_level_left_edge() {
            let resolver = PhysicsResolver::default();
            let mut p = player_at(2.0, 400.0);
            p.walk(-1);
            resolver.update_player(&mut p, &ground());
            assert_eq!(p.rect.left(), 0.0);
        }

        #[test]
        fn clamped_to_level_right_edge() {
            let resolver = PhysicsResolver::default();
            let mut p = player_at(2958.0, 400.0);
            p.walk(1);
            resolver.update_player(&mut p, &ground());
            assert_eq!(p.rect.right(), 3000.0);
        }

        #[test]
        fn coyote_grace_is_exactly_configured_width() {
            let resolver = PhysicsResolver::default();
            let frames = GameConfig::default().player.coyote_frames;

            for airborne_ticks in [frames, frames + 1] {
                let mut p = player_at(100.0, 400.0);
                resolver.update_player(&mut p, &ground());
                assert!(p.on_ground());
                for _ in 0..airborne_ticks {
                    resolver.update_player(&mut p, &[]);
                }
                assert!(!p.on_ground());
                assert_eq!(p.jump(), airborne_ticks == frames);
            }
        }

        #[test]
        fn zero_coyote_frames_disables_grace() {
            let mut config = GameConfig::default();
            config.player.coyote_frames = 0;
            let resolver = PhysicsResolver::from_config(&config);
            let mut p =
                Player::new(&config.player, Vec2::new(100.0, 400.0), config.hitboxes.player);
            resolver.update_player(&mut p, &ground());
            resolver.update_player(&mut p, &[]);
            assert!(!p.jump());
        }
    }

    mod projectile_tests {
        use super::*;

        #[test]
        fn removes_only_projectiles_outside_level() {
            let config = GameConfig::default();
            let mut world = World::new(
                player_at(100.0, 400.0),
                config.level.width,
                config.viewport.height,
            );
            let inside = world.spawn_projectile(Projectile::new(
                Rect::new(100.0, 100.0, 15.0, 5.0),
                Vec2::new(10.0, 0.0),
                40,
                Owner::Player,
            ));
            let leaving = world.spawn_projectile(Projectile::new(
                Rect::new(2995.0, 100.0, 15.0, 5.0),
                Vec2::new(10.0, 0.0),
                40,
                Owner::Player,
            ));

            let removed = PhysicsResolver::from_config(&config).update_projectiles(&mut world);

            assert_eq!(removed, vec![leaving]);
            assert_eq!(world.projectile(inside).unwrap().rect.x, 110.0);
        }
    }
}
