//! Input sources for headless runs.
//!
//! A driver reports the key states it is holding each tick, the way a real
//! keyboard poll would. The runner turns successive polls into
//! [`InputFrame`](sidescroll_core::InputFrame)s with edge detection.

use serde::{Deserialize, Serialize};
use sidescroll_core::entity::Owner;
use sidescroll_core::{Buttons, Game};

/// Source of key states for one game.
pub trait Driver {
    /// Key states for the next tick, or `None` to end the run.
    fn poll(&mut self, game: &Game) -> Option<Buttons>;
}

// =============================================================================
// Script
// =============================================================================

/// Keys held for a number of ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Ticks this segment lasts.
    pub ticks: u32,
    /// Keys held, e.g. `"RIGHT | JUMP"`.
    #[serde(default)]
    pub keys: Buttons,
}

/// Replays a fixed list of segments, then ends the run.
#[derive(Debug, Clone, Default)]
pub struct Script {
    segments: Vec<Segment>,
    index: usize,
    elapsed: u32,
}

impl Script {
    /// Creates a script from its segments.
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            index: 0,
            elapsed: 0,
        }
    }

    /// Parses a JSON array of segments.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if `json` is not a segment list.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    /// Total ticks the script covers.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.ticks)).sum()
    }
}

impl Driver for Script {
    fn poll(&mut self, _game: &Game) -> Option<Buttons> {
        loop {
            let segment = self.segments.get(self.index)?;
            if self.elapsed < segment.ticks {
                self.elapsed += 1;
                return Some(segment.keys);
            }
            self.index += 1;
            self.elapsed = 0;
        }
    }
}

// =============================================================================
// Autopilot
// =============================================================================

/// Distance ahead at which the autopilot opens fire.
const FIRE_RANGE: f32 = 350.0;

/// Distance ahead at which the autopilot jumps over an obstacle.
const JUMP_RANGE: f32 = 60.0;

/// Runs right, shooting enemies ahead and hopping over anything in the way.
/// Ends the run at game over.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot {
    tick: u64,
}

impl Autopilot {
    /// Creates an autopilot.
    #[must_use]
    pub const fn new() -> Self {
        Self { tick: 0 }
    }
}

impl Driver for Autopilot {
    fn poll(&mut self, game: &Game) -> Option<Buttons> {
        if game.is_over() {
            return None;
        }
        self.tick += 1;

        let world = game.world();
        let player = &world.player;
        let front = player.rect.right();
        let mut keys = Buttons::RIGHT;

        let target_ahead = world.enemies().any(|(_, e)| {
            let gap = e.rect.left() - front;
            gap > 0.0 && gap < FIRE_RANGE && e.rect.top() < player.rect.bottom()
        });
        // Alternate so every other tick is a fresh press.
        if target_ahead && self.tick % 2 == 0 {
            keys |= Buttons::SHOOT;
        }

        let blocked = world.enemies().any(|(_, e)| {
            let gap = e.rect.left() - front;
            gap > -player.rect.w && gap < JUMP_RANGE
        }) || world.projectiles().any(|(_, p)| {
            p.owner == Owner::Enemy && (p.rect.center().x - front).abs() < JUMP_RANGE * 2.0
        });
        if blocked && player.on_ground() && self.tick % 2 == 1 {
            keys |= Buttons::JUMP;
        }

        Some(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidescroll_core::GameConfig;

    fn game() -> Game {
        Game::new(GameConfig::default(), 3).unwrap()
    }

    mod script_tests {
        use super::*;

        #[test]
        fn replays_segments_in_order() {
            let g = game();
            let mut script = Script::new(vec![
                Segment {
                    ticks: 2,
                    keys: Buttons::RIGHT,
                },
                Segment {
                    ticks: 0,
                    keys: Buttons::SHOOT,
                },
                Segment {
                    ticks: 1,
                    keys: Buttons::JUMP,
                },
            ]);
            assert_eq!(script.total_ticks(), 3);
            assert_eq!(script.poll(&g), Some(Buttons::RIGHT));
            assert_eq!(script.poll(&g), Some(Buttons::RIGHT));
            assert_eq!(script.poll(&g), Some(Buttons::JUMP));
            assert_eq!(script.poll(&g), None);
        }

        #[test]
        fn parses_key_names() {
            let script =
                Script::from_json(r#"[{"ticks": 30, "keys": "RIGHT | JUMP"}, {"ticks": 5}]"#)
                    .unwrap();
            assert_eq!(script.total_ticks(), 35);
            assert_eq!(script.segments[0].keys, Buttons::RIGHT | Buttons::JUMP);
            assert_eq!(script.segments[1].keys, Buttons::empty());
        }
    }

    mod autopilot_tests {
        use super::*;

        #[test]
        fn always_runs_right() {
            let g = game();
            let mut pilot = Autopilot::new();
            for _ in 0..10 {
                let keys = pilot.poll(&g).unwrap();
                assert!(keys.contains(Buttons::RIGHT));
            }
        }

        #[test]
        fn stops_at_game_over() {
            let mut g = game();
            let mut pilot = Autopilot::new();
            for _ in 0..3 {
                g.world_mut().player.take_damage(1000);
                for _ in 0..61 {
                    g.step(sidescroll_core::InputFrame::idle());
                }
            }
            assert!(g.is_over());
            assert_eq!(pilot.poll(&g), None);
        }
    }
}
