//! Headless run loop.

use std::io::Write;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use sidescroll_core::clock::FixedClock;
use sidescroll_core::{Buttons, Game, GameEvent, GameState, InputFrame, Outcome};
use tracing::{debug, info};

use crate::driver::Driver;

/// How a run is paced and what it emits.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Hard cap on ticks.
    pub max_ticks: u64,
    /// Emit a render frame every this many ticks. Zero disables frames.
    pub frames_every: u64,
    /// Pace ticks against the wall clock instead of running flat out.
    pub realtime: bool,
}

/// Final tally of one run, printed as a JSON line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Seed the game was created with.
    pub seed: u64,
    /// Ticks stepped.
    pub ticks: u64,
    /// How the game ended, if it did.
    pub outcome: Option<Outcome>,
    /// Level loaded at the end.
    pub level: u32,
    /// Final score.
    pub score: u32,
    /// Lives left.
    pub lives: u32,
    /// Enemies killed.
    pub kills: u32,
    /// Collectibles picked up.
    pub pickups: u32,
    /// Lives lost.
    pub deaths: u32,
}

impl RunSummary {
    fn tally(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::EnemyKilled { .. } => self.kills += 1,
                GameEvent::CollectiblePicked { .. } => self.pickups += 1,
                GameEvent::LifeLost { .. } | GameEvent::LivesExhausted => self.deaths += 1,
                _ => {}
            }
        }
    }
}

/// Drives `game` with `driver` until the driver stops, the game quits or the
/// tick cap is reached. Render frames go to `out` as JSON lines.
///
/// # Errors
///
/// Fails if a frame cannot be written.
pub fn run<D: Driver, W: Write>(
    game: &mut Game,
    driver: &mut D,
    options: RunOptions,
    out: &mut W,
) -> Result<RunSummary> {
    let mut summary = RunSummary {
        seed: game.seed(),
        ..RunSummary::default()
    };
    let mut previous = Buttons::empty();
    let mut clock = FixedClock::default();
    let mut last = Instant::now();

    'run: while summary.ticks < options.max_ticks && !game.is_quit() {
        let due = if options.realtime {
            let now = Instant::now();
            let due = clock.advance(now - last);
            last = now;
            if due == 0 {
                thread::sleep(clock.until_next());
                continue;
            }
            due
        } else {
            1
        };

        for _ in 0..due {
            let Some(keys) = driver.poll(game) else {
                debug!(tick = game.tick(), "driver finished");
                break 'run;
            };
            game.step(InputFrame::from_key_states(previous, keys));
            previous = keys;
            if game.is_quit() {
                break 'run;
            }
            summary.ticks += 1;
            summary.tally(&game.take_events());

            if options.frames_every > 0 && summary.ticks % options.frames_every == 0 {
                serde_json::to_writer(&mut *out, &game.render_frame())
                    .context("writing render frame")?;
                writeln!(out).context("writing render frame")?;
            }
            if summary.ticks >= options.max_ticks {
                break 'run;
            }
        }
    }

    if let GameState::GameOver(outcome) = game.state() {
        summary.outcome = Some(outcome);
    }
    summary.level = game.current_level();
    summary.score = game.score();
    summary.lives = game.world().player.lives();
    info!(
        seed = summary.seed,
        ticks = summary.ticks,
        score = summary.score,
        outcome = ?summary.outcome,
        "run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Autopilot, Script, Segment};
    use sidescroll_core::GameConfig;

    fn options(max_ticks: u64, frames_every: u64) -> RunOptions {
        RunOptions {
            max_ticks,
            frames_every,
            realtime: false,
        }
    }

    #[test]
    fn stops_at_tick_cap() {
        let mut game = Game::new(GameConfig::default(), 1).unwrap();
        let mut out = Vec::new();
        let summary = run(&mut game, &mut Autopilot::new(), options(120, 0), &mut out).unwrap();
        assert_eq!(summary.ticks, 120);
        assert_eq!(game.tick(), 120);
        assert!(out.is_empty());
    }

    #[test]
    fn emits_frames_as_json_lines() {
        let mut game = Game::new(GameConfig::default(), 1).unwrap();
        let mut script = Script::new(vec![Segment {
            ticks: 30,
            keys: Buttons::RIGHT,
        }]);
        let mut out = Vec::new();

        let summary = run(&mut game, &mut script, options(1000, 10), &mut out).unwrap();

        assert_eq!(summary.ticks, 30);
        let text = String::from_utf8(out).unwrap();
        let ticks: Vec<u64> = text
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
            .map(|frame| frame["tick"].as_u64().unwrap())
            .collect();
        assert_eq!(ticks, vec![10, 20, 30]);
    }

    #[test]
    fn quit_ends_the_run() {
        let mut game = Game::new(GameConfig::default(), 1).unwrap();
        let mut script = Script::new(vec![
            Segment {
                ticks: 5,
                keys: Buttons::empty(),
            },
            Segment {
                ticks: 5,
                keys: Buttons::QUIT,
            },
        ]);
        let summary = run(&mut game, &mut script, options(1000, 0), &mut Vec::new()).unwrap();
        assert!(game.is_quit());
        assert_eq!(summary.ticks, 5);
        assert_eq!(game.tick(), 5);
    }
}
