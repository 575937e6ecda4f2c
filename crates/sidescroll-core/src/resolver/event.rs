//! Event log for render, audio and telemetry collaborators.
//!
//! The `EventLog` captures what happened during a tick: shots, hits, kills,
//! pickups and state transitions. It never feeds back into the simulation;
//! it only records.
//!
//! # Usage
//!
//! The game owns one log and appends to it while resolving. Collaborators
//! drain it with [`Game::take_events`](crate::game::Game::take_events)
//! after each step; the game clears it at the start of the next one.

use serde::{Deserialize, Serialize};

use crate::entity::{CollectibleKind, EntityId, Owner};
use crate::game::Outcome;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player left the ground by jumping.
    PlayerJumped,
    /// A projectile entered the world.
    ProjectileFired {
        /// Id of the new projectile.
        id: EntityId,
        /// Side that fired it.
        owner: Owner,
    },
    /// The player took damage and survived.
    PlayerHurt {
        /// Damage applied.
        damage: u32,
        /// Health afterwards.
        health: u32,
    },
    /// Health reached zero and a life was consumed.
    LifeLost {
        /// Lives left afterwards.
        lives: u32,
    },
    /// The last life was consumed.
    LivesExhausted,
    /// An enemy took damage and survived.
    EnemyHit {
        /// Id of the enemy.
        id: EntityId,
        /// Damage applied.
        damage: u32,
        /// Health afterwards.
        health: u32,
    },
    /// An enemy was removed at zero health.
    EnemyKilled {
        /// Id of the enemy.
        id: EntityId,
        /// Whether it was the boss.
        boss: bool,
        /// Points awarded.
        score: u32,
    },
    /// The player picked up a collectible.
    CollectiblePicked {
        /// Id of the collectible.
        id: EntityId,
        /// Its kind.
        kind: CollectibleKind,
        /// Its value.
        value: u32,
    },
    /// A level was populated.
    LevelLoaded {
        /// Level number.
        level: u32,
    },
    /// The player reached the end of a level.
    LevelCompleted {
        /// Level number.
        level: u32,
    },
    /// The game ended.
    GameOver {
        /// Win or loss.
        outcome: Outcome,
        /// Final score.
        score: u32,
    },
    /// The game was reset to level 1.
    Restarted,
}

/// Append-only log of [`GameEvent`]s, drained by collaborators.
///
/// # Example
///
/// ```
/// use sidescroll_core::resolver::{EventLog, GameEvent};
///
/// let mut log = EventLog::new();
/// log.record(GameEvent::PlayerJumped);
/// assert_eq!(log.len(), 1);
///
/// let events = log.take_events();
/// assert_eq!(events, vec![GameEvent::PlayerJumped]);
/// assert!(log.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn record(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drains and returns all recorded events in the order they happened.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Returns the number of events currently in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the event log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clears all events from the log without returning them.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
