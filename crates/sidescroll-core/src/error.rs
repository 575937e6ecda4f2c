//! Error types for the platformer core.
//!
//! The simulation itself has no failure surface once running: damage,
//! scoring and direction math all saturate or fall back to defaults. Errors
//! only arise at the edges, when a configuration or a level table is
//! rejected, or when a level that does not exist is requested.

/// Errors reported by configuration, level loading and game construction.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The requested level number has no spawn table.
    #[error("level {level} is not defined (available: {available:?})")]
    InvalidLevel {
        /// The level number that was requested.
        level: u32,
        /// The level numbers the table does define.
        available: Vec<u32>,
    },
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The level table defines no levels at all.
    #[error("level table is empty")]
    EmptyLevelTable,
    /// Level numbers must run 1, 2, 3, ... without gaps.
    #[error("level numbers must be contiguous from 1: expected {expected}, found {found}")]
    NonContiguousLevels {
        /// The level number that should have come next.
        expected: u32,
        /// The level number actually present.
        found: u32,
    },
    /// A level has no platforms to stand on.
    #[error("level {0} has no platforms")]
    EmptyLevel(u32),
    /// A JSON document could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
