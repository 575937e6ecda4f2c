//! Per-tick player input.
//!
//! Input is a value handed to [`Game::step`](crate::game::Game::step), never
//! polled by the core. Movement is level-triggered (`held`); jump, shoot,
//! restart and quit are edge-triggered (`pressed`), so holding jump does not
//! bounce the player.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Set of buttons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Buttons: u8 {
        /// Walk left.
        const LEFT    = 1 << 0;
        /// Walk right.
        const RIGHT   = 1 << 1;
        /// Jump.
        const JUMP    = 1 << 2;
        /// Fire a projectile.
        const SHOOT   = 1 << 3;
        /// Start over after game over.
        const RESTART = 1 << 4;
        /// Leave the game.
        const QUIT    = 1 << 5;
    }
}

/// Input for one tick.
///
/// # Example
///
/// ```
/// use sidescroll_core::input::{Buttons, InputFrame};
///
/// // Jump held across two polls: only the first tick sees a press.
/// let held = Buttons::JUMP | Buttons::RIGHT;
/// let first = InputFrame::from_key_states(Buttons::empty(), held);
/// let second = InputFrame::from_key_states(held, held);
///
/// assert!(first.jump());
/// assert!(!second.jump());
/// assert_eq!(second.direction(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputFrame {
    /// Buttons currently down.
    pub held: Buttons,
    /// Buttons that went down since the previous tick.
    pub pressed: Buttons,
}

impl InputFrame {
    /// Creates a frame from explicit held and pressed sets.
    #[must_use]
    pub const fn new(held: Buttons, pressed: Buttons) -> Self {
        Self { held, pressed }
    }

    /// No buttons at all.
    #[must_use]
    pub const fn idle() -> Self {
        Self::new(Buttons::empty(), Buttons::empty())
    }

    /// Builds a frame from two successive key-state polls. A button counts as
    /// pressed when it is down now and was up before.
    #[must_use]
    pub fn from_key_states(previous: Buttons, current: Buttons) -> Self {
        Self::new(current, current.difference(previous))
    }

    /// Horizontal direction from the held buttons: -1, 0 or 1. Holding both
    /// left and right cancels out.
    #[must_use]
    pub fn direction(&self) -> i8 {
        i8::from(self.held.contains(Buttons::RIGHT)) - i8::from(self.held.contains(Buttons::LEFT))
    }

    /// Jump pressed this tick.
    #[must_use]
    pub fn jump(&self) -> bool {
        self.pressed.contains(Buttons::JUMP)
    }

    /// Shoot pressed this tick.
    #[must_use]
    pub fn shoot(&self) -> bool {
        self.pressed.contains(Buttons::SHOOT)
    }

    /// Restart pressed this tick.
    #[must_use]
    pub fn restart(&self) -> bool {
        self.pressed.contains(Buttons::RESTART)
    }

    /// Quit pressed this tick.
    #[must_use]
    pub fn quit(&self) -> bool {
        self.pressed.contains(Buttons::QUIT)
    }
}
