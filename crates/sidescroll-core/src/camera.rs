//! Horizontal camera mapping level space to screen space.
//!
//! The camera is a single horizontal offset. It is recomputed once per tick
//! from the player's hitbox and always clamped to
//! `[0, level_width - viewport_width]`, so the viewport never shows anything
//! outside the level. There is no vertical scrolling.
//!
//! # Example
//!
//! ```
//! use sidescroll_core::camera::{Camera, CameraPolicy};
//! use sidescroll_core::geometry::Rect;
//!
//! let mut camera = Camera::new(CameraPolicy::Centered, 900.0, 3000.0);
//! camera.update(&Rect::new(1480.0, 400.0, 40.0, 60.0));
//! assert_eq!(camera.offset(), 1050.0);
//!
//! let on_screen = camera.apply(&Rect::new(1480.0, 400.0, 40.0, 60.0));
//! assert_eq!(on_screen.x, 430.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// How the camera follows the player. Chosen once per game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CameraPolicy {
    /// Keep the player's centre in the middle of the viewport.
    Centered,
    /// Ease toward a point `anchor × viewport_width` left of the player's
    /// centre, covering `lag` of the remaining distance each tick.
    Smoothed {
        /// Fraction of the distance covered per tick, in `(0, 1]`.
        lag: f32,
        /// Horizontal screen position of the player, as a viewport fraction.
        anchor: f32,
    },
}

impl Default for CameraPolicy {
    fn default() -> Self {
        Self::Smoothed {
            lag: 0.1,
            anchor: 1.0 / 3.0,
        }
    }
}

/// Horizontal camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    offset: f32,
    policy: CameraPolicy,
    viewport_width: f32,
    level_width: f32,
}

impl Camera {
    /// Creates a camera at offset 0.
    #[must_use]
    pub const fn new(policy: CameraPolicy, viewport_width: f32, level_width: f32) -> Self {
        Self {
            offset: 0.0,
            policy,
            viewport_width,
            level_width,
        }
    }

    /// Current offset: the level x shown at the left edge of the screen.
    #[must_use]
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    /// Follow policy.
    #[must_use]
    pub const fn policy(&self) -> CameraPolicy {
        self.policy
    }

    /// Largest offset the camera may take. Zero when the level fits on screen.
    #[must_use]
    pub fn max_offset(&self) -> f32 {
        (self.level_width - self.viewport_width).max(0.0)
    }

    /// Recomputes the offset from the player's hitbox.
    pub fn update(&mut self, target: &Rect) {
        let center = target.center().x;
        let next = match self.policy {
            CameraPolicy::Centered => center - self.viewport_width * 0.5,
            CameraPolicy::Smoothed { lag, anchor } => {
                let goal = center - anchor * self.viewport_width;
                self.offset + (goal - self.offset) * lag
            }
        };
        self.offset = next.clamp(0.0, self.max_offset());
    }

    /// Snaps back to the start of the level.
    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    /// Translates a level-space rectangle into screen space.
    #[must_use]
    pub fn apply(&self, rect: &Rect) -> Rect {
        Rect::new(rect.x - self.offset, rect.y, rect.w, rect.h)
    }
}
