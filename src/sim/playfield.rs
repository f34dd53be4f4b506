//! Playfield geometry
//!
//! The playfield is the logical drawing rectangle. Every size in the game
//! (paddles, ball, fonts) is a ratio of its current dimensions, so nothing
//! is cached: a resize between two ticks just changes what these return.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Side;
use crate::consts::*;

/// Logical playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    /// Negative or non-finite dimensions are treated as zero
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Vertical extent of a paddle
    #[inline]
    pub fn paddle_length(&self) -> f32 {
        self.width * PADDLE_LENGTH_RATIO
    }

    /// Horizontal extent of a paddle
    #[inline]
    pub fn paddle_thickness(&self) -> f32 {
        self.paddle_length() / PADDLE_ASPECT
    }

    /// Gap between a paddle and its edge of the playfield
    #[inline]
    pub fn paddle_offset(&self) -> f32 {
        self.width * PADDLE_OFFSET_RATIO
    }

    #[inline]
    pub fn ball_radius(&self) -> f32 {
        BALL_RADIUS_RATIO * self.width.min(self.height)
    }

    #[inline]
    pub fn font_size(&self) -> f32 {
        FONT_SIZE_RATIO * self.width.min(self.height)
    }

    #[inline]
    pub fn divider_width(&self) -> f32 {
        DIVIDER_RATIO * self.width.max(self.height)
    }

    /// Left edge of the paddle for `side`
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_offset(),
            Side::Right => self.width - self.paddle_offset() - self.paddle_thickness(),
        }
    }

    /// Highest allowed paddle y (paddle top edge); zero when the paddle
    /// is longer than the playfield is tall
    #[inline]
    pub fn max_paddle_y(&self) -> f32 {
        (self.height - self.paddle_length()).max(0.0)
    }

    /// Clamp a paddle's top edge into `[0, max_paddle_y]`
    #[inline]
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.max_paddle_y())
    }

    /// Paddle top-left corner for a vertically centered paddle
    pub fn paddle_home(&self, side: Side) -> Vec2 {
        let y = self.clamp_paddle_y((self.height - self.paddle_length()) / 2.0);
        Vec2::new(self.paddle_x(side), y)
    }

    /// True if `point` lies strictly inside the paddle rectangle whose
    /// top-left corner is `paddle`
    pub fn paddle_contains(&self, paddle: Vec2, point: Vec2) -> bool {
        point.x > paddle.x
            && point.x < paddle.x + self.paddle_thickness()
            && point.y > paddle.y
            && point.y < paddle.y + self.paddle_length()
    }
}
