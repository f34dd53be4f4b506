//! Duel Pong - two-player local Pong on a 2D drawing surface
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, input, physics, round lifecycle)
//! - `renderer`: Draw-command renderer and drawing surfaces
//! - `session`: Fixed-tick game loop driver owning one match
//! - `settings`: Data-driven tuning and key bindings
//! - `platform`: Browser glue (wasm32 only)

pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{PongError, Result};
pub use glam::Vec2;
pub use session::GameSession;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick (100 Hz)
    pub const TICK_MS: u32 = 10;
    /// Pause between a point and the next serve
    pub const SERVE_DELAY_MS: u32 = 1000;
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap fed to the accumulator (ms)
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Points needed to win a match
    pub const SCORE_LIMIT: u32 = 5;

    /// Paddle vertical travel per tick (pixels)
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Paddle length as a fraction of playfield width
    pub const PADDLE_LENGTH_RATIO: f32 = 0.09;
    /// Paddle length divided by paddle thickness
    pub const PADDLE_ASPECT: f32 = 10.0;
    /// Distance of each paddle from its edge, as a fraction of width
    pub const PADDLE_OFFSET_RATIO: f32 = 0.05;

    /// Ball speed when served (pixels per tick along `direction`)
    pub const BALL_INIT_SPEED: f32 = 4.0;
    /// Ball speed cap
    pub const BALL_MAX_SPEED: f32 = 50.0;
    /// Speed gained on every paddle hit
    pub const BALL_SPEED_STEP: f32 = 1.0;
    /// Ball radius as a fraction of min(width, height)
    pub const BALL_RADIUS_RATIO: f32 = 0.01;
    /// Serve direction toward the right player; mirrored for the left
    pub const SERVE_DIRECTION: (f32, f32) = (0.45, 0.55);

    /// Score font size as a fraction of min(width, height)
    pub const FONT_SIZE_RATIO: f32 = 0.08;
    /// Score anchor ratio (x from the center line, y from the top)
    pub const SCORE_POS_RATIO: f32 = 0.9;
    /// Divider line thickness as a fraction of max(width, height)
    pub const DIVIDER_RATIO: f32 = 0.01;

    /// Canvas aspect ratio used by the page
    pub const GOLDEN_RATIO: f32 = 1.618033;
    /// Share of the window the canvas occupies
    pub const CANVAS_FILL: f32 = 0.8;
}

/// Number of whole ticks covering `ms` milliseconds (never zero)
#[inline]
pub fn ms_to_ticks(ms: u32, tick_ms: u32) -> u32 {
    let tick_ms = tick_ms.max(1);
    ms.div_ceil(tick_ms).max(1)
}
