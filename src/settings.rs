//! Game settings and tuning
//!
//! Loaded from a JSON file on native builds and from LocalStorage in the
//! browser. Missing fields fall back to `consts`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PongError, Result};
use crate::renderer::Theme;
use crate::sim::{ControlScheme, KeyMap, Rules};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Match ===
    /// Points needed to win
    pub score_limit: u32,

    // === Timing ===
    /// Simulation tick length (ms)
    pub tick_ms: u32,
    /// Pause before each serve (ms)
    pub serve_delay_ms: u32,

    // === Paddles ===
    /// Paddle travel per tick (pixels)
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_init_speed: f32,
    pub ball_max_speed: f32,
    /// Speed gained per paddle hit
    pub ball_speed_step: f32,
    /// Serve direction toward the right player
    pub serve_direction: (f32, f32),

    // === Controls ===
    pub left_controls: ControlScheme,
    pub right_controls: ControlScheme,

    // === Look ===
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            score_limit: SCORE_LIMIT,

            tick_ms: TICK_MS,
            serve_delay_ms: SERVE_DELAY_MS,

            paddle_speed: PADDLE_SPEED,

            ball_init_speed: BALL_INIT_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            ball_speed_step: BALL_SPEED_STEP,
            serve_direction: SERVE_DIRECTION,

            left_controls: ControlScheme::wasd(),
            right_controls: ControlScheme::arrows(),

            theme: Theme::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |why: &str| Err(PongError::InvalidSettings(why.to_string()));

        if self.score_limit == 0 {
            return invalid("score_limit must be at least 1");
        }
        if self.tick_ms == 0 {
            return invalid("tick_ms must be at least 1");
        }
        if !(self.paddle_speed.is_finite() && self.paddle_speed >= 0.0) {
            return invalid("paddle_speed must be a non-negative number");
        }
        if !(self.ball_init_speed.is_finite() && self.ball_init_speed > 0.0) {
            return invalid("ball_init_speed must be positive");
        }
        if !(self.ball_max_speed.is_finite() && self.ball_max_speed >= self.ball_init_speed) {
            return invalid("ball_max_speed must be at least ball_init_speed");
        }
        if !(self.ball_speed_step.is_finite() && self.ball_speed_step >= 0.0) {
            return invalid("ball_speed_step must be a non-negative number");
        }
        let (dx, dy) = self.serve_direction;
        if !(dx.is_finite() && dy.is_finite()) || dx == 0.0 {
            return invalid("serve_direction needs a non-zero horizontal component");
        }
        Ok(())
    }

    /// Simulation rules derived from these settings
    pub fn rules(&self) -> Rules {
        Rules {
            score_limit: self.score_limit,
            paddle_speed: self.paddle_speed,
            ball_init_speed: self.ball_init_speed,
            ball_max_speed: self.ball_max_speed,
            ball_speed_step: self.ball_speed_step,
            serve_delay_ticks: crate::ms_to_ticks(self.serve_delay_ms, self.tick_ms),
            serve_direction: Vec2::new(self.serve_direction.0, self.serve_direction.1),
        }
    }

    pub fn keymap(&self) -> KeyMap {
        KeyMap {
            left: self.left_controls.clone(),
            right: self.right_controls.clone(),
        }
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "duel_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let stored = storage
            .as_ref()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok())
            .flatten();

        let Some(json) = stored else {
            // Seed storage with the defaults as an editable template
            log::info!("Using default settings");
            let settings = Self::default();
            settings.save();
            return settings;
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            // The stored copy is left alone so it can be fixed by hand
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        let json = match self.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
                return;
            }
        };
        match storage.set_item(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {:?}", e),
        }
    }
}
