//! Game loop driver
//!
//! `GameSession` owns everything a running game needs: settings, the key
//! state, the current match and the fixed-step clock. Hosts feed it key
//! events, resizes and elapsed time, and draw the frames it returns. All
//! mutation happens through `&mut self`, so a host must drive it from a
//! single owner.

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS};
use crate::error::Result;
use crate::renderer::{Frame, render};
use crate::settings::Settings;
use crate::sim::{Controls, Match, MatchPhase, Playfield, Rules, new_match, tick};

/// One game session (one canvas, one pair of players)
#[derive(Debug, Clone)]
pub struct GameSession {
    settings: Settings,
    rules: Rules,
    controls: Controls,
    field: Playfield,
    state: Option<Match>,
    /// Milliseconds not yet consumed by a tick
    accumulator: f32,
    /// Scheduler switch: false once the match is finished or stopped
    running: bool,
}

impl GameSession {
    pub fn new(settings: Settings, width: f32, height: f32) -> Self {
        let rules = settings.rules();
        let controls = Controls::new(settings.keymap());
        Self {
            settings,
            rules,
            controls,
            field: Playfield::new(width, height),
            state: None,
            accumulator: 0.0,
            running: false,
        }
    }

    /// Start a new match, discarding any previous one
    pub fn start(&mut self, name_left: &str, name_right: &str) -> Result<()> {
        let state = new_match(name_left, name_right, &self.field, &self.rules)?;
        log::info!(
            "New match: {} vs {} (first to {})",
            state.left.name,
            state.right.name,
            state.score_limit
        );
        self.state = Some(state);
        self.controls.release_all();
        self.accumulator = 0.0;
        self.running = true;
        Ok(())
    }

    /// Drop the current match and stop ticking
    pub fn stop(&mut self) {
        if self.state.take().is_some() {
            log::info!("Match discarded");
        }
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = Playfield::new(width, height);
    }

    pub fn on_key_down(&mut self, key: &str) {
        self.controls.on_key_down(key);
    }

    pub fn on_key_up(&mut self, key: &str) {
        self.controls.on_key_up(key);
    }

    /// Forget held keys (window lost focus)
    pub fn release_keys(&mut self) {
        self.controls.release_all();
    }

    /// True while the tick scheduler should keep firing
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_match(&self) -> Option<&Match> {
        self.state.as_ref()
    }

    pub fn playfield(&self) -> Playfield {
        self.field
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Render the current state without advancing it
    pub fn frame(&self) -> Option<Frame> {
        self.state
            .as_ref()
            .map(|state| render(state, &self.field, &self.settings.theme))
    }

    /// Run one simulation tick and render the result. Returns `None` once
    /// the scheduler is stopped; the tick that finishes a match still
    /// returns its final frame.
    pub fn tick(&mut self) -> Option<Frame> {
        if !self.running {
            return None;
        }
        let state = self.state.as_mut()?;

        let report = tick(state, &self.controls.state, &self.field, &self.rules);

        if let Some(scorer) = report.events.scored {
            let (left, right) = state.scores();
            log::info!(
                "{} scores ({} - {})",
                state.player(scorer).name,
                left,
                right
            );
        }

        if let MatchPhase::Finished { winner } = report.phase {
            log::info!(
                "{} wins after {} ticks",
                state.player(winner).name,
                state.ticks
            );
            self.running = false;
            self.accumulator = 0.0;
        }

        self.frame()
    }

    /// Feed wall-clock time into the fixed-step clock. Runs at most
    /// `MAX_SUBSTEPS` ticks and returns the latest frame if any ran.
    pub fn advance_time(&mut self, elapsed_ms: f32) -> Option<Frame> {
        if !self.running || !elapsed_ms.is_finite() {
            return None;
        }
        let tick_ms = self.settings.tick_ms.max(1) as f32;
        self.accumulator += elapsed_ms.clamp(0.0, MAX_FRAME_MS);
        // Time beyond one frame's worth of substeps is dropped, not queued
        self.accumulator = self.accumulator.min(MAX_SUBSTEPS as f32 * tick_ms);

        let mut frame = None;
        let mut substeps = 0;
        while self.accumulator >= tick_ms && substeps < MAX_SUBSTEPS {
            self.accumulator -= tick_ms;
            substeps += 1;
            frame = self.tick();
            if !self.running {
                break;
            }
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PongError;
    use crate::sim::Side;
    use glam::Vec2;

    fn session() -> GameSession {
        GameSession::new(Settings::default(), 800.0, 500.0)
    }

    #[test]
    fn test_not_running_before_start() {
        let mut s = session();
        assert!(!s.is_running());
        assert!(s.tick().is_none());
        assert!(s.frame().is_none());
    }

    #[test]
    fn test_start_rejects_empty_name() {
        let mut s = session();
        let err = s.start("Jojo", "").unwrap_err();
        assert!(matches!(err, PongError::InvalidPlayerName { side: Side::Right }));
        assert!(s.current_match().is_none());
        assert!(!s.is_running());
    }

    #[test]
    fn test_start_releases_keys() {
        let mut s = session();
        s.on_key_down("w");
        s.start("Jojo", "Lili").unwrap();
        assert!(!s.controls().state.left_up);
        assert!(s.tick().is_some());
    }

    #[test]
    fn test_key_moves_paddle_through_session() {
        let mut s = session();
        s.start("Jojo", "Lili").unwrap();
        let start = s.current_match().unwrap().left.position.y;
        s.on_key_down("s");
        s.tick();
        s.on_key_up("s");
        s.tick();
        let y = s.current_match().unwrap().left.position.y;
        assert_eq!(y, start + s.settings().paddle_speed);
    }

    #[test]
    fn test_advance_time_uses_fixed_steps() {
        let mut s = session();
        s.start("Jojo", "Lili").unwrap();

        assert!(s.advance_time(5.0).is_none());
        assert!(s.advance_time(5.0).is_some());
        assert_eq!(s.current_match().unwrap().ticks, 1);

        // Large gaps are capped to MAX_SUBSTEPS ticks
        s.advance_time(10_000.0);
        assert_eq!(s.current_match().unwrap().ticks, 1 + MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_slow_frames_do_not_build_backlog() {
        let mut s = session();
        s.start("Jojo", "Lili").unwrap();
        for _ in 0..10 {
            s.advance_time(MAX_FRAME_MS);
        }
        assert_eq!(s.current_match().unwrap().ticks, 10 * MAX_SUBSTEPS as u64);
        assert!(s.accumulator < s.settings().tick_ms as f32);
    }

    #[test]
    fn test_finish_stops_scheduler() {
        let mut s = session();
        s.start("Jojo", "Lili").unwrap();
        {
            let m = s.state.as_mut().unwrap();
            m.phase = MatchPhase::Active;
            m.serve_timer = None;
            m.right.score = m.score_limit - 1;
            m.ball.position = glam::Vec2::new(7.0, 250.0);
            m.ball.direction = glam::Vec2::new(-0.5, 0.0);
            m.ball.speed = 8.0;
        }

        let frame = s.tick().expect("final frame");
        assert!(frame.texts().any(|t| t == "Lili wins!"));
        assert!(!s.is_running());
        assert!(s.tick().is_none());
        assert!(s.advance_time(50.0).is_none());
        // The finished match is still there to be drawn
        assert!(s.frame().is_some());
    }

    #[test]
    fn test_stop_discards_match() {
        let mut s = session();
        s.start("Jojo", "Lili").unwrap();
        s.stop();
        assert!(s.current_match().is_none());
        assert!(!s.is_running());
    }

    #[test]
    fn test_shrink_during_serve_delay_gives_no_point() {
        let mut s = session();
        s.start("Jojo", "Lili").unwrap();
        s.tick();
        s.resize(400.0, 250.0);

        while s.current_match().unwrap().round_pending() {
            s.tick();
        }
        assert_eq!(s.current_match().unwrap().ball.position, Vec2::new(200.0, 125.0));
        s.tick();
        assert_eq!(s.current_match().unwrap().scores(), (0, 0));
    }

    #[test]
    fn test_resize_between_ticks() {
        let mut s = session();
        s.start("Jojo", "Lili").unwrap();
        s.tick();
        s.resize(300.0, 120.0);
        s.tick();
        let m = s.current_match().unwrap();
        let field = s.playfield();
        assert_eq!(m.right.position.x, field.paddle_x(Side::Right));
        assert!(m.left.position.y <= field.max_paddle_y());
    }
}
