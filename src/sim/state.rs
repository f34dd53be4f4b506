//! Match state and core simulation types
//!
//! A `Match` exclusively owns both players and the ball. A new game always
//! builds a fresh `Match`; a finished one is never resumed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::playfield::Playfield;
use crate::consts::*;
use crate::error::{PongError, Result};

/// Which half of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// +1 for right, -1 for left (x sign of travel toward this side)
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simulation tuning, resolved from `Settings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub score_limit: u32,
    pub paddle_speed: f32,
    pub ball_init_speed: f32,
    pub ball_max_speed: f32,
    pub ball_speed_step: f32,
    /// Serve delay expressed in ticks
    pub serve_delay_ticks: u32,
    /// Serve direction toward the right player
    pub serve_direction: Vec2,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            score_limit: SCORE_LIMIT,
            paddle_speed: PADDLE_SPEED,
            ball_init_speed: BALL_INIT_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            ball_speed_step: BALL_SPEED_STEP,
            serve_delay_ticks: crate::ms_to_ticks(SERVE_DELAY_MS, TICK_MS),
            serve_direction: Vec2::new(SERVE_DIRECTION.0, SERVE_DIRECTION.1),
        }
    }
}

/// One of the two competitors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
    /// Top-left corner of the paddle
    pub position: Vec2,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Vec2) -> Self {
        Self {
            name: name.into(),
            score: 0,
            position,
        }
    }
}

/// The ball. `direction` is deliberately not normalized: the serve
/// diagonal (0.45, 0.55) is used as-is and `speed` scales it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec2,
    pub direction: Vec2,
    pub speed: f32,
}

impl Ball {
    /// Ball at rest at `position`
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            direction: Vec2::ZERO,
            speed: 0.0,
        }
    }

    /// Displacement for one tick
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    /// Freeze the ball at `center`
    pub fn park(&mut self, center: Vec2) {
        self.position = center;
        self.direction = Vec2::ZERO;
        self.speed = 0.0;
    }

    /// Launch the ball toward `toward`
    pub fn serve(&mut self, toward: Side, rules: &Rules) {
        let dir = rules.serve_direction;
        self.direction = Vec2::new(dir.x.abs() * toward.sign(), dir.y);
        self.speed = rules.ball_init_speed.min(rules.ball_max_speed);
    }

    pub fn is_moving(&self) -> bool {
        self.speed > 0.0 && self.direction != Vec2::ZERO
    }
}

/// Pending serve, counted down once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServeTimer {
    pub remaining_ticks: u32,
    /// Side the ball will travel toward
    pub toward: Side,
}

/// Round/match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Ball in play
    Active,
    /// Point just scored (or match just created), ball parked at center
    RoundPending,
    /// One player reached the score limit
    Finished { winner: Side },
}

/// Complete match state (aggregate root)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub left: Player,
    pub right: Player,
    pub ball: Ball,
    pub score_limit: u32,
    pub phase: MatchPhase,
    pub serve_timer: Option<ServeTimer>,
    /// Side that won the most recent point
    pub last_point: Option<Side>,
    /// Simulation tick counter
    pub ticks: u64,
}

/// Create a match with both paddles centered on their edges and the ball
/// parked at the center, waiting for the first serve.
pub fn new_match(
    name_left: &str,
    name_right: &str,
    field: &Playfield,
    rules: &Rules,
) -> Result<Match> {
    if name_left.is_empty() {
        return Err(PongError::InvalidPlayerName { side: Side::Left });
    }
    if name_right.is_empty() {
        return Err(PongError::InvalidPlayerName { side: Side::Right });
    }

    Ok(Match {
        left: Player::new(name_left, field.paddle_home(Side::Left)),
        right: Player::new(name_right, field.paddle_home(Side::Right)),
        ball: Ball::new(field.center()),
        score_limit: rules.score_limit.max(1),
        phase: MatchPhase::RoundPending,
        serve_timer: Some(ServeTimer {
            remaining_ticks: rules.serve_delay_ticks,
            toward: Side::Right,
        }),
        last_point: None,
        ticks: 0,
    })
}

impl Match {
    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    #[inline]
    pub fn round_pending(&self) -> bool {
        self.phase == MatchPhase::RoundPending
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, MatchPhase::Finished { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Scores as (left, right)
    pub fn scores(&self) -> (u32, u32) {
        (self.left.score, self.right.score)
    }

    /// Park the ball and arm the serve timer toward `toward`
    pub fn begin_round(&mut self, field: &Playfield, rules: &Rules, toward: Side) {
        self.ball.park(field.center());
        self.serve_timer = Some(ServeTimer {
            remaining_ticks: rules.serve_delay_ticks,
            toward,
        });
        self.phase = MatchPhase::RoundPending;
    }

    /// Terminal transition; cancels any pending serve
    pub fn finish(&mut self, winner: Side) {
        self.serve_timer = None;
        self.phase = MatchPhase::Finished { winner };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Playfield {
        Playfield::new(800.0, 500.0)
    }

    #[test]
    fn test_new_match_layout() {
        let m = new_match("A", "B", &field(), &Rules::default()).unwrap();
        assert_eq!(m.left.name, "A");
        assert_eq!(m.right.name, "B");
        assert_eq!(m.scores(), (0, 0));
        assert_eq!(m.ball.position, Vec2::new(400.0, 250.0));
        assert_eq!(m.ball.speed, 0.0);
        assert_eq!(m.ball.direction, Vec2::ZERO);
        assert!(m.round_pending());
        assert_eq!(m.score_limit, SCORE_LIMIT);
        assert_eq!(m.left.position.y, m.right.position.y);
        assert!(m.left.position.x < m.right.position.x);
    }

    #[test]
    fn test_new_match_rejects_empty_names() {
        let err = new_match("", "B", &field(), &Rules::default()).unwrap_err();
        assert!(matches!(err, PongError::InvalidPlayerName { side: Side::Left }));

        let err = new_match("A", "", &field(), &Rules::default()).unwrap_err();
        assert!(matches!(err, PongError::InvalidPlayerName { side: Side::Right }));
    }

    #[test]
    fn test_serve_mirrors_direction() {
        let rules = Rules::default();
        let mut ball = Ball::new(Vec2::ZERO);

        ball.serve(Side::Right, &rules);
        assert_eq!(ball.direction, Vec2::new(0.45, 0.55));
        assert_eq!(ball.speed, BALL_INIT_SPEED);

        ball.serve(Side::Left, &rules);
        assert_eq!(ball.direction, Vec2::new(-0.45, 0.55));
        assert!(ball.is_moving());
    }

    #[test]
    fn test_begin_round_and_finish() {
        let rules = Rules::default();
        let mut m = new_match("A", "B", &field(), &rules).unwrap();
        m.phase = MatchPhase::Active;
        m.serve_timer = None;
        m.ball.position = Vec2::new(12.0, 34.0);
        m.ball.speed = 9.0;

        m.begin_round(&field(), &rules, Side::Left);
        assert!(m.round_pending());
        assert_eq!(m.ball.position, field().center());
        assert!(!m.ball.is_moving());
        assert_eq!(
            m.serve_timer,
            Some(ServeTimer {
                remaining_ticks: rules.serve_delay_ticks,
                toward: Side::Left
            })
        );

        m.finish(Side::Right);
        assert_eq!(m.winner(), Some(Side::Right));
        assert!(m.serve_timer.is_none());
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let m = new_match("A", "B", &field(), &Rules::default()).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: Match = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
