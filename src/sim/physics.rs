//! Per-tick physics: paddle motion, ball integration, collisions, scoring
//!
//! Rules run in a fixed order every tick. The collision responses decided
//! this tick are used by this tick's integration.
//!
//! Paddle hits test the ball's *current* center against the paddle
//! rectangle, not the swept path. A ball moving faster than a paddle is
//! thick can pass straight through it; that is how the game plays.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::InputState;
use super::playfield::Playfield;
use super::state::{Match, Rules, Side};

/// What happened during one physics step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvents {
    /// Ball reflected off the top or bottom wall
    pub wall_bounce: bool,
    /// Paddles that deflected the ball
    pub paddle_hits: Vec<Side>,
    /// Side that won a point
    pub scored: Option<Side>,
}

/// Move both paddles by their held keys, then clamp them into the field.
/// Paddle x is re-anchored to the current playfield so resizes keep the
/// paddles at their edges.
pub fn move_paddles(state: &mut Match, input: &InputState, field: &Playfield, rules: &Rules) {
    for side in [Side::Left, Side::Right] {
        let axis = input.axis(side);
        let player = state.player_mut(side);
        player.position.x = field.paddle_x(side);
        player.position.y += axis * rules.paddle_speed;
        player.position.y = field.clamp_paddle_y(player.position.y);
    }
}

/// Reflect off the top/bottom walls if `next` would leave the field
#[inline]
pub fn wall_collision(next: Vec2, ball_radius: f32, field: &Playfield) -> bool {
    next.y > field.height - ball_radius || next.y < ball_radius
}

/// Which goal `next` crosses, if any. Both are checked; the right goal
/// is reported first.
pub fn goal_crossings(next: Vec2, ball_radius: f32, field: &Playfield) -> [Option<Side>; 2] {
    // Crossing the right goal line is a point for the left player
    let right_goal = (next.x > field.width - ball_radius).then_some(Side::Left);
    let left_goal = (next.x < ball_radius).then_some(Side::Right);
    [right_goal, left_goal]
}

/// Advance paddles and ball by one tick
pub fn advance(
    state: &mut Match,
    input: &InputState,
    field: &Playfield,
    rules: &Rules,
) -> TickEvents {
    let mut events = TickEvents::default();

    move_paddles(state, input, field, rules);

    let radius = field.ball_radius();
    let next = state.ball.position + state.ball.velocity();

    if wall_collision(next, radius, field) {
        state.ball.direction.y = -state.ball.direction.y;
        events.wall_bounce = true;
    }

    for side in [Side::Left, Side::Right] {
        let paddle = state.player(side).position;
        if field.paddle_contains(paddle, state.ball.position) {
            let ball = &mut state.ball;
            ball.direction.x = -ball.direction.x;
            ball.speed = (ball.speed + rules.ball_speed_step).min(rules.ball_max_speed);
            events.paddle_hits.push(side);
        }
    }

    for scorer in goal_crossings(next, radius, field).into_iter().flatten() {
        state.player_mut(scorer).score += 1;
        if events.scored.is_none() {
            events.scored = Some(scorer);
        }
    }

    state.ball.position += state.ball.velocity();

    events
}
