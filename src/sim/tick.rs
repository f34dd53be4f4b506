//! Fixed timestep simulation tick
//!
//! Drives the round/match lifecycle on top of the physics step:
//!
//! ```text
//!   RoundPending --(serve timer expires)--> Active
//!   Active --(point scored)--> RoundPending
//!   Active --(score reaches limit)--> Finished   (terminal)
//! ```

use serde::{Deserialize, Serialize};

use super::input::InputState;
use super::physics::{TickEvents, advance, move_paddles};
use super::playfield::Playfield;
use super::state::{Match, MatchPhase, Rules, Side};

/// Outcome of one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Phase after the tick
    pub phase: MatchPhase,
    /// Physics events (empty unless the ball was in play)
    pub events: TickEvents,
    /// The ball was launched this tick
    pub served: bool,
}

/// Advance the match by one fixed tick
pub fn tick(state: &mut Match, input: &InputState, field: &Playfield, rules: &Rules) -> TickReport {
    let mut report = TickReport {
        phase: state.phase,
        events: TickEvents::default(),
        served: false,
    };

    match state.phase {
        MatchPhase::Finished { .. } => return report,

        MatchPhase::RoundPending => {
            state.ticks += 1;
            // Players can reposition while the ball waits at center
            move_paddles(state, input, field, rules);
            // Keep the parked ball on the current center across resizes
            state.ball.park(field.center());

            match state.serve_timer.as_mut() {
                Some(timer) if timer.remaining_ticks > 1 => timer.remaining_ticks -= 1,
                Some(timer) => {
                    let toward = timer.toward;
                    state.serve_timer = None;
                    state.ball.serve(toward, rules);
                    state.phase = MatchPhase::Active;
                    report.served = true;
                    log::debug!("Serve toward {} player", toward);
                }
                None => {
                    // Pending without a timer: re-arm toward the last loser
                    let toward = state.last_point.map_or(Side::Right, |s| s.opponent());
                    state.begin_round(field, rules, toward);
                }
            }
        }

        MatchPhase::Active => {
            state.ticks += 1;
            report.events = advance(state, input, field, rules);

            if let Some(scorer) = report.events.scored {
                state.last_point = Some(scorer);
                let (left, right) = state.scores();
                log::debug!("Point to {} player ({} - {})", scorer, left, right);

                if state.player(scorer).score >= state.score_limit {
                    state.finish(scorer);
                } else {
                    // Serve toward the player who just lost the point
                    state.begin_round(field, rules, scorer.opponent());
                }
            }
        }
    }

    report.phase = state.phase;
    report
}
