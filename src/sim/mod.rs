//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, sizes derived from the current playfield
//! - No timers outside `Match::serve_timer`
//! - No rendering or platform dependencies

pub mod input;
pub mod physics;
pub mod playfield;
pub mod state;
pub mod tick;

pub use input::{ControlScheme, Controls, Direction, InputState, KeyMap};
pub use physics::{TickEvents, advance, move_paddles};
pub use playfield::Playfield;
pub use state::{Ball, Match, MatchPhase, Player, Rules, ServeTimer, Side, new_match};
pub use tick::{TickReport, tick};
