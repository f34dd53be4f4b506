//! Duel Pong entry point
//!
//! In the browser this wires the page up and hands control to the tick
//! interval. Natively it plays a headless bot-vs-bot match and prints a
//! JSON summary, which is handy for tuning settings files.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Duel Pong starting...");
    if let Err(e) = duel_pong::platform::web::run() {
        log::error!("Failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use duel_pong::renderer::{MeshSurface, Vertex};
    use duel_pong::sim::{ControlScheme, Match, Playfield, Side};
    use duel_pong::{GameSession, Result, Settings};
    use serde::Serialize;

    const FIELD: (f32, f32) = (800.0, 500.0);
    /// Give up on matches the bots cannot finish
    const MAX_TICKS: u64 = 500_000;

    /// Keyboard-pressing opponent. Only tracks the ball while it is within
    /// `reach` (fraction of the field width) of its own edge.
    struct Bot {
        side: Side,
        up: Option<String>,
        down: Option<String>,
        reach: f32,
    }

    impl Bot {
        fn new(side: Side, controls: &ControlScheme, reach: f32) -> Self {
            Self {
                side,
                up: controls.up.first().cloned(),
                down: controls.down.first().cloned(),
                reach,
            }
        }

        /// Key to hold this tick, if any
        fn key(&self, state: &Match, field: &Playfield) -> Option<&str> {
            let ball = state.ball.position;
            let distance = match self.side {
                Side::Left => ball.x,
                Side::Right => field.width - ball.x,
            };
            if distance > field.width * self.reach {
                return None;
            }

            let paddle_mid = state.player(self.side).position.y + field.paddle_length() / 2.0;
            let dead_zone = field.paddle_length() / 4.0;
            if ball.y < paddle_mid - dead_zone {
                self.up.as_deref()
            } else if ball.y > paddle_mid + dead_zone {
                self.down.as_deref()
            } else {
                None
            }
        }
    }

    #[derive(Serialize)]
    struct Summary {
        left: String,
        right: String,
        score: (u32, u32),
        winner: Option<String>,
        ticks: u64,
        triangles: usize,
        vertex_stride: usize,
        vertex_bytes: usize,
    }

    pub fn run(settings: Settings) -> Result<()> {
        let bots = [
            Bot::new(Side::Left, &settings.left_controls, 0.5),
            Bot::new(Side::Right, &settings.right_controls, 0.3),
        ];

        let mut session = GameSession::new(settings, FIELD.0, FIELD.1);
        session.start("Jojo", "Lili")?;

        while session.is_running() {
            let keys: Vec<String> = match session.current_match() {
                Some(state) if state.ticks < MAX_TICKS => {
                    let field = session.playfield();
                    bots.iter()
                        .filter_map(|bot| bot.key(state, &field))
                        .map(str::to_string)
                        .collect()
                }
                _ => break,
            };

            session.release_keys();
            for key in &keys {
                session.on_key_down(key);
            }
            session.tick();
        }

        let Some(state) = session.current_match() else {
            return Ok(());
        };
        if !state.is_finished() {
            log::warn!("Stopped after {} ticks without a winner", state.ticks);
        }

        let mut mesh = MeshSurface::new();
        if let Some(frame) = session.frame() {
            frame.replay(&mut mesh);
        }

        let summary = Summary {
            left: state.left.name.clone(),
            right: state.right.name.clone(),
            score: state.scores(),
            winner: state.winner().map(|side| state.player(side).name.clone()),
            ticks: state.ticks,
            triangles: mesh.triangle_count(),
            vertex_stride: Vertex::STRIDE,
            vertex_bytes: mesh.as_bytes().len(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Duel Pong (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match duel_pong::Settings::load_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => duel_pong::Settings::default(),
    };

    if let Err(e) = headless::run(settings) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
