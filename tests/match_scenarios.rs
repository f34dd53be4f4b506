//! End-to-end match scenarios driven through the public API

use duel_pong::renderer::{MeshSurface, Theme, render};
use duel_pong::sim::{InputState, Match, MatchPhase, Playfield, Rules, Side, new_match, tick};
use duel_pong::{GameSession, PongError, Settings, Vec2};

fn field() -> Playfield {
    Playfield::new(800.0, 500.0)
}

/// Match with the ball already in play
fn live_match(position: Vec2, direction: Vec2, speed: f32) -> Match {
    let mut m = new_match("Jojo", "Lili", &field(), &Rules::default()).unwrap();
    m.phase = MatchPhase::Active;
    m.serve_timer = None;
    m.ball.position = position;
    m.ball.direction = direction;
    m.ball.speed = speed;
    m
}

#[test]
fn test_unreturned_ball_scores_exactly_once() {
    let field = field();
    let rules = Rules::default();
    let input = InputState::default();
    let mut m = live_match(Vec2::new(400.0, 250.0), Vec2::new(0.5, 0.5), 8.0);

    let mut ticks = 0;
    while m.phase == MatchPhase::Active {
        // Scores only move on the tick the ball crosses a goal line
        assert_eq!(m.scores(), (0, 0));
        tick(&mut m, &input, &field, &rules);
        ticks += 1;
        assert!(ticks < 1000, "ball never reached a goal");
    }

    let (left, right) = m.scores();
    assert_eq!(left + right, 1);
    assert_eq!(m.phase, MatchPhase::RoundPending);
    assert_eq!(m.ball.position, Vec2::new(400.0, 250.0));
    assert_eq!(m.ball.speed, 0.0);

    // Next serve goes toward the player who lost the point
    let scorer = m.last_point.unwrap();
    assert_eq!(m.serve_timer.unwrap().toward, scorer.opponent());
}

#[test]
fn test_reaching_score_limit_finishes_match() {
    let field = field();
    let rules = Rules::default();
    let input = InputState::default();
    let mut m = live_match(Vec2::new(790.0, 100.0), Vec2::new(1.0, 0.0), 8.0);
    m.left.score = rules.score_limit - 1;

    let report = tick(&mut m, &input, &field, &rules);
    assert_eq!(report.events.scored, Some(Side::Left));
    assert_eq!(m.phase, MatchPhase::Finished { winner: Side::Left });
    assert_eq!(m.scores(), (5, 0));
    assert!(m.serve_timer.is_none());

    // Terminal: further ticks change nothing
    let frozen = m.clone();
    for _ in 0..200 {
        tick(&mut m, &input, &field, &rules);
    }
    assert_eq!(m, frozen);

    let frame = render(&m, &field, &Theme::default());
    assert!(frame.texts().any(|t| t == "Jojo wins!"));
}

#[test]
fn test_empty_player_name_is_rejected() {
    let err = new_match("", "B", &field(), &Rules::default()).unwrap_err();
    assert!(matches!(err, PongError::InvalidPlayerName { side: Side::Left }));
}

#[test]
fn test_render_is_idempotent() {
    let field = field();
    let m = live_match(Vec2::new(123.0, 321.0), Vec2::new(-0.45, 0.55), 6.0);
    let theme = Theme::default();

    let a = render(&m, &field, &theme);
    let b = render(&m, &field, &theme);
    assert_eq!(a, b);

    let (mut mesh_a, mut mesh_b) = (MeshSurface::new(), MeshSurface::new());
    a.replay(&mut mesh_a);
    b.replay(&mut mesh_b);
    assert_eq!(mesh_a.vertices, mesh_b.vertices);
}

#[test]
fn test_first_serve_waits_for_delay() {
    let field = field();
    let rules = Rules::default();
    let input = InputState::default();
    let mut m = new_match("Jojo", "Lili", &field, &rules).unwrap();

    for _ in 1..rules.serve_delay_ticks {
        tick(&mut m, &input, &field, &rules);
        assert!(m.round_pending());
        assert!(!m.ball.is_moving());
    }
    let report = tick(&mut m, &input, &field, &rules);
    assert!(report.served);
    assert_eq!(m.phase, MatchPhase::Active);
    assert!(m.ball.direction.x > 0.0, "first serve goes right");
}

#[test]
fn test_session_plays_to_completion() {
    let settings = Settings::from_json(r#"{ "score_limit": 1, "serve_delay_ms": 10 }"#).unwrap();
    let mut session = GameSession::new(settings, 800.0, 500.0);
    session.start("Jojo", "Lili").unwrap();

    let mut last = None;
    for _ in 0..10_000 {
        match session.tick() {
            Some(frame) => last = Some(frame),
            None => break,
        }
    }

    assert!(!session.is_running());
    let state = session.current_match().unwrap();
    assert!(state.is_finished());
    // Served toward the right with nobody moving: the left player scores
    assert_eq!(state.winner(), Some(Side::Left));
    assert!(last.unwrap().texts().any(|t| t == "Jojo wins!"));
}
