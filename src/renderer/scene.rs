//! Builds the draw commands for a match
//!
//! `render` is a pure function of the match and the playfield: calling it
//! twice on the same inputs yields the same `Frame`.

use serde::{Deserialize, Serialize};

use super::frame::{Color, DrawCommand, Frame, TextAlign};
use super::vertex::colors;
use crate::consts::SCORE_POS_RATIO;
use crate::sim::{Match, Playfield, Side};

/// Palette and font
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub divider: Color,
    pub paddle: Color,
    pub ball: Color,
    pub text: Color,
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: colors::BACKGROUND,
            divider: colors::DIVIDER,
            paddle: colors::PADDLE,
            ball: colors::BALL,
            text: colors::TEXT,
            font_family: "sans-serif".to_string(),
        }
    }
}

/// Where the win message goes for `winner`
pub fn win_message_anchor(winner: Side, field: &Playfield) -> (f32, f32) {
    let x = match winner {
        Side::Left => field.width / 4.0,
        Side::Right => field.width * 3.0 / 4.0,
    };
    (x, field.height / 2.0)
}

/// Score anchors (centers of the two score strings)
pub fn score_anchors(field: &Playfield) -> [(f32, f32); 2] {
    let x = SCORE_POS_RATIO * field.width / 2.0;
    let y = (1.0 - SCORE_POS_RATIO) * field.height;
    [(x, y), (field.width - x, y)]
}

/// Draw the court, paddles, ball, scores and, once finished, the winner
pub fn render(state: &Match, field: &Playfield, theme: &Theme) -> Frame {
    let mut frame = Frame::new(field.width, field.height);

    frame.push(DrawCommand::Clear {
        width: field.width,
        height: field.height,
    });

    frame.push(DrawCommand::FillRect {
        x: 0.0,
        y: 0.0,
        width: field.width,
        height: field.height,
        color: theme.background,
    });

    // Divider
    let line = field.divider_width();
    frame.push(DrawCommand::FillRect {
        x: (field.width - line) / 2.0,
        y: 0.0,
        width: line,
        height: field.height,
        color: theme.divider,
    });

    for side in [Side::Left, Side::Right] {
        let pos = state.player(side).position;
        frame.push(DrawCommand::FillRect {
            x: pos.x,
            y: pos.y,
            width: field.paddle_thickness(),
            height: field.paddle_length(),
            color: theme.paddle,
        });
    }

    frame.push(DrawCommand::FillCircle {
        x: state.ball.position.x,
        y: state.ball.position.y,
        radius: field.ball_radius(),
        color: theme.ball,
    });

    let size = field.font_size();
    let [left_anchor, right_anchor] = score_anchors(field);
    for (score, (x, y)) in [(state.left.score, left_anchor), (state.right.score, right_anchor)] {
        frame.push(DrawCommand::Text {
            text: score.to_string(),
            x,
            y,
            size,
            align: TextAlign::Center,
            color: theme.text,
        });
    }

    if let Some(winner) = state.winner() {
        let (x, y) = win_message_anchor(winner, field);
        frame.push(DrawCommand::Text {
            text: format!("{} wins!", state.player(winner).name),
            x,
            y,
            size,
            align: TextAlign::Center,
            color: theme.text,
        });
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Rules, new_match};

    fn field() -> Playfield {
        Playfield::new(800.0, 500.0)
    }

    #[test]
    fn test_render_layout() {
        let m = new_match("Jojo", "Lili", &field(), &Rules::default()).unwrap();
        let frame = render(&m, &field(), &Theme::default());

        assert_eq!(frame.width, 800.0);
        assert!(matches!(frame.commands[0], DrawCommand::Clear { .. }));
        // clear, background, divider, 2 paddles, ball, 2 scores
        assert_eq!(frame.commands.len(), 8);
        assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["0", "0"]);

        match &frame.commands[5] {
            DrawCommand::FillCircle { x, y, .. } => {
                assert_eq!((*x, *y), (400.0, 250.0));
            }
            other => panic!("expected ball, got {other:?}"),
        }
    }

    #[test]
    fn test_win_message_only_when_finished() {
        let mut m = new_match("Jojo", "Lili", &field(), &Rules::default()).unwrap();
        m.right.score = m.score_limit;
        m.finish(Side::Right);

        let frame = render(&m, &field(), &Theme::default());
        let last = frame.commands.last().unwrap();
        match last {
            DrawCommand::Text { text, x, y, .. } => {
                assert_eq!(text, "Lili wins!");
                assert_eq!((*x, *y), (600.0, 250.0));
            }
            other => panic!("expected win text, got {other:?}"),
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let m = new_match("A", "B", &field(), &Rules::default()).unwrap();
        let theme = Theme::default();
        assert_eq!(render(&m, &field(), &theme), render(&m, &field(), &theme));
    }

    #[test]
    fn test_background_color_is_drawn() {
        let m = new_match("A", "B", &field(), &Rules::default()).unwrap();
        let theme = Theme {
            background: [1.0, 0.0, 0.0, 1.0],
            ..Theme::default()
        };
        let frame = render(&m, &field(), &theme);
        assert_eq!(
            frame.commands[1],
            DrawCommand::FillRect {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 500.0,
                color: [1.0, 0.0, 0.0, 1.0],
            }
        );
        assert_ne!(frame, render(&m, &field(), &Theme::default()));
    }

    #[test]
    fn test_score_anchors() {
        let [(lx, ly), (rx, ry)] = score_anchors(&field());
        assert!((lx - 360.0).abs() < 1e-3);
        assert!((rx - 440.0).abs() < 1e-3);
        assert!((ly - 50.0).abs() < 1e-3);
        assert_eq!(ly, ry);
    }
}
