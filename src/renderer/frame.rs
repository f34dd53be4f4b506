//! Draw commands and the surface they are replayed on

use serde::{Deserialize, Serialize};

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// CSS `rgba()` string for canvas back-ends
pub fn css_color(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Horizontal anchor of a text command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    /// `x` is the left edge
    Left,
    /// `x` is the center; the surface measures the text to place it
    Center,
}

/// A single flat 2D drawing operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    FillCircle {
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
    },
    /// `y` is the text baseline
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        align: TextAlign,
        color: Color,
    },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

/// The capabilities a back-end must provide to display a `Frame`
pub trait DrawSurface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
    /// Advance width of `text` at `size` pixels
    fn measure_text(&mut self, text: &str, size: f32) -> f32;
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Draw every command in order
    pub fn replay<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear { width, height } => {
                    surface.clear_rect(0.0, 0.0, *width, *height);
                }
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => surface.fill_rect(*x, *y, *width, *height, *color),
                DrawCommand::FillCircle {
                    x,
                    y,
                    radius,
                    color,
                } => surface.fill_circle(*x, *y, *radius, *color),
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    size,
                    align,
                    color,
                } => {
                    let x = match align {
                        TextAlign::Left => *x,
                        TextAlign::Center => *x - surface.measure_text(text, *size) / 2.0,
                    };
                    surface.fill_text(text, x, *y, *size, *color);
                }
            }
        }
    }

    /// Text commands, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
