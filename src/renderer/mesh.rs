//! CPU tessellating surface
//!
//! Turns a `Frame` into a triangle list that a GPU back-end can upload as
//! one vertex buffer. Text is not tessellated (that needs a glyph atlas);
//! it is collected as positioned runs instead.

use super::frame::{Color, DrawSurface};
use super::shapes;
use super::vertex::{self, Vertex};

/// Approximate advance of one character, as a fraction of the font size
const CHAR_ADVANCE: f32 = 0.6;

/// A positioned text string
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Color,
}

/// Accumulates triangles and text runs for one frame
#[derive(Debug, Clone, Default)]
pub struct MeshSurface {
    pub vertices: Vec<Vertex>,
    pub texts: Vec<TextRun>,
}

impl MeshSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Packed vertex buffer, `Vertex::STRIDE` bytes per vertex
    pub fn as_bytes(&self) -> &[u8] {
        vertex::as_bytes(&self.vertices)
    }
}

impl DrawSurface for MeshSurface {
    /// A full clear drops everything drawn so far
    fn clear_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {
        self.vertices.clear();
        self.texts.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.vertices.extend(shapes::rect(x, y, width, height, color));
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        let segments = shapes::circle_segments(radius);
        self.vertices
            .extend(shapes::circle(x, y, radius, color, segments));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.texts.push(TextRun {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }

    fn measure_text(&mut self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * CHAR_ADVANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Theme, render};
    use crate::sim::{Playfield, Rules, new_match};

    #[test]
    fn test_frame_tessellation() {
        let field = Playfield::new(800.0, 500.0);
        let m = new_match("A", "B", &field, &Rules::default()).unwrap();
        let frame = render(&m, &field, &Theme::default());

        let mut mesh = MeshSurface::new();
        frame.replay(&mut mesh);

        // Background, divider and 2 paddles = 4 quads, ball radius 5 -> 12 segments
        assert_eq!(mesh.triangle_count(), 4 * 2 + 12);
        assert_eq!(mesh.texts.len(), 2);
        assert_eq!(mesh.as_bytes().len(), mesh.vertices.len() * Vertex::STRIDE);
        // "0" at size 40 is 24 wide, centered on x = 360
        assert!((mesh.texts[0].x - 348.0).abs() < 1e-3);
    }

    #[test]
    fn test_clear_resets_surface() {
        let mut mesh = MeshSurface::new();
        mesh.fill_rect(0.0, 0.0, 1.0, 1.0, [1.0; 4]);
        mesh.fill_text("x", 0.0, 0.0, 10.0, [1.0; 4]);
        mesh.clear_rect(0.0, 0.0, 10.0, 10.0);
        assert!(mesh.vertices.is_empty());
        assert!(mesh.texts.is_empty());
    }
}
