//! Platform abstraction layer
//!
//! Browser glue lives in `web` (wasm32 only): canvas 2D surface, page
//! sizing, DOM event wiring and the 10 ms tick interval. Native builds
//! drive `GameSession` directly from `main`.

use crate::consts::{CANVAS_FILL, GOLDEN_RATIO};

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Canvas size for a window, plus whether the court is drawn rotated.
///
/// The playfield is always landscape. In a portrait window the canvas is
/// portrait too and the court is rotated a quarter turn onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub rotated: bool,
}

impl CanvasLayout {
    pub fn for_window(window_width: f32, window_height: f32) -> Self {
        if window_height > window_width {
            let canvas_height = window_height * CANVAS_FILL;
            Self {
                canvas_width: canvas_height / GOLDEN_RATIO,
                canvas_height,
                rotated: true,
            }
        } else {
            let canvas_width = window_width * CANVAS_FILL;
            Self {
                canvas_width,
                canvas_height: canvas_width / GOLDEN_RATIO,
                rotated: false,
            }
        }
    }

    /// Logical playfield size (width, height)
    pub fn playfield(&self) -> (f32, f32) {
        if self.rotated {
            (self.canvas_height, self.canvas_width)
        } else {
            (self.canvas_width, self.canvas_height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_layout() {
        let layout = CanvasLayout::for_window(1000.0, 700.0);
        assert!(!layout.rotated);
        assert_eq!(layout.canvas_width, 800.0);
        assert!((layout.canvas_height - 800.0 / GOLDEN_RATIO).abs() < 1e-3);
        assert_eq!(layout.playfield(), (layout.canvas_width, layout.canvas_height));
    }

    #[test]
    fn test_portrait_layout_keeps_playfield_landscape() {
        let layout = CanvasLayout::for_window(400.0, 1000.0);
        assert!(layout.rotated);
        let (w, h) = layout.playfield();
        assert!(w > h);
        assert_eq!(w, 800.0);
    }
}
