//! Shape generation for 2D primitives

use std::f32::consts::PI;

use super::vertex::Vertex;

/// Segments used for a circle of `radius` pixels
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 2.0) as u32).clamp(12, 64)
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (x2, y2) = (x + width, y + height);
    vec![
        // Two triangles
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(cx: f32, cy: f32, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(cx, cy, color));
        vertices.push(Vertex::new(
            cx + radius * theta1.cos(),
            cy + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            cx + radius * theta2.cos(),
            cy + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
