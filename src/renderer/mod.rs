//! 2D rendering module
//!
//! The renderer never touches game state: `render` turns a match into a
//! `Frame` of flat draw commands, and any `DrawSurface` can replay it.

pub mod frame;
pub mod mesh;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use frame::{Color, DrawCommand, DrawSurface, Frame, TextAlign, css_color};
pub use mesh::{MeshSurface, TextRun};
pub use scene::{Theme, render};
pub use vertex::Vertex;
