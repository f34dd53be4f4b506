//! Error type shared by the core and the presentation glue

use crate::sim::Side;

/// Errors surfaced to callers.
///
/// The simulation itself has no failure modes; everything here happens at a
/// boundary (match creation, settings loading, browser lookups).
#[derive(Debug)]
pub enum PongError {
    /// A player name was empty when creating a match.
    InvalidPlayerName { side: Side },
    /// Canvas, 2D context or a page element could not be found.
    MissingSurface(String),
    /// Settings failed validation.
    InvalidSettings(String),
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON serialization/deserialization error.
    Json(serde_json::Error),
}

impl std::fmt::Display for PongError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PongError::InvalidPlayerName { side } => {
                write!(f, "invalid player name for {side} player: name is empty")
            }
            PongError::MissingSurface(what) => write!(f, "{what} not found"),
            PongError::InvalidSettings(why) => write!(f, "invalid settings: {why}"),
            PongError::Io(e) => write!(f, "IO error: {e}"),
            PongError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for PongError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PongError::Io(e) => Some(e),
            PongError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PongError {
    fn from(e: std::io::Error) -> Self {
        PongError::Io(e)
    }
}

impl From<serde_json::Error> for PongError {
    fn from(e: serde_json::Error) -> Self {
        PongError::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, PongError>;
