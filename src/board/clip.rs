use serde::Serialize;

/// One playable tile on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clip {
    /// URL path of the raw audio, forward slashes only
    pub file: String,
    /// Display title
    pub name: String,
    /// Tile background, `#rrggbb`
    pub color: String,
}
