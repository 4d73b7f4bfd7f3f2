use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Where a panel starts when nothing was persisted.
pub const DEFAULT_POSITION: Position = Position { x: 24.0, y: 24.0 };

/// Size assumed for a panel that has not been laid out yet.
pub const FALLBACK_PANEL_SIZE: Vec2 = Vec2::new(240.0, 400.0);

/// Offset of the panel's top-left corner from the viewport origin, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        DEFAULT_POSITION
    }
}

impl From<Position> for Pos2 {
    fn from(pos: Position) -> Self {
        Pos2::new(pos.x, pos.y)
    }
}

impl From<Pos2> for Position {
    fn from(pos: Pos2) -> Self {
        Self::new(pos.x, pos.y)
    }
}

/// Constrain a candidate position so the whole panel stays inside the viewport.
///
/// `panel` is the measured panel size; a missing or zero dimension falls back to
/// [`FALLBACK_PANEL_SIZE`]. When the panel is larger than the viewport the
/// coordinate floors to `0`. NaN candidates also end up at `0`.
pub fn clamp(x: f32, y: f32, viewport: Vec2, panel: Option<Vec2>) -> Position {
    let panel = panel.unwrap_or(FALLBACK_PANEL_SIZE);
    let width = measured_or(panel.x, FALLBACK_PANEL_SIZE.x);
    let height = measured_or(panel.y, FALLBACK_PANEL_SIZE.y);

    let max_x = (viewport.x - width).max(0.0);
    let max_y = (viewport.y - height).max(0.0);

    Position {
        x: x.max(0.0).min(max_x),
        y: y.max(0.0).min(max_y),
    }
}

fn measured_or(value: f32, fallback: f32) -> f32 {
    if value > 0.0 {
        value
    } else {
        fallback
    }
}
