//! Centralized theme module for TUI color constants and styles

use crate::usecase::Quadrant;
use ratatui::prelude::*;

pub const TITLE_COLOR: Color = Color::Cyan;
pub const MUTED: Color = Color::Gray;
pub const ROW_ALT_BG: Color = Color::Indexed(235);
pub const INDEX_COLOR: Color = Color::DarkGray;
pub const STATUS_BAR_BG: Color = Color::Indexed(236);
pub const STATUS_KEY_COLOR: Color = Color::Cyan;
pub const FLASH_SUCCESS: Color = Color::Green;
pub const FLASH_ERROR: Color = Color::Red;
pub const FIELD_LABEL: Color = Color::Gray;
pub const BAR_EMPTY: Color = Color::DarkGray;

pub fn header_style() -> Style {
    Style::new().bold()
}

pub fn row_selected() -> Style {
    Style::new().reversed()
}

/// Quadrant colors, matching the hex palette the HTML reports use.
pub fn quadrant_color(quadrant: Quadrant) -> Color {
    match quadrant {
        Quadrant::QuickWins => Color::Green,
        Quadrant::StrategicInitiatives => Color::Yellow,
        Quadrant::IncrementalImprovements => Color::Cyan,
        Quadrant::Deprioritize => Color::Red,
    }
}
