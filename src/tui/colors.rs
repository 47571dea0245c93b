//! Color constants for the terminal board.

use ratatui::style::Color;

/// High priority cards
pub const PRIORITY_HIGH: Color = Color::Rgb(220, 38, 38);
/// Medium priority cards
pub const PRIORITY_MEDIUM: Color = Color::Rgb(217, 119, 6);
/// Low priority cards
pub const PRIORITY_LOW: Color = Color::Rgb(22, 163, 74);

/// Column accents: To Do, In Progress, Completed
pub const COLUMN_ACCENTS: [Color; 3] = [
    Color::Rgb(100, 116, 139),
    Color::Rgb(59, 130, 246),
    Color::Rgb(16, 185, 129),
];

/// Parse a `#RRGGBB` category colour token, falling back to gray.
pub fn category_color(token: &str) -> Color {
    let hex = token.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Color::Gray;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}
