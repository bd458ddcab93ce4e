use dotindicator_core::Rgba;
use ratatui::style::Color;

/// Demo colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Rgba,
    pub panel: Rgba,
    pub fg: Rgba,
    pub dim: Rgba,
    pub accent: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgba::opaque(0x12, 0x14, 0x1a),
            panel: Rgba::opaque(0x1b, 0x1e, 0x26),
            fg: Rgba::opaque(0xd8, 0xdc, 0xe8),
            dim: Rgba::opaque(0x7a, 0x80, 0x93),
            accent: Rgba::opaque(0x61, 0x77, 0xe5),
        }
    }
}

/// Convert to a terminal color, dropping alpha
#[inline]
pub fn to_color(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
