use ratatui::style::Color;

use crate::preferences::Theme;

// Brand
pub const THEME_PURPLE: Color = Color::Rgb(79, 26, 201); // #4f1ac9
pub const LIVE_RED: Color = Color::Rgb(220, 38, 38);
pub const HEART_RED: Color = Color::Rgb(239, 68, 68);

// Dark
pub const DARK_BG: Color = Color::Rgb(18, 18, 18); // #121212
pub const DARK_SURFACE: Color = Color::Rgb(30, 30, 30);
pub const DARK_BORDER: Color = Color::Rgb(55, 55, 55);
pub const DARK_TEXT: Color = Color::Rgb(240, 240, 240);
pub const DARK_MUTED: Color = Color::Rgb(140, 140, 140);

// Light
pub const LIGHT_BG: Color = Color::Rgb(255, 255, 255);
pub const LIGHT_SURFACE: Color = Color::Rgb(243, 244, 246);
pub const LIGHT_BORDER: Color = Color::Rgb(209, 213, 219);
pub const LIGHT_TEXT: Color = Color::Rgb(17, 24, 39);
pub const LIGHT_MUTED: Color = Color::Rgb(107, 114, 128);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub surface: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        if theme.is_dark() {
            Palette {
                bg: DARK_BG,
                surface: DARK_SURFACE,
                border: DARK_BORDER,
                text: DARK_TEXT,
                muted: DARK_MUTED,
                accent: THEME_PURPLE,
            }
        } else {
            Palette {
                bg: LIGHT_BG,
                surface: LIGHT_SURFACE,
                border: LIGHT_BORDER,
                text: LIGHT_TEXT,
                muted: LIGHT_MUTED,
                accent: THEME_PURPLE,
            }
        }
    }
}
