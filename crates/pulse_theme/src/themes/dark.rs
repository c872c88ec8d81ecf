//! Dark theme
//!
//! Reuses the light theme and overrides only the surface, text and
//! outline colors.

use crate::theme::Theme;
use crate::tokens::*;

/// Dark palette (surface, text and outline overrides only)
pub mod palette {
    use crate::tokens::Color;

    pub const NIGHT: Color = Color::from_hex(0x121212);
    pub const CHARCOAL: Color = Color::from_hex(0x1E1E1E);
    pub const GRAPHITE: Color = Color::from_hex(0x2D2D2D);
    pub const WHITE: Color = Color::WHITE;
    pub const SILVER: Color = Color::from_hex(0xA0A0A0);
    pub const STONE: Color = Color::from_hex(0x787878);
}

pub(super) const THEME: Theme = Theme {
    colors: ColorTokens {
        background: palette::NIGHT,
        background_secondary: palette::CHARCOAL,
        background_tertiary: palette::GRAPHITE,

        text: palette::WHITE,
        text_secondary: palette::SILVER,
        text_tertiary: palette::STONE,

        border: palette::GRAPHITE,
        placeholder: palette::STONE,
        highlight: palette::GRAPHITE,
        ..super::light::THEME.colors
    },
    ..super::light::THEME
};
