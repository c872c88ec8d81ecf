//! Light theme: the base palette every scheme starts from

use crate::theme::Theme;
use crate::tokens::*;

/// Light palette
pub mod palette {
    use crate::tokens::Color;

    // Brand
    pub const ORANGE_RED: Color = Color::from_hex(0xFF4500);
    pub const ORANGE_RED_DARK: Color = Color::from_hex(0xCC3700);
    pub const ORANGE_RED_LIGHT: Color = Color::from_hex(0xFF8C66);
    pub const PERIWINKLE: Color = Color::from_hex(0x7193FF);

    // Status
    pub const GREEN: Color = Color::from_hex(0x46D160);
    pub const AMBER: Color = Color::from_hex(0xFFB800);
    pub const RED: Color = Color::from_hex(0xEA0027);

    // Neutrals
    pub const WHITE: Color = Color::WHITE;
    pub const SNOW: Color = Color::from_hex(0xF8F9FA);
    pub const MIST: Color = Color::from_hex(0xF6F7F8);
    pub const CLOUD: Color = Color::from_hex(0xEDEFF1);
    pub const LAVENDER_GRAY: Color = Color::from_hex(0xA0A0C0);
    pub const SLATE: Color = Color::from_hex(0x787C7E);
    pub const INK: Color = Color::from_hex(0x1A1A1B);
}

pub(super) const THEME: Theme = Theme {
    colors: ColorTokens {
        primary: palette::ORANGE_RED,
        primary_dark: palette::ORANGE_RED_DARK,
        primary_light: palette::ORANGE_RED_LIGHT,

        background: palette::WHITE,
        background_secondary: palette::SNOW,
        background_tertiary: palette::CLOUD,

        text: palette::INK,
        text_secondary: palette::SLATE,
        text_tertiary: palette::LAVENDER_GRAY,
        text_inverted: palette::WHITE,

        upvote: palette::ORANGE_RED,
        downvote: palette::PERIWINKLE,
        success: palette::GREEN,
        warning: palette::AMBER,
        error: palette::RED,

        border: palette::CLOUD,
        placeholder: palette::LAVENDER_GRAY,
        highlight: palette::MIST,
        input_background: palette::MIST,
    },
    spacing: SpacingTokens::new(),
    radii: RadiusTokens::new(),
    shadows: ShadowTokens::new(),
    typography: TypographyTokens::new(),
};
