//! Color tokens for theming

use std::fmt;

/// Opaque sRGB color
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// `#RRGGBB` form, uppercase
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Semantic color token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorToken {
    // Brand colors
    Primary,
    PrimaryDark,
    PrimaryLight,

    // Background colors
    Background,
    BackgroundSecondary,
    BackgroundTertiary,

    // Text colors
    Text,
    TextSecondary,
    TextTertiary,
    TextInverted,

    // Status colors
    Upvote,
    Downvote,
    Success,
    Warning,
    Error,

    // UI elements
    Border,
    Placeholder,
    Highlight,
    InputBackground,
}

impl ColorToken {
    /// Tokens overridden by the dark scheme
    pub const SCHEME_DEPENDENT: [ColorToken; 9] = [
        ColorToken::Background,
        ColorToken::BackgroundSecondary,
        ColorToken::BackgroundTertiary,
        ColorToken::Text,
        ColorToken::TextSecondary,
        ColorToken::TextTertiary,
        ColorToken::Border,
        ColorToken::Placeholder,
        ColorToken::Highlight,
    ];
}

/// Complete set of semantic color tokens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorTokens {
    // Brand colors
    pub primary: Color,
    pub primary_dark: Color,
    pub primary_light: Color,

    // Background colors
    pub background: Color,
    pub background_secondary: Color,
    pub background_tertiary: Color,

    // Text colors
    pub text: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color,
    pub text_inverted: Color,

    // Status colors
    pub upvote: Color,
    pub downvote: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI elements
    pub border: Color,
    pub placeholder: Color,
    pub highlight: Color,
    pub input_background: Color,
}

impl ColorTokens {
    /// Get a color by token key
    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Primary => self.primary,
            ColorToken::PrimaryDark => self.primary_dark,
            ColorToken::PrimaryLight => self.primary_light,
            ColorToken::Background => self.background,
            ColorToken::BackgroundSecondary => self.background_secondary,
            ColorToken::BackgroundTertiary => self.background_tertiary,
            ColorToken::Text => self.text,
            ColorToken::TextSecondary => self.text_secondary,
            ColorToken::TextTertiary => self.text_tertiary,
            ColorToken::TextInverted => self.text_inverted,
            ColorToken::Upvote => self.upvote,
            ColorToken::Downvote => self.downvote,
            ColorToken::Success => self.success,
            ColorToken::Warning => self.warning,
            ColorToken::Error => self.error,
            ColorToken::Border => self.border,
            ColorToken::Placeholder => self.placeholder,
            ColorToken::Highlight => self.highlight,
            ColorToken::InputBackground => self.input_background,
        }
    }
}
