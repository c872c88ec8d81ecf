//! Color scheme and the theme value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::themes::{DARK_THEME, LIGHT_THEME};
use crate::tokens::*;

/// Active visual mode
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// The opposite scheme
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            _ => Err(ThemeError::InvalidColorScheme(s.to_string())),
        }
    }
}

/// Immutable set of design tokens for one color scheme
///
/// Only two instances exist, [`LIGHT_THEME`] and [`DARK_THEME`]. Views hold
/// `&'static Theme` and may compare by address to skip unaffected subtrees.
#[derive(Debug, PartialEq)]
pub struct Theme {
    pub colors: ColorTokens,
    pub spacing: SpacingTokens,
    pub radii: RadiusTokens,
    pub shadows: ShadowTokens,
    pub typography: TypographyTokens,
}

impl Theme {
    /// Canonical theme for a scheme
    pub fn for_scheme(scheme: ColorScheme) -> &'static Theme {
        match scheme {
            ColorScheme::Dark => &DARK_THEME,
            ColorScheme::Light => &LIGHT_THEME,
        }
    }

    pub fn color(&self, token: ColorToken) -> Color {
        self.colors.get(token)
    }

    pub fn spacing(&self, token: SpacingToken) -> f32 {
        self.spacing.get(token)
    }

    pub fn radius(&self, token: RadiusToken) -> f32 {
        self.radii.get(token)
    }

    pub fn shadow(&self, token: ShadowToken) -> &Shadow {
        self.shadows.get(token)
    }
}
