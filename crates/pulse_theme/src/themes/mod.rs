//! Built-in themes
//!
//! The light theme is the base palette; the dark theme reuses it and only
//! swaps the surface, text, border, placeholder and highlight colors.

mod dark;
mod light;

use crate::theme::Theme;

pub use dark::palette as dark_palette;
pub use light::palette as light_palette;

/// Light theme (default)
pub static LIGHT_THEME: Theme = light::THEME;

/// Dark theme
pub static DARK_THEME: Theme = dark::THEME;
