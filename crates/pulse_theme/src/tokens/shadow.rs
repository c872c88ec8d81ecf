//! Shadow tokens for theming

use super::Color;

/// Semantic shadow token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ShadowToken {
    Xs,
    Sm,
    Md,
    Lg,
}

/// A drop shadow definition
///
/// Carries both the iOS-style (offset/opacity/radius) and the Android-style
/// (elevation) description so either platform can render it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub offset_x: f32,
    pub offset_y: f32,
    pub opacity: f32,
    pub radius: f32,
    pub elevation: f32,
}

impl Shadow {
    pub const fn new(offset_y: f32, opacity: f32, radius: f32, elevation: f32) -> Self {
        Self {
            color: Color::BLACK,
            offset_x: 0.0,
            offset_y,
            opacity,
            radius,
            elevation,
        }
    }

    pub const fn none() -> Self {
        Self {
            color: Color::BLACK,
            offset_x: 0.0,
            offset_y: 0.0,
            opacity: 0.0,
            radius: 0.0,
            elevation: 0.0,
        }
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self::none()
    }
}

/// Complete set of shadow tokens
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowTokens {
    pub xs: Shadow,
    pub sm: Shadow,
    pub md: Shadow,
    pub lg: Shadow,
}

impl ShadowTokens {
    pub const fn new() -> Self {
        Self {
            xs: Shadow::new(1.0, 0.05, 2.0, 1.0),
            sm: Shadow::new(2.0, 0.1, 4.0, 2.0),
            md: Shadow::new(4.0, 0.15, 6.0, 4.0),
            lg: Shadow::new(6.0, 0.2, 8.0, 8.0),
        }
    }

    /// Get shadow by token key
    pub fn get(&self, token: ShadowToken) -> &Shadow {
        match token {
            ShadowToken::Xs => &self.xs,
            ShadowToken::Sm => &self.sm,
            ShadowToken::Md => &self.md,
            ShadowToken::Lg => &self.lg,
        }
    }
}

impl Default for ShadowTokens {
    fn default() -> Self {
        Self::new()
    }
}
