//! Typography tokens for theming

/// Font size token keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FontSizeToken {
    Xxs,
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
    Xxxl,
}

/// Font weight token keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FontWeightToken {
    Regular,
    Medium,
    Semibold,
    Bold,
}

/// Numeric font weight (CSS scale, 100..=900)
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const REGULAR: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const SEMIBOLD: FontWeight = FontWeight(600);
    pub const BOLD: FontWeight = FontWeight(700);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSizes {
    pub xxs: f32,
    pub xs: f32,
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
    pub xl: f32,
    pub xxl: f32,
    pub xxxl: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontWeights {
    pub regular: FontWeight,
    pub medium: FontWeight,
    pub semibold: FontWeight,
    pub bold: FontWeight,
}

/// Font sizes and weights
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypographyTokens {
    pub sizes: FontSizes,
    pub weights: FontWeights,
}

impl TypographyTokens {
    pub const fn new() -> Self {
        Self {
            sizes: FontSizes {
                xxs: 10.0,
                xs: 12.0,
                sm: 14.0,
                md: 16.0,
                lg: 18.0,
                xl: 20.0,
                xxl: 24.0,
                xxxl: 32.0,
            },
            weights: FontWeights {
                regular: FontWeight::REGULAR,
                medium: FontWeight::MEDIUM,
                semibold: FontWeight::SEMIBOLD,
                bold: FontWeight::BOLD,
            },
        }
    }

    pub fn size(&self, token: FontSizeToken) -> f32 {
        match token {
            FontSizeToken::Xxs => self.sizes.xxs,
            FontSizeToken::Xs => self.sizes.xs,
            FontSizeToken::Sm => self.sizes.sm,
            FontSizeToken::Md => self.sizes.md,
            FontSizeToken::Lg => self.sizes.lg,
            FontSizeToken::Xl => self.sizes.xl,
            FontSizeToken::Xxl => self.sizes.xxl,
            FontSizeToken::Xxxl => self.sizes.xxxl,
        }
    }

    pub fn weight(&self, token: FontWeightToken) -> FontWeight {
        match token {
            FontWeightToken::Regular => self.weights.regular,
            FontWeightToken::Medium => self.weights.medium,
            FontWeightToken::Semibold => self.weights.semibold,
            FontWeightToken::Bold => self.weights.bold,
        }
    }
}

impl Default for TypographyTokens {
    fn default() -> Self {
        Self::new()
    }
}
