//! Design tokens for theming
//!
//! Tokens are the atomic values that make up the design system:
//! - Colors
//! - Spacing (margins, padding)
//! - Border radii
//! - Shadows
//! - Typography (sizes, weights)
//!
//! Only colors vary between light and dark; every other family is shared.

mod color;
mod radius;
mod shadow;
mod spacing;
mod typography;

pub use color::*;
pub use radius::*;
pub use shadow::*;
pub use spacing::*;
pub use typography::*;
