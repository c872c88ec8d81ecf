//! Persisted color scheme preference

use serde::{Deserialize, Serialize};

use crate::theme::ColorScheme;

/// Durable storage key holding the serialized [`ThemePreference`]
pub const STORAGE_KEY: &str = "app_theme_settings";

/// The user's color scheme preference
///
/// When `is_system_theme` is set, `color_scheme` tracks the OS appearance;
/// otherwise it is a user override that OS changes never touch.
///
/// Serialized as `{"colorScheme":"dark","isSystemTheme":false}`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePreference {
    pub color_scheme: ColorScheme,
    pub is_system_theme: bool,
}

impl ThemePreference {
    /// Follow the OS, currently showing `scheme`
    pub fn system(scheme: ColorScheme) -> Self {
        Self {
            color_scheme: scheme,
            is_system_theme: true,
        }
    }

    /// Explicit user override
    pub fn manual(scheme: ColorScheme) -> Self {
        Self {
            color_scheme: scheme,
            is_system_theme: false,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

impl Default for ThemePreference {
    fn default() -> Self {
        Self::system(ColorScheme::Light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn durable_layout_uses_camel_case_keys() {
        let json = ThemePreference::manual(ColorScheme::Dark).to_json().unwrap();
        assert_eq!(json, r#"{"colorScheme":"dark","isSystemTheme":false}"#);
    }

    #[test]
    fn parses_stored_record() {
        let pref =
            ThemePreference::from_json(r#"{"isSystemTheme":true,"colorScheme":"light"}"#).unwrap();
        assert_eq!(pref, ThemePreference::system(ColorScheme::Light));
    }

    #[test]
    fn rejects_unknown_scheme_and_missing_fields() {
        assert!(ThemePreference::from_json(r#"{"colorScheme":"sepia","isSystemTheme":true}"#).is_err());
        assert!(ThemePreference::from_json(r#"{"colorScheme":"dark"}"#).is_err());
        assert!(ThemePreference::from_json("not json").is_err());
    }

    #[test]
    fn default_follows_system_in_light() {
        assert_eq!(ThemePreference::default(), ThemePreference::system(ColorScheme::Light));
    }
}
