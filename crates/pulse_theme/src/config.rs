//! Theme configuration file handling (`pulse.toml`)
//!
//! ```toml
//! [storage]
//! dir = "/home/me/.config/pulse"
//!
//! [appearance]
//! mode = "system"         # or "light", "dark", "no-preference"
//! watch = true
//! poll_interval_ms = 2000
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::appearance::{Appearance, AppearanceSource, ManualAppearance, SystemAppearance};
use crate::error::{Result, StorageError, ThemeError};
use crate::storage::FileStorage;
use crate::watcher::WatcherConfig;

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub appearance: AppearanceConfig,
}

/// Where the preference is persisted
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Storage directory; defaults to the platform config dir
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// How the OS appearance is obtained
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppearanceMode {
    /// Probe the operating system
    #[default]
    System,
    /// Pretend the OS always reports this value
    Light,
    Dark,
    NoPreference,
}

impl AppearanceMode {
    /// Fixed value for the non-probing modes
    pub fn fixed(self) -> Option<Appearance> {
        match self {
            AppearanceMode::System => None,
            AppearanceMode::Light => Some(Appearance::Light),
            AppearanceMode::Dark => Some(Appearance::Dark),
            AppearanceMode::NoPreference => Some(Appearance::NoPreference),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppearanceConfig {
    #[serde(default)]
    pub mode: AppearanceMode,
    /// Poll the OS for appearance changes
    #[serde(default = "default_true")]
    pub watch: bool,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    2000
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            mode: AppearanceMode::default(),
            watch: true,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl AppearanceConfig {
    pub fn watcher_config(&self) -> WatcherConfig {
        WatcherConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
        }
    }
}

/// Appearance source selected by the config
pub enum ConfiguredAppearance {
    System(Arc<SystemAppearance>),
    Fixed(Arc<ManualAppearance>),
}

impl ConfiguredAppearance {
    pub fn source(&self) -> Arc<dyn AppearanceSource> {
        match self {
            ConfiguredAppearance::System(source) => Arc::clone(source) as Arc<dyn AppearanceSource>,
            ConfiguredAppearance::Fixed(source) => Arc::clone(source) as Arc<dyn AppearanceSource>,
        }
    }
}

impl ThemeConfig {
    pub const FILE_NAME: &'static str = "pulse.toml";

    /// Load from a file, or from `pulse.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(Self::FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|source| ThemeError::ConfigRead {
            path: config_path.clone(),
            source,
        })?;

        Self::from_toml(&content).map_err(|source| ThemeError::ConfigParse {
            path: config_path,
            source,
        })
    }

    /// Load `path` if given, else the default location if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                tracing::debug!("no {} found, using defaults", Self::FILE_NAME);
                Ok(Self::default())
            }
        }
    }

    /// `pulse.toml` under the platform config dir
    pub fn default_path() -> Option<PathBuf> {
        FileStorage::default_dir().map(|dir| dir.join(Self::FILE_NAME))
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Storage backend for this config
    pub fn storage(&self) -> std::result::Result<FileStorage, StorageError> {
        match &self.storage.dir {
            Some(dir) => Ok(FileStorage::new(dir)),
            None => FileStorage::in_config_dir(),
        }
    }

    /// Appearance source for this config
    pub fn appearance_source(&self) -> ConfiguredAppearance {
        match self.appearance.mode.fixed() {
            Some(appearance) => ConfiguredAppearance::Fixed(Arc::new(ManualAppearance::new(appearance))),
            None => ConfiguredAppearance::System(Arc::new(SystemAppearance::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = ThemeConfig::from_toml("").unwrap();
        assert_eq!(config, ThemeConfig::default());
        assert_eq!(config.appearance.mode, AppearanceMode::System);
        assert!(config.appearance.watch);
        assert_eq!(
            config.appearance.watcher_config().poll_interval,
            Duration::from_secs(2)
        );
    }

    #[test]
    fn parses_all_sections() {
        let config = ThemeConfig::from_toml(
            r#"
            [storage]
            dir = "/var/lib/pulse"

            [appearance]
            mode = "no-preference"
            watch = false
            poll_interval_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.dir, Some(PathBuf::from("/var/lib/pulse")));
        assert_eq!(config.appearance.mode.fixed(), Some(Appearance::NoPreference));
        assert!(!config.appearance.watch);
        assert_eq!(config.appearance.poll_interval_ms, 250);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ThemeConfig::from_toml("[appearance]\ntheme = \"dark\"").is_err());
    }

    #[test]
    fn fixed_mode_uses_manual_source() {
        let config = ThemeConfig {
            appearance: AppearanceConfig {
                mode: AppearanceMode::Dark,
                ..AppearanceConfig::default()
            },
            ..ThemeConfig::default()
        };
        let source = config.appearance_source();
        assert!(matches!(source, ConfiguredAppearance::Fixed(_)));
        assert_eq!(source.source().current(), Appearance::Dark);
    }

    #[test]
    fn load_reports_missing_file_and_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ThemeConfig::load(&dir.path().join("absent.toml")),
            Err(ThemeError::ConfigRead { .. })
        ));

        std::fs::write(dir.path().join(ThemeConfig::FILE_NAME), "[storage\n").unwrap();
        assert!(matches!(
            ThemeConfig::load(dir.path()),
            Err(ThemeError::ConfigParse { .. })
        ));
    }

    #[test]
    fn toml_round_trip() {
        let config = ThemeConfig {
            storage: StorageConfig {
                dir: Some(PathBuf::from("/tmp/pulse")),
            },
            appearance: AppearanceConfig::default(),
        };
        let text = config.to_toml().unwrap();
        assert_eq!(ThemeConfig::from_toml(&text).unwrap(), config);
    }
}
