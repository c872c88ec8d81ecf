//! Pulse Theme Core
//!
//! Color scheme preference, OS appearance sync, and design tokens for the
//! Pulse client.
//!
//! # Overview
//!
//! - **Design tokens**: colors, spacing, radii, shadows, typography
//! - **Two canonical themes**: [`LIGHT_THEME`] and [`DARK_THEME`]; dark only
//!   overrides the surface/text/outline colors
//! - **Preference store**: [`ThemePreferenceStore`] owns the
//!   `{color_scheme, is_system_theme}` record, persists it, and follows the
//!   OS appearance while system mode is on
//! - **Context**: [`ThemeProvider`] derives a [`ThemeContext`] on every
//!   change and fans it out to the presentation tree
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pulse_theme::{ColorScheme, FileStorage, SystemAppearance, ThemePreferenceStore, ThemeProvider};
//!
//! let store = ThemePreferenceStore::init(
//!     Arc::new(FileStorage::in_config_dir()?),
//!     Arc::new(SystemAppearance::new()),
//! );
//! let provider = ThemeProvider::new(store);
//! pollster::block_on(provider.mount());
//!
//! let ctx = provider.context();
//! let background = ctx.theme.colors.background;
//!
//! // Applied immediately; awaiting waits for the durable write.
//! pollster::block_on(ctx.set_color_scheme(ColorScheme::Dark));
//! ```
//!
//! # State machine
//!
//! | from | event | to |
//! |------|-------|----|
//! | any | `set_color_scheme(s)` | `{s, manual}` |
//! | `{s, _}` | `toggle_color_scheme()` | `{!s, manual}` |
//! | any | `set_is_system_theme(true)` | `{os, system}` |
//! | `{s, _}` | `set_is_system_theme(false)` | `{s, manual}` |
//! | `{_, system}` | OS reports `a` | `{a, system}` |
//! | `{s, manual}` | OS reports `a` | unchanged |
//!
//! Storage failures are logged and swallowed; the in-memory state is always
//! authoritative for the running process.

pub mod appearance;
pub mod config;
pub mod context;
pub mod error;
pub mod preference;
pub mod storage;
pub mod store;
pub mod theme;
pub mod themes;
pub mod tokens;
pub mod watcher;

// Re-export commonly used types
pub use appearance::{
    detect_system_appearance, Appearance, AppearanceListener, AppearanceSource, ListenerId,
    ManualAppearance, SystemAppearance,
};
pub use config::{AppearanceMode, ThemeConfig};
pub use context::{try_use_theme, use_theme, ConsumerId, ThemeContext, ThemeProvider};
pub use error::{StorageError, ThemeError};
pub use preference::{ThemePreference, STORAGE_KEY};
pub use storage::{FileStorage, MemoryStorage, PreferenceStorage};
pub use store::{set_redraw_callback, SubscriptionId, ThemePreferenceStore};
pub use theme::{ColorScheme, Theme};
pub use themes::{DARK_THEME, LIGHT_THEME};
pub use tokens::*;
pub use watcher::{SystemSchemeWatcher, WatcherConfig};
