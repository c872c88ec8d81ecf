//! OS appearance sources
//!
//! The store never talks to the operating system directly. It reads the
//! current appearance and subscribes to changes through [`AppearanceSource`]:
//!
//! - [`ManualAppearance`]: the host pushes values in (native event loop
//!   callbacks, tests)
//! - [`SystemAppearance`]: probes the desktop OS; pair with
//!   [`SystemSchemeWatcher`](crate::watcher::SystemSchemeWatcher) to get
//!   change events

use std::fmt;
use std::process::Command;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::error::ThemeError;
use crate::theme::ColorScheme;

/// Environment variable that pins the probed appearance
pub const APPEARANCE_ENV: &str = "PULSE_APPEARANCE";

/// Light/dark setting as reported by the OS
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Appearance {
    Light,
    Dark,
    #[default]
    NoPreference,
}

impl Appearance {
    /// Map to a color scheme: only an explicit dark report yields dark
    pub fn color_scheme(self) -> ColorScheme {
        match self {
            Appearance::Dark => ColorScheme::Dark,
            Appearance::Light | Appearance::NoPreference => ColorScheme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
            Appearance::NoPreference => "no-preference",
        }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Appearance {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Appearance::Light),
            "dark" => Ok(Appearance::Dark),
            "no-preference" | "none" | "" => Ok(Appearance::NoPreference),
            _ => Err(ThemeError::InvalidAppearance(s.to_string())),
        }
    }
}

impl From<ColorScheme> for Appearance {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Appearance::Light,
            ColorScheme::Dark => Appearance::Dark,
        }
    }
}

/// Callback invoked with the new appearance on every OS change
pub type AppearanceListener = Box<dyn Fn(Appearance) + Send + Sync>;

new_key_type! {
    /// Handle returned by [`AppearanceSource::subscribe`]
    pub struct ListenerId;
}

/// Source of the OS light/dark setting
pub trait AppearanceSource: Send + Sync {
    /// Synchronous read of the current OS setting
    fn current(&self) -> Appearance;

    /// Register a listener until [`unsubscribe`](Self::unsubscribe)
    fn subscribe(&self, listener: AppearanceListener) -> ListenerId;

    /// Remove a listener. Returns false if it was already gone.
    fn unsubscribe(&self, id: ListenerId) -> bool;
}

type SharedListener = Arc<dyn Fn(Appearance) + Send + Sync>;

#[derive(Default)]
struct ListenerRegistry {
    listeners: RwLock<SlotMap<ListenerId, SharedListener>>,
}

impl ListenerRegistry {
    fn insert(&self, listener: AppearanceListener) -> ListenerId {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(Arc::from(listener))
    }

    fn remove(&self, id: ListenerId) -> bool {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .is_some()
    }

    fn len(&self) -> usize {
        self.listeners.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Fan a value out to every registered listener
    fn notify(&self, appearance: Appearance) {
        // Snapshot so listeners may subscribe/unsubscribe re-entrantly.
        let listeners: Vec<SharedListener> = self
            .listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect();
        for listener in listeners {
            listener(appearance);
        }
    }
}

/// Appearance source driven by the host
///
/// Embedders forward their native appearance callback into [`set`](Self::set).
/// Every call is delivered to listeners, even when the value is unchanged,
/// matching how mobile platforms report appearance events.
#[derive(Default)]
pub struct ManualAppearance {
    current: RwLock<Appearance>,
    listeners: ListenerRegistry,
}

impl ManualAppearance {
    pub fn new(initial: Appearance) -> Self {
        Self {
            current: RwLock::new(initial),
            listeners: ListenerRegistry::default(),
        }
    }

    /// Record a new OS value and deliver it to listeners
    pub fn set(&self, appearance: Appearance) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = appearance;
        tracing::trace!("ManualAppearance::set - {}", appearance);
        self.listeners.notify(appearance);
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl AppearanceSource for ManualAppearance {
    fn current(&self) -> Appearance {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn subscribe(&self, listener: AppearanceListener) -> ListenerId {
        self.listeners.insert(listener)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

type Probe = Box<dyn Fn() -> Appearance + Send + Sync>;

/// Appearance source backed by the desktop OS setting
///
/// `current()` always probes. Change events are only produced by
/// [`poll`](Self::poll), which a watcher calls on an interval.
pub struct SystemAppearance {
    probe: Probe,
    last: RwLock<Appearance>,
    listeners: ListenerRegistry,
}

impl SystemAppearance {
    /// Probe the real OS setting
    pub fn new() -> Self {
        Self::with_probe(detect_system_appearance)
    }

    /// Use a custom probe (fixed values, alternative detection)
    pub fn with_probe<F>(probe: F) -> Self
    where
        F: Fn() -> Appearance + Send + Sync + 'static,
    {
        let initial = probe();
        Self {
            probe: Box::new(probe),
            last: RwLock::new(initial),
            listeners: ListenerRegistry::default(),
        }
    }

    /// Re-probe the OS, notifying listeners if the value changed
    ///
    /// Returns `true` when a change was delivered.
    pub fn poll(&self) -> bool {
        let now = (self.probe)();
        let mut last = self.last.write().unwrap_or_else(|e| e.into_inner());
        if *last == now {
            return false;
        }
        tracing::debug!("SystemAppearance::poll - {} -> {}", *last, now);
        *last = now;
        drop(last);

        self.listeners.notify(now);
        true
    }
}

impl Default for SystemAppearance {
    fn default() -> Self {
        Self::new()
    }
}

impl AppearanceSource for SystemAppearance {
    fn current(&self) -> Appearance {
        (self.probe)()
    }

    fn subscribe(&self, listener: AppearanceListener) -> ListenerId {
        self.listeners.insert(listener)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

/// Detect the OS light/dark setting
///
/// `PULSE_APPEARANCE` wins when set. Otherwise:
/// - macOS: `AppleInterfaceStyle` user default
/// - Linux: GNOME `color-scheme` setting, then the `GTK_THEME` variant
/// - Windows: `AppsUseLightTheme` registry value
///
/// Anything undetectable is reported as [`Appearance::NoPreference`].
pub fn detect_system_appearance() -> Appearance {
    if let Ok(value) = std::env::var(APPEARANCE_ENV) {
        match value.parse() {
            Ok(appearance) => return appearance,
            Err(e) => tracing::warn!("ignoring {}: {}", APPEARANCE_ENV, e),
        }
    }

    detect_platform_appearance()
}

#[cfg(target_os = "macos")]
fn detect_platform_appearance() -> Appearance {
    // The key is only present while dark mode is on.
    match command_output("defaults", &["read", "-g", "AppleInterfaceStyle"]) {
        Some(out) if out.trim().eq_ignore_ascii_case("dark") => Appearance::Dark,
        _ => Appearance::Light,
    }
}

#[cfg(target_os = "windows")]
fn detect_platform_appearance() -> Appearance {
    let out = command_output(
        "reg",
        &[
            "query",
            r"HKCU\Software\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ],
    );
    match out {
        Some(out) if out.contains("0x0") => Appearance::Dark,
        Some(out) if out.contains("0x1") => Appearance::Light,
        _ => Appearance::NoPreference,
    }
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn detect_platform_appearance() -> Appearance {
    if let Some(out) = command_output(
        "gsettings",
        &["get", "org.gnome.desktop.interface", "color-scheme"],
    ) {
        return parse_gnome_color_scheme(&out);
    }

    match std::env::var("GTK_THEME") {
        Ok(theme) if theme.to_ascii_lowercase().ends_with(":dark") => Appearance::Dark,
        _ => Appearance::NoPreference,
    }
}

/// Interpret `gsettings get org.gnome.desktop.interface color-scheme` output
#[cfg_attr(any(target_os = "macos", target_os = "windows"), allow(dead_code))]
fn parse_gnome_color_scheme(output: &str) -> Appearance {
    match output.trim().trim_matches('\'') {
        "prefer-dark" => Appearance::Dark,
        "prefer-light" => Appearance::Light,
        _ => Appearance::NoPreference,
    }
}

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn only_explicit_dark_maps_to_dark() {
        assert_eq!(Appearance::Dark.color_scheme(), ColorScheme::Dark);
        assert_eq!(Appearance::Light.color_scheme(), ColorScheme::Light);
        assert_eq!(Appearance::NoPreference.color_scheme(), ColorScheme::Light);
    }

    #[test]
    fn parses_os_strings() {
        assert_eq!("dark".parse::<Appearance>().unwrap(), Appearance::Dark);
        assert_eq!(
            "no-preference".parse::<Appearance>().unwrap(),
            Appearance::NoPreference
        );
        assert!("dim".parse::<Appearance>().is_err());
    }

    #[test]
    fn manual_source_delivers_every_event() {
        let source = ManualAppearance::new(Appearance::Light);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        source.subscribe(Box::new(move |a| sink.lock().unwrap().push(a)));

        source.set(Appearance::Dark);
        source.set(Appearance::Dark);
        source.set(Appearance::NoPreference);

        assert_eq!(source.current(), Appearance::NoPreference);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Appearance::Dark, Appearance::Dark, Appearance::NoPreference]
        );
    }

    #[test]
    fn listener_may_subscribe_and_unsubscribe_during_delivery() {
        let source = Arc::new(ManualAppearance::new(Appearance::Light));
        let late_calls = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&source);
        let counter = Arc::clone(&late_calls);
        let first = source.subscribe(Box::new(move |_| {
            let Some(source) = weak.upgrade() else {
                return;
            };
            let counter = Arc::clone(&counter);
            source.subscribe(Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }));

        source.set(Appearance::Dark);
        assert_eq!(source.listener_count(), 2);
        // Added during delivery, so it only sees later events.
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);

        assert!(source.unsubscribe(first));
        assert!(!source.unsubscribe(first));
        source.set(Appearance::Light);
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.listener_count(), 1);
    }

    #[test]
    fn system_poll_fires_only_on_change() {
        let value = Arc::new(Mutex::new(Appearance::Light));
        let probe_value = Arc::clone(&value);
        let source = SystemAppearance::with_probe(move || *probe_value.lock().unwrap());

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        source.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(!source.poll());
        *value.lock().unwrap() = Appearance::Dark;
        assert!(source.poll());
        assert!(!source.poll());
        assert_eq!(source.current(), Appearance::Dark);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn gnome_setting_parsing() {
        assert_eq!(parse_gnome_color_scheme("'prefer-dark'\n"), Appearance::Dark);
        assert_eq!(parse_gnome_color_scheme("'prefer-light'"), Appearance::Light);
        assert_eq!(parse_gnome_color_scheme("'default'"), Appearance::NoPreference);
    }
}
