//! Theme preference store
//!
//! Single source of truth for the color scheme preference. Every mutation
//! is applied to the in-memory state synchronously, then handed back as a
//! future that performs the one durable write. What views render never
//! waits on storage.
//!
//! ```rust,ignore
//! let store = ThemePreferenceStore::init(storage, appearance);
//! store.initialize().await;
//!
//! // In-memory state is already dark when this line returns the future.
//! let persisted = store.set_color_scheme(ColorScheme::Dark);
//! persisted.await;
//! ```

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, RwLock, TryLockError};

use slotmap::{new_key_type, SlotMap};

use crate::appearance::{Appearance, AppearanceSource, ListenerId};
use crate::preference::{ThemePreference, STORAGE_KEY};
use crate::storage::PreferenceStorage;
use crate::theme::{ColorScheme, Theme};

/// Global store instance
static THEME_STORE: OnceLock<Arc<ThemePreferenceStore>> = OnceLock::new();

/// Global redraw callback - set by the app layer to trigger UI updates
static REDRAW_CALLBACK: Mutex<Option<fn()>> = Mutex::new(None);

/// Set the redraw callback function
///
/// Called after every preference change, after subscribers have run.
pub fn set_redraw_callback(callback: fn()) {
    *REDRAW_CALLBACK.lock().unwrap_or_else(|e| e.into_inner()) = Some(callback);
}

fn trigger_redraw() {
    let callback = *REDRAW_CALLBACK.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(callback) = callback {
        callback();
    }
}

new_key_type! {
    /// Handle returned by [`ThemePreferenceStore::subscribe`]
    pub struct SubscriptionId;
}

/// Called with the new preference after each change
pub type ChangeListener = Arc<dyn Fn(ThemePreference) + Send + Sync>;

/// Process-wide color scheme preference
pub struct ThemePreferenceStore {
    state: RwLock<ThemePreference>,
    storage: Arc<dyn PreferenceStorage>,
    appearance: Arc<dyn AppearanceSource>,
    listeners: RwLock<SlotMap<SubscriptionId, ChangeListener>>,
    /// Last state handed to listeners; held for the whole delivery
    delivered: Mutex<ThemePreference>,
    /// Set when the state changed and listeners have not seen it yet
    dirty: AtomicBool,
    appearance_listener: ListenerId,
}

impl ThemePreferenceStore {
    /// Create a store in the default `{light, system}` state
    ///
    /// Registers the OS appearance listener on `appearance`. The listener
    /// holds a weak reference and is removed when the store is dropped.
    pub fn new(
        storage: Arc<dyn PreferenceStorage>,
        appearance: Arc<dyn AppearanceSource>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak: &std::sync::Weak<Self>| {
            let weak = weak.clone();
            let appearance_listener = appearance.subscribe(Box::new(move |appearance| {
                if let Some(store) = weak.upgrade() {
                    store.on_appearance_changed(appearance);
                }
            }));

            Self {
                state: RwLock::new(ThemePreference::default()),
                storage,
                appearance,
                listeners: RwLock::new(SlotMap::with_key()),
                delivered: Mutex::new(ThemePreference::default()),
                dirty: AtomicBool::new(false),
                appearance_listener,
            }
        })
    }

    /// Initialize the global store (call once at app startup)
    ///
    /// The first call wins; later calls return the existing store.
    pub fn init(
        storage: Arc<dyn PreferenceStorage>,
        appearance: Arc<dyn AppearanceSource>,
    ) -> Arc<Self> {
        if let Some(existing) = THEME_STORE.get() {
            tracing::warn!("ThemePreferenceStore::init called more than once; keeping the first store");
            return Arc::clone(existing);
        }
        Arc::clone(THEME_STORE.get_or_init(|| Self::new(storage, appearance)))
    }

    /// Get the global store instance
    pub fn get() -> &'static Arc<ThemePreferenceStore> {
        THEME_STORE
            .get()
            .expect("ThemePreferenceStore not initialized. Call ThemePreferenceStore::init() at app startup.")
    }

    /// Try to get the global store (returns None if not initialized)
    pub fn try_get() -> Option<&'static Arc<ThemePreferenceStore>> {
        THEME_STORE.get()
    }

    // ========== Startup ==========

    /// Load the saved preference, or seed it from the OS on first run
    ///
    /// Never fails. An unreadable record is discarded and treated as a first
    /// run; a storage read error resets to the default `{light, system}`.
    pub async fn initialize(&self) {
        match self.storage.get(STORAGE_KEY).await {
            Ok(Some(raw)) => match ThemePreference::from_json(&raw) {
                Ok(saved) => {
                    tracing::debug!("ThemePreferenceStore::initialize - restored {:?}", saved);
                    self.update(|_| saved);
                    return;
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable theme settings: {}", e);
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to load theme settings: {}", e);
                self.update(|_| ThemePreference::default());
                return;
            }
        }

        let scheme = self.appearance.current().color_scheme();
        tracing::debug!("ThemePreferenceStore::initialize - first run, system is {}", scheme);
        self.update(|_| ThemePreference::system(scheme));
    }

    // ========== Snapshot ==========

    pub fn preference(&self) -> ThemePreference {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.preference().color_scheme
    }

    pub fn is_system_theme(&self) -> bool {
        self.preference().is_system_theme
    }

    /// Canonical theme for the current scheme
    pub fn theme(&self) -> &'static Theme {
        Theme::for_scheme(self.color_scheme())
    }

    /// Current OS appearance, as reported by the source
    pub fn system_appearance(&self) -> Appearance {
        self.appearance.current()
    }

    // ========== Mutators ==========

    /// Explicitly pick a scheme, leaving system-follow mode
    ///
    /// The in-memory state changes before this returns. The returned future
    /// performs the durable write; dropping it skips persistence.
    #[must_use = "the preference is only persisted when the returned future is awaited"]
    pub fn set_color_scheme(&self, scheme: ColorScheme) -> impl Future<Output = ()> + Send + 'static {
        let next = self.update(|_| ThemePreference::manual(scheme));
        self.persist(next)
    }

    /// Switch to the opposite scheme, leaving system-follow mode
    #[must_use = "the preference is only persisted when the returned future is awaited"]
    pub fn toggle_color_scheme(&self) -> impl Future<Output = ()> + Send + 'static {
        let next = self.update(|current| ThemePreference::manual(current.color_scheme.toggle()));
        self.persist(next)
    }

    /// Enter or leave system-follow mode
    ///
    /// Entering re-reads the OS appearance. Leaving keeps the current scheme.
    #[must_use = "the preference is only persisted when the returned future is awaited"]
    pub fn set_is_system_theme(&self, value: bool) -> impl Future<Output = ()> + Send + 'static {
        let next = if value {
            let scheme = self.appearance.current().color_scheme();
            self.update(|_| ThemePreference::system(scheme))
        } else {
            self.update(|current| ThemePreference::manual(current.color_scheme))
        };
        self.persist(next)
    }

    fn on_appearance_changed(&self, appearance: Appearance) {
        let scheme = appearance.color_scheme();
        self.update(|current| {
            if current.is_system_theme {
                ThemePreference::system(scheme)
            } else {
                tracing::trace!("ignoring OS appearance {} (user override active)", appearance);
                current
            }
        });
    }

    // ========== Subscriptions ==========

    /// Register a change listener
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(ThemePreference) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(Arc::new(listener))
    }

    /// Remove a change listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .is_some()
    }

    // ========== Internals ==========

    /// Replace the state and notify on change. Returns the new state.
    fn update(&self, f: impl FnOnce(ThemePreference) -> ThemePreference) -> ThemePreference {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let previous = *state;
        let next = f(previous);
        *state = next;
        if next != previous {
            self.dirty.store(true, Ordering::SeqCst);
        }
        drop(state);

        if next != previous {
            tracing::debug!(
                "ThemePreferenceStore - {:?} -> {:?}",
                previous,
                next
            );
            self.notify();
        }
        next
    }

    /// Deliver the current state until listeners have caught up
    ///
    /// One thread delivers at a time and always reads the latest state, so
    /// the last value every listener sees is the store's state. A change
    /// made while another delivery is running (on another thread, or
    /// re-entrantly from a listener) is picked up by that delivery.
    fn notify(&self) {
        loop {
            let mut delivered = match self.delivered.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(e)) => e.into_inner(),
                Err(TryLockError::WouldBlock) => return,
            };

            while self.dirty.swap(false, Ordering::SeqCst) {
                let current = self.preference();
                if current == *delivered {
                    continue;
                }
                *delivered = current;

                // Snapshot so listeners may subscribe/unsubscribe re-entrantly.
                let listeners: Vec<ChangeListener> = self
                    .listeners
                    .read()
                    .unwrap_or_else(|e| e.into_inner())
                    .values()
                    .cloned()
                    .collect();
                for listener in listeners {
                    listener(current);
                }
                trigger_redraw();
            }
            drop(delivered);

            // A change may have landed between the last check and the unlock.
            if !self.dirty.load(Ordering::SeqCst) {
                return;
            }
        }
    }

    /// Single write attempt; failures are logged and swallowed
    fn persist(&self, preference: ThemePreference) -> impl Future<Output = ()> + Send + 'static {
        let storage = Arc::clone(&self.storage);
        let payload = preference.to_json();
        async move {
            let payload = match payload {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!("Failed to serialize theme settings: {}", e);
                    return;
                }
            };
            if let Err(e) = storage.set(STORAGE_KEY, payload).await {
                tracing::warn!("Failed to save theme settings: {}", e);
            }
        }
    }
}

impl Drop for ThemePreferenceStore {
    fn drop(&mut self) {
        self.appearance.unsubscribe(self.appearance_listener);
    }
}

impl fmt::Debug for ThemePreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemePreferenceStore")
            .field("state", &self.preference())
            .field(
                "listeners",
                &self.listeners.read().unwrap_or_else(|e| e.into_inner()).len(),
            )
            .finish()
    }
}
