//! Theme context: derive the theme from the store and fan it out
//!
//! [`ThemeProvider`] subscribes to a [`ThemePreferenceStore`] and, on every
//! change, hands each consumer a fresh [`ThemeContext`]. Within one change
//! every consumer sees the same value. Code running inside
//! [`ThemeProvider::provide`] can also pull the context with [`use_theme`].
//!
//! ```rust,ignore
//! let provider = ThemeProvider::new(store);
//! provider.mount().await;
//!
//! provider.provide(|| {
//!     let ctx = use_theme();
//!     let bg = ctx.theme.colors.background;
//! });
//! ```

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, RwLock};

use slotmap::{new_key_type, SlotMap};

use crate::error::ThemeError;
use crate::preference::ThemePreference;
use crate::store::{SubscriptionId, ThemePreferenceStore};
use crate::theme::{ColorScheme, Theme};

thread_local! {
    /// Providers in scope on this thread, innermost last
    static PROVIDERS: RefCell<Vec<Arc<ThemePreferenceStore>>> = const { RefCell::new(Vec::new()) };
}

new_key_type! {
    /// Handle returned by [`ThemeProvider::consume`]
    pub struct ConsumerId;
}

type Consumer = Arc<dyn Fn(&ThemeContext) + Send + Sync>;

/// What the presentation tree sees
///
/// `theme` is always one of the two canonical statics. The mutators forward
/// straight to the store.
#[derive(Clone)]
pub struct ThemeContext {
    pub theme: &'static Theme,
    pub color_scheme: ColorScheme,
    pub is_system_theme: bool,
    store: Arc<ThemePreferenceStore>,
}

impl ThemeContext {
    fn derive(store: Arc<ThemePreferenceStore>, preference: ThemePreference) -> Self {
        Self {
            theme: Theme::for_scheme(preference.color_scheme),
            color_scheme: preference.color_scheme,
            is_system_theme: preference.is_system_theme,
            store,
        }
    }

    pub fn preference(&self) -> ThemePreference {
        ThemePreference {
            color_scheme: self.color_scheme,
            is_system_theme: self.is_system_theme,
        }
    }

    pub fn toggle_color_scheme(&self) -> impl Future<Output = ()> + Send + 'static {
        self.store.toggle_color_scheme()
    }

    pub fn set_color_scheme(&self, scheme: ColorScheme) -> impl Future<Output = ()> + Send + 'static {
        self.store.set_color_scheme(scheme)
    }

    pub fn set_is_system_theme(&self, value: bool) -> impl Future<Output = ()> + Send + 'static {
        self.store.set_is_system_theme(value)
    }
}

impl PartialEq for ThemeContext {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.theme, other.theme)
            && self.color_scheme == other.color_scheme
            && self.is_system_theme == other.is_system_theme
            && Arc::ptr_eq(&self.store, &other.store)
    }
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext")
            .field("color_scheme", &self.color_scheme)
            .field("is_system_theme", &self.is_system_theme)
            .finish_non_exhaustive()
    }
}

/// Binds a store to the presentation tree
pub struct ThemeProvider {
    store: Arc<ThemePreferenceStore>,
    consumers: Arc<RwLock<SlotMap<ConsumerId, Consumer>>>,
    subscription: SubscriptionId,
}

impl ThemeProvider {
    pub fn new(store: Arc<ThemePreferenceStore>) -> Self {
        let consumers: Arc<RwLock<SlotMap<ConsumerId, Consumer>>> =
            Arc::new(RwLock::new(SlotMap::with_key()));

        let fan_out = Arc::clone(&consumers);
        let weak_store = Arc::downgrade(&store);
        let subscription = store.subscribe(move |preference| {
            let Some(store) = weak_store.upgrade() else {
                return;
            };
            let context = ThemeContext::derive(store, preference);
            let consumers: Vec<Consumer> = fan_out
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .values()
                .cloned()
                .collect();
            for consumer in consumers {
                consumer(&context);
            }
        });

        Self {
            store,
            consumers,
            subscription,
        }
    }

    /// Provider over the global store
    ///
    /// # Panics
    ///
    /// Panics if [`ThemePreferenceStore::init`] has not been called.
    pub fn global() -> Self {
        Self::new(Arc::clone(ThemePreferenceStore::get()))
    }

    /// Load the persisted preference into the store
    pub async fn mount(&self) {
        self.store.initialize().await;
    }

    pub fn store(&self) -> &Arc<ThemePreferenceStore> {
        &self.store
    }

    /// Current context value
    pub fn context(&self) -> ThemeContext {
        ThemeContext::derive(Arc::clone(&self.store), self.store.preference())
    }

    /// Receive a new context on every store change
    pub fn consume<F>(&self, consumer: F) -> ConsumerId
    where
        F: Fn(&ThemeContext) + Send + Sync + 'static,
    {
        self.consumers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(Arc::new(consumer))
    }

    pub fn stop_consuming(&self, id: ConsumerId) -> bool {
        self.consumers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .is_some()
    }

    /// Run `f` with this provider in scope for [`use_theme`]
    pub fn provide<R>(&self, f: impl FnOnce() -> R) -> R {
        struct ScopeGuard;

        impl Drop for ScopeGuard {
            fn drop(&mut self) {
                PROVIDERS.with(|stack| {
                    stack.borrow_mut().pop();
                });
            }
        }

        PROVIDERS.with(|stack| stack.borrow_mut().push(Arc::clone(&self.store)));
        let _guard = ScopeGuard;
        f()
    }
}

impl Drop for ThemeProvider {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

impl fmt::Debug for ThemeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeProvider")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

/// Context of the innermost provider in scope
///
/// # Panics
///
/// Panics when called outside [`ThemeProvider::provide`]; that is a wiring
/// bug, not a runtime condition.
pub fn use_theme() -> ThemeContext {
    match try_use_theme() {
        Ok(context) => context,
        Err(e) => panic!("{}", e),
    }
}

/// Like [`use_theme`], but reports a missing provider as an error
pub fn try_use_theme() -> Result<ThemeContext, ThemeError> {
    let store = PROVIDERS
        .with(|stack| stack.borrow().last().cloned())
        .ok_or(ThemeError::OutsideProvider)?;
    let preference = store.preference();
    Ok(ThemeContext::derive(store, preference))
}
