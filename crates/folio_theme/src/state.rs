//! Theme state cell
//!
//! ThemeState owns the current color scheme. Declarative views read it on
//! every render; imperative consumers (the hero scene material) register a
//! subscriber instead and are called on every change. Persistence is
//! best-effort: a failed write is logged and the new scheme still applies
//! for the rest of the session.

use crate::palette::Palette;
use crate::scheme::ColorScheme;
use crate::store::KeyValueStore;
use slotmap::{new_key_type, SlotMap};
use std::sync::Arc;

/// Storage key for the persisted scheme
pub const THEME_STORAGE_KEY: &str = "theme";

/// Class applied to the document root while dark mode is active
pub const DARK_CLASS: &str = "dark";

new_key_type! {
    /// Handle returned by [`ThemeState::subscribe`]
    pub struct SubscriptionId;
}

type Subscriber = Box<dyn FnMut(ColorScheme)>;

/// Single-owner theme cell with subscribe/notify
pub struct ThemeState {
    scheme: ColorScheme,
    store: Arc<dyn KeyValueStore>,
    subscribers: SlotMap<SubscriptionId, Subscriber>,
}

impl ThemeState {
    /// Load the persisted scheme, falling back to dark when the key is
    /// missing, unreadable or holds an unknown value.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let scheme = match store.get(THEME_STORAGE_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                tracing::debug!("ThemeState::load - ignoring stored value: {}", e);
                ColorScheme::default()
            }),
            Ok(None) => ColorScheme::default(),
            Err(e) => {
                tracing::debug!("ThemeState::load - storage unavailable: {}", e);
                ColorScheme::default()
            }
        };

        let state = Self {
            scheme,
            store,
            subscribers: SlotMap::with_key(),
        };
        // Normalize whatever was stored to the scheme actually applied
        state.persist();
        state
    }

    /// Current scheme
    pub fn get(&self) -> ColorScheme {
        self.scheme
    }

    /// Flip the scheme, persist it and notify subscribers. Returns the new scheme.
    pub fn toggle(&mut self) -> ColorScheme {
        let next = self.scheme.toggle();
        self.set(next);
        next
    }

    /// Set the scheme. Returns true if it changed.
    pub fn set(&mut self, scheme: ColorScheme) -> bool {
        if self.scheme == scheme {
            return false;
        }
        tracing::debug!(
            "ThemeState::set - switching from {:?} to {:?}",
            self.scheme,
            scheme
        );
        self.scheme = scheme;
        self.persist();
        for subscriber in self.subscribers.values_mut() {
            subscriber(scheme);
        }
        true
    }

    fn persist(&self) {
        if let Err(e) = self.store.set(THEME_STORAGE_KEY, self.scheme.as_str()) {
            tracing::debug!("ThemeState - theme not persisted: {}", e);
        }
    }

    /// Register a change observer. It is not called for the current value.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(ColorScheme) + 'static,
    {
        self.subscribers.insert(Box::new(callback))
    }

    /// Remove an observer. Returns false if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Global style-scope marker for the document root
    pub fn root_class(&self) -> Option<&'static str> {
        self.scheme.is_dark().then_some(DARK_CLASS)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_scheme(self.scheme)
    }

    /// Storage handle, for reloading against the same persisted state
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("scheme", &self.scheme)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
