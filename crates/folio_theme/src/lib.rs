//! Folio Theme System
//!
//! Light/dark theming for the page.
//!
//! # Overview
//!
//! - **Color schemes**: [`ColorScheme`] with dark as the first-visit default
//! - **Palettes**: per-scheme color tokens exported as CSS variables
//! - **Persistence**: a small [`KeyValueStore`] abstraction standing in for
//!   browser local storage
//! - **Theme state**: [`ThemeState`], a single-owner cell that persists every
//!   change and notifies subscribers that cannot re-render declaratively
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use folio_theme::{ColorScheme, MemoryStore, ThemeState};
//!
//! let store = Arc::new(MemoryStore::new());
//! let mut theme = ThemeState::load(store.clone());
//! assert_eq!(theme.get(), ColorScheme::Dark);
//!
//! theme.toggle();
//!
//! // A reload against the same storage sees the persisted value
//! let reloaded = ThemeState::load(store);
//! assert_eq!(reloaded.get(), ColorScheme::Light);
//! ```

pub mod color;
pub mod palette;
pub mod scheme;
pub mod state;
pub mod store;

pub use color::Color;
pub use palette::{ColorToken, Palette};
pub use scheme::ColorScheme;
pub use state::{SubscriptionId, ThemeState, THEME_STORAGE_KEY};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, ReadOnlyStore, StoreError};
