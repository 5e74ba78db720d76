//! Folio Application
//!
//! The portfolio page as a headless engine: site content, the page
//! orchestrator, the contact relay and the views that render a frame.
//!
//! # Example
//!
//! ```rust
//! use folio_app::{Content, Portfolio};
//! use folio_core::Event;
//! use folio_layout::{SectionId, Viewport};
//! use folio_theme::MemoryStore;
//! use std::sync::Arc;
//!
//! let mut page = Portfolio::new(
//!     Content::embedded().unwrap(),
//!     Arc::new(MemoryStore::new()),
//!     Viewport::new(1280.0, 720.0),
//! )
//! .unwrap();
//!
//! let about_top = page.layout().section_top(SectionId::About).unwrap();
//! page.dispatch(&Event::scroll(about_top, 0));
//! assert_eq!(page.snapshot().active, SectionId::About);
//! ```

pub mod app;
pub mod clipboard;
pub mod contact;
pub mod content;
pub mod error;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod hero;
pub mod relay;
pub mod view;

pub use app::{AppTimer, FrameSnapshot, Portfolio};
pub use clipboard::{Clipboard, ClipboardError, CopyControl, MemoryClipboard, SystemClipboard};
pub use contact::{ContactError, ContactForm, Field, SubmissionStatus};
pub use content::{Content, ContentError};
pub use error::{FolioError, Result};
pub use headless_report::{HeadlessReport, ReportStatus};
pub use headless_runner::{run_loaded_scenario, run_scenario, RunOutcome};
pub use headless_runtime::HeadlessRunConfig;
pub use headless_scenario::{HeadlessScenario, ScenarioStep};
pub use hero::{HeroScene, SceneMaterial};
pub use relay::{EmailJsRelay, EmailMessage, EmailRelay, MemoryRelay, RelayConfig, RelayError};
