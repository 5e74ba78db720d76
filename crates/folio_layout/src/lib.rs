//! Folio Layout
//!
//! Page geometry and the scroll-driven view state built on top of it.
//!
//! # Features
//!
//! - **Page layout**: section rects computed with taffy from content metrics
//! - **Scrollspy**: active section and scrolled flag from scroll samples
//! - **Visibility**: one-shot seen flags with signed viewport margins
//! - **Reveal groups**: staggered entrance tweens gated on visibility
//! - **Scrub effects**: pure scroll-offset to property mappings
//! - **Pinned gallery**: horizontal card row translated while pinned
//!
//! # Example
//!
//! ```rust
//! use folio_layout::{NavigationController, PageLayout, PageMetrics, SectionId, Viewport};
//!
//! let viewport = Viewport::new(1280.0, 720.0);
//! let layout = PageLayout::compute(viewport, &PageMetrics::default()).unwrap();
//!
//! let mut nav = NavigationController::new();
//! let about_top = layout.section_top(SectionId::About).unwrap();
//! assert_eq!(nav.on_scroll(&layout, about_top), SectionId::About);
//! assert!(nav.is_scrolled());
//! ```

pub mod error;
pub mod gallery;
pub mod motion;
pub mod navigation;
pub mod page;
pub mod scroll;
pub mod scrub;
pub mod section;
pub mod toggle;
pub mod tree;
pub mod viewport;
pub mod visibility;

pub use error::{LayoutError, Result};
pub use gallery::{card_width, track_width, PinnedGallery};
pub use motion::{RevealGroup, StaggerConfig, StaggerDirection};
pub use navigation::{NavItem, NavigationController, PROBE_LINE, SCROLLED_THRESHOLD};
pub use page::{PageLayout, PageMetrics, ProjectsMetrics};
pub use scroll::SmoothScroll;
pub use scrub::{ScrubEffect, ScrubProperty, ScrubSource};
pub use section::{SectionId, Target, UnknownSection};
pub use toggle::ToggledReveal;
pub use tree::{LayoutNodeId, LayoutTree};
pub use viewport::{Viewport, MD_BREAKPOINT};
pub use visibility::{RootMargin, Visibility, VisibilityTracker};
