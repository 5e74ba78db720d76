//! Page geometry
//!
//! `PageLayout` holds the document-space rect of every observable region.
//! It is either computed from content metrics with a flex column (the same
//! box model the page's stylesheet describes) or assembled from explicit
//! boxes for tests and scenarios.

use crate::error::{LayoutError, Result};
use crate::gallery::{card_width, track_width};
use crate::section::{SectionId, Target};
use crate::tree::{LayoutNodeId, LayoutTree};
use crate::viewport::Viewport;
use folio_core::Rect;
use rustc_hash::FxHashMap;
use taffy as tf;
use taffy::prelude::{length, percent, zero};

/// Vertical padding of full-height content sections
pub const SECTION_PADDING_Y: f32 = 128.0;
/// Horizontal page gutter
pub const PAGE_PADDING_X: f32 = 24.0;
/// Space between the projects heading and the card row
pub const HEADING_GAP: f32 = 48.0;
/// Vertical padding inside the card row
pub const TRACK_PADDING_Y: f32 = 48.0;
/// Space above the "scroll horizontally" caption
pub const CAPTION_GAP: f32 = 48.0;
/// Vertical padding of the footer
pub const FOOTER_PADDING_Y: f32 = 48.0;

/// Measured size of the projects section
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectsMetrics {
    pub card_count: usize,
    pub heading_height: f32,
    pub card_height: f32,
    pub caption_height: f32,
}

impl Default for ProjectsMetrics {
    fn default() -> Self {
        Self {
            card_count: 5,
            heading_height: 96.0,
            card_height: 500.0,
            caption_height: 28.0,
        }
    }
}

/// Content heights the layout is computed from.
///
/// Heights are for the desktop layout and exclude section padding; below the
/// `md` breakpoint stacked content is stretched by `narrow_stretch`.
#[derive(Clone, Debug, PartialEq)]
pub struct PageMetrics {
    pub about: f32,
    pub skills: f32,
    pub experience: f32,
    pub education: f32,
    pub contact: f32,
    pub footer: f32,
    pub projects: ProjectsMetrics,
    pub narrow_stretch: f32,
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self {
            about: 900.0,
            skills: 1300.0,
            experience: 1700.0,
            education: 1200.0,
            contact: 900.0,
            footer: 110.0,
            projects: ProjectsMetrics::default(),
            narrow_stretch: 1.5,
        }
    }
}

impl PageMetrics {
    fn content_height(&self, id: SectionId, viewport: Viewport) -> f32 {
        let base = match id {
            SectionId::About => self.about,
            SectionId::Skills => self.skills,
            SectionId::Experience => self.experience,
            SectionId::Education => self.education,
            SectionId::Contact => self.contact,
            SectionId::Home | SectionId::Projects => 0.0,
        };
        if viewport.is_md() {
            base
        } else {
            base * self.narrow_stretch
        }
    }
}

/// Document-space rects of every observable region
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageLayout {
    rects: FxHashMap<Target, Rect>,
    document_height: f32,
}

impl PageLayout {
    /// Assemble a layout from explicit boxes. The document height is the
    /// lowest box bottom.
    pub fn from_boxes(boxes: impl IntoIterator<Item = (Target, Rect)>) -> Self {
        let rects: FxHashMap<Target, Rect> = boxes.into_iter().collect();
        let document_height = rects.values().map(Rect::bottom).fold(0.0, f32::max);
        Self {
            rects,
            document_height,
        }
    }

    /// Lay the page out for a viewport
    pub fn compute(viewport: Viewport, metrics: &PageMetrics) -> Result<Self> {
        if !viewport.is_valid() {
            return Err(LayoutError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let mut tree = LayoutTree::new();
        let root = tree.create_node(tf::Style {
            flex_direction: tf::FlexDirection::Column,
            size: tf::Size {
                width: length(viewport.width),
                height: tf::Dimension::Auto,
            },
            ..Default::default()
        })?;

        let mut nodes: Vec<(Target, LayoutNodeId)> = Vec::new();
        for id in SectionId::ALL {
            let node = match id {
                SectionId::Home => tree.create_node(section_style(
                    0.0,
                    Some(viewport.height),
                    None,
                ))?,
                SectionId::Projects => {
                    let (section, heading, track) =
                        projects_nodes(&mut tree, viewport, &metrics.projects)?;
                    nodes.push((Target::ProjectsHeading, heading));
                    nodes.push((Target::ProjectsTrack, track));
                    section
                }
                _ => {
                    let section = tree.create_node(section_style(
                        SECTION_PADDING_Y,
                        None,
                        Some(viewport.height),
                    ))?;
                    let content =
                        tree.create_node(fixed_height(metrics.content_height(id, viewport)))?;
                    tree.add_child(section, content)?;
                    section
                }
            };
            tree.add_child(root, node)?;
            nodes.push((Target::Section(id), node));
        }

        let footer = tree.create_node(section_style(FOOTER_PADDING_Y, None, None))?;
        let footer_content = tree.create_node(fixed_height(metrics.footer))?;
        tree.add_child(footer, footer_content)?;
        tree.add_child(root, footer)?;
        nodes.push((Target::Footer, footer));

        tree.compute_layout(root, viewport.width)?;

        let mut rects = FxHashMap::default();
        for (target, node) in nodes {
            let rect = tree
                .absolute_rect(node)
                .ok_or(LayoutError::MissingTarget(target))?;
            rects.insert(target, rect);
        }
        let document_height = tree
            .get_layout(root)
            .map(|layout| layout.size.height)
            .unwrap_or_default();

        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            document_height,
            "page layout computed"
        );

        Ok(Self {
            rects,
            document_height,
        })
    }

    pub fn document_height(&self) -> f32 {
        self.document_height
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self, viewport: Viewport) -> f32 {
        (self.document_height - viewport.height).max(0.0)
    }

    pub fn contains(&self, target: impl Into<Target>) -> bool {
        self.rects.contains_key(&target.into())
    }

    /// Rect in document space
    pub fn document_rect(&self, target: impl Into<Target>) -> Option<Rect> {
        self.rects.get(&target.into()).copied()
    }

    /// Rect relative to the viewport at the given scroll offset
    pub fn bounding_rect(&self, target: impl Into<Target>, scroll_y: f32) -> Option<Rect> {
        self.document_rect(target)
            .map(|rect| rect.translate(0.0, -scroll_y))
    }

    /// Document offset of a section's top edge
    pub fn section_top(&self, id: SectionId) -> Option<f32> {
        self.document_rect(id).map(|rect| rect.top())
    }

    /// Copy of the layout with a section (and the regions inside it) unmounted
    pub fn without(&self, id: SectionId) -> Self {
        let mut rects = self.rects.clone();
        rects.remove(&Target::Section(id));
        if id == SectionId::Projects {
            rects.remove(&Target::ProjectsHeading);
            rects.remove(&Target::ProjectsTrack);
        }
        Self {
            rects,
            document_height: self.document_height,
        }
    }
}

fn fixed_height(height: f32) -> tf::Style {
    tf::Style {
        size: tf::Size {
            width: percent(1.0),
            height: length(height.max(0.0)),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

fn section_style(padding_y: f32, height: Option<f32>, min_height: Option<f32>) -> tf::Style {
    tf::Style {
        flex_direction: tf::FlexDirection::Column,
        flex_shrink: 0.0,
        size: tf::Size {
            width: percent(1.0),
            height: height.map_or(tf::Dimension::Auto, tf::Dimension::Length),
        },
        min_size: tf::Size {
            width: tf::Dimension::Auto,
            height: min_height.map_or(tf::Dimension::Auto, tf::Dimension::Length),
        },
        padding: tf::Rect {
            left: length(PAGE_PADDING_X),
            right: length(PAGE_PADDING_X),
            top: length(padding_y),
            bottom: length(padding_y),
        },
        ..Default::default()
    }
}

/// Projects section: heading, pinned card row wrapped in its pin spacer, caption
fn projects_nodes(
    tree: &mut LayoutTree,
    viewport: Viewport,
    metrics: &ProjectsMetrics,
) -> Result<(LayoutNodeId, LayoutNodeId, LayoutNodeId)> {
    let section = tree.create_node(section_style(SECTION_PADDING_Y, None, None))?;

    let heading = tree.create_node(fixed_height(metrics.heading_height))?;
    let heading_gap = tree.create_node(fixed_height(HEADING_GAP))?;

    // The pin holds the row in place for twice its width of scrolling; the
    // spacer reserves that distance in the document.
    let pin_distance = 2.0 * track_width(viewport);
    let spacer = tree.create_node(tf::Style {
        flex_direction: tf::FlexDirection::Column,
        flex_shrink: 0.0,
        padding: tf::Rect {
            left: zero(),
            right: zero(),
            top: zero(),
            bottom: length(pin_distance),
        },
        ..Default::default()
    })?;
    let track = tree.create_node(fixed_height(metrics.card_height + 2.0 * TRACK_PADDING_Y))?;
    tree.add_child(spacer, track)?;

    let caption = tree.create_node(fixed_height(CAPTION_GAP + metrics.caption_height))?;

    for child in [heading, heading_gap, spacer, caption] {
        tree.add_child(section, child)?;
    }

    tracing::trace!(
        card_width = card_width(viewport),
        pin_distance,
        "projects section sized"
    );

    Ok((section, heading, track))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_stack_in_declared_order() {
        let viewport = Viewport::default();
        let layout = PageLayout::compute(viewport, &PageMetrics::default()).unwrap();

        let mut previous_bottom = 0.0;
        for id in SectionId::ALL {
            let rect = layout.document_rect(id).unwrap();
            assert!((rect.top() - previous_bottom).abs() < 0.5, "{id} starts at {}", rect.top());
            previous_bottom = rect.bottom();
        }
        let footer = layout.document_rect(Target::Footer).unwrap();
        assert!((footer.bottom() - layout.document_height()).abs() < 0.5);
    }

    #[test]
    fn test_home_is_one_screen_tall() {
        let viewport = Viewport::new(1280.0, 720.0);
        let layout = PageLayout::compute(viewport, &PageMetrics::default()).unwrap();
        assert_eq!(layout.document_rect(SectionId::Home), Some(Rect::new(0.0, 0.0, 1280.0, 720.0)));
    }

    #[test]
    fn test_short_sections_fill_the_viewport() {
        let viewport = Viewport::new(1280.0, 2000.0);
        let metrics = PageMetrics {
            contact: 100.0,
            ..PageMetrics::default()
        };
        let layout = PageLayout::compute(viewport, &metrics).unwrap();
        let contact = layout.document_rect(SectionId::Contact).unwrap();
        assert!((contact.height() - 2000.0).abs() < 0.5);
    }

    #[test]
    fn test_projects_reserve_pin_distance() {
        let viewport = Viewport::new(1280.0, 720.0);
        let metrics = PageMetrics::default();
        let layout = PageLayout::compute(viewport, &metrics).unwrap();

        let section = layout.document_rect(SectionId::Projects).unwrap();
        let heading = layout.document_rect(Target::ProjectsHeading).unwrap();
        let track = layout.document_rect(Target::ProjectsTrack).unwrap();

        assert!((heading.top() - (section.top() + SECTION_PADDING_Y)).abs() < 0.5);
        assert!((track.top() - (heading.bottom() + HEADING_GAP)).abs() < 0.5);

        let expected = SECTION_PADDING_Y * 2.0
            + metrics.projects.heading_height
            + HEADING_GAP
            + metrics.projects.card_height
            + 2.0 * TRACK_PADDING_Y
            + 2.0 * track_width(viewport)
            + CAPTION_GAP
            + metrics.projects.caption_height;
        assert!((section.height() - expected).abs() < 0.5);
    }

    #[test]
    fn test_bounding_rect_is_viewport_relative() {
        let layout = PageLayout::from_boxes([
            (Target::Section(SectionId::Home), Rect::new(0.0, 0.0, 800.0, 600.0)),
            (Target::Section(SectionId::About), Rect::new(0.0, 600.0, 800.0, 900.0)),
        ]);
        assert_eq!(layout.document_height(), 1500.0);
        assert_eq!(
            layout.bounding_rect(SectionId::About, 550.0),
            Some(Rect::new(0.0, 50.0, 800.0, 900.0))
        );
        assert_eq!(layout.max_scroll(Viewport::new(800.0, 600.0)), 900.0);
    }

    #[test]
    fn test_without_unmounts_section() {
        let layout = PageLayout::compute(Viewport::default(), &PageMetrics::default()).unwrap();
        let trimmed = layout.without(SectionId::Projects);
        assert!(!trimmed.contains(SectionId::Projects));
        assert!(!trimmed.contains(Target::ProjectsTrack));
        assert!(trimmed.contains(SectionId::Skills));
    }

    #[test]
    fn test_invalid_viewport_is_rejected() {
        let err = PageLayout::compute(Viewport::new(0.0, 720.0), &PageMetrics::default());
        assert!(matches!(err, Err(LayoutError::InvalidViewport { .. })));
    }
}
