//! The page orchestrator
//!
//! `Portfolio` owns every piece of view state and is the only thing the
//! host talks to. Events are processed one at a time, to completion. The
//! logical clock only moves forward, through event timestamps and `tick`.

use crate::clipboard::{Clipboard, CopyControl};
use crate::contact::{ContactError, ContactForm, Field, SubmissionStatus};
use crate::content::Content;
use crate::error::Result;
use crate::hero::{chevron_bob, HeroScene};
use crate::relay::EmailRelay;
use crate::view::{self, FrameStyles, ViewState};
use folio_animation::{AnimationPreset, KeyframeProperties, RevealTiming, Timeline, TimelineEntryId};
use folio_core::events::event_types;
use folio_core::{Event, EventData, Millis, TimerQueue};
use folio_layout::{
    NavigationController, PageLayout, PageMetrics, PinnedGallery, RevealGroup, RootMargin,
    ScrubEffect, SectionId, StaggerConfig, Target, ToggledReveal, Viewport, VisibilityTracker,
};
use folio_theme::{ColorScheme, KeyValueStore, ThemeState};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Timers owned by the page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppTimer {
    /// Success banner of the contact form
    ContactBanner,
    /// "Copied" label of the copy control
    CopyConfirmation,
}

/// Navigation bar drop-in plus the hero's timed entrance
struct Entrance {
    timeline: Timeline,
    nav: TimelineEntryId,
    /// Container, heading, subtitle, location, chevron
    hero: Vec<TimelineEntryId>,
}

impl Entrance {
    fn new() -> Self {
        let mut timeline = Timeline::new();
        let nav = timeline.add(0, AnimationPreset::drop_in());
        let hero = vec![
            timeline.add(200, AnimationPreset::fade_up(1000, 50.0)),
            timeline.add(500, AnimationPreset::fade_up(1000, 30.0)),
            timeline.add(800, AnimationPreset::fade_up(1000, 30.0)),
            timeline.add(1200, AnimationPreset::fade_in(1000)),
            timeline.add(1500, AnimationPreset::fade_in(1000)),
        ];
        Self { timeline, nav, hero }
    }

    fn sample(&self, id: TimelineEntryId, now: Millis) -> KeyframeProperties {
        self.timeline.sample(id, now).unwrap_or_default()
    }
}

/// Visibility-gated entrances of every section below the hero
struct Reveals {
    about: RevealGroup,
    skills_heading: RevealGroup,
    skill_categories: RevealGroup,
    skill_bars: Vec<RevealGroup>,
    projects_heading: RevealGroup,
    experience_heading: RevealGroup,
    experience: RevealGroup,
    education_heading: RevealGroup,
    education: RevealGroup,
    contact_heading: RevealGroup,
    contact_subtitle: RevealGroup,
    contact_info: RevealGroup,
    contact_form: RevealGroup,
    footer: RevealGroup,
    footer_rule: RevealGroup,
}

fn heading_group(trigger: impl Into<Target>) -> RevealGroup {
    RevealGroup::new(trigger, StaggerConfig::default()).child(AnimationPreset::fade_up(800, 30.0))
}

impl Reveals {
    fn new(content: &Content) -> Self {
        let quick = |distance| AnimationPreset::reveal(RevealTiming::Quick, distance);

        let skill_bars = content
            .skills
            .iter()
            .map(|category| {
                category.skills.iter().fold(
                    RevealGroup::new(SectionId::Skills, StaggerConfig::new(100)).initial_delay(500),
                    |group, skill| group.child(AnimationPreset::grow_width(skill.level)),
                )
            })
            .collect();

        Self {
            about: RevealGroup::new(SectionId::About, StaggerConfig::new(100))
                .children(AnimationPreset::reveal(RevealTiming::Slow, 50.0), 3),
            skills_heading: heading_group(SectionId::Skills),
            skill_categories: RevealGroup::new(SectionId::Skills, StaggerConfig::new(150))
                .children(quick(50.0), content.skills.len()),
            skill_bars,
            projects_heading: heading_group(Target::ProjectsHeading).margin(RootMargin::ZERO),
            experience_heading: heading_group(SectionId::Experience),
            experience: RevealGroup::new(SectionId::Experience, StaggerConfig::new(200))
                .children(AnimationPreset::slide_in_left(600, 50.0), content.experience.len()),
            education_heading: heading_group(SectionId::Education),
            education: RevealGroup::new(SectionId::Education, StaggerConfig::new(200))
                .children(quick(50.0), content.education_items()),
            contact_heading: heading_group(SectionId::Contact),
            contact_subtitle: RevealGroup::new(SectionId::Contact, StaggerConfig::default())
                .child(AnimationPreset::fade_in(800).delay(200)),
            contact_info: RevealGroup::new(SectionId::Contact, StaggerConfig::new(100))
                .children(quick(30.0), 2),
            contact_form: RevealGroup::new(SectionId::Contact, StaggerConfig::new(100))
                .children(quick(30.0), 4),
            footer: RevealGroup::new(Target::Footer, StaggerConfig::new(100))
                .margin(RootMargin::ZERO)
                .children(AnimationPreset::fade_up(600, 20.0), 3),
            footer_rule: RevealGroup::new(Target::Footer, StaggerConfig::default())
                .margin(RootMargin::ZERO)
                .initial_delay(300)
                .child(AnimationPreset::scale_x_in(800)),
        }
    }

    fn groups(&self) -> Vec<&RevealGroup> {
        let mut groups = vec![
            &self.about,
            &self.skills_heading,
            &self.skill_categories,
            &self.projects_heading,
            &self.experience_heading,
            &self.experience,
            &self.education_heading,
            &self.education,
            &self.contact_heading,
            &self.contact_subtitle,
            &self.contact_info,
            &self.contact_form,
            &self.footer,
            &self.footer_rule,
        ];
        groups.extend(self.skill_bars.iter());
        groups
    }

    fn groups_mut(&mut self) -> Vec<&mut RevealGroup> {
        let mut groups = vec![
            &mut self.about,
            &mut self.skills_heading,
            &mut self.skill_categories,
            &mut self.projects_heading,
            &mut self.experience_heading,
            &mut self.experience,
            &mut self.education_heading,
            &mut self.education,
            &mut self.contact_heading,
            &mut self.contact_subtitle,
            &mut self.contact_info,
            &mut self.contact_form,
            &mut self.footer,
            &mut self.footer_rule,
        ];
        groups.extend(self.skill_bars.iter_mut());
        groups
    }

    /// Start every group bound to `target`
    fn reveal(&mut self, target: Target, now: Millis) {
        for group in self.groups_mut() {
            if group.trigger() == target {
                group.reveal(now);
            }
        }
    }
}

fn samples(group: &RevealGroup, now: Millis) -> Vec<KeyframeProperties> {
    (0..group.len())
        .filter_map(|i| group.sample(i, now))
        .collect()
}

fn first(group: &RevealGroup, now: Millis) -> KeyframeProperties {
    group.sample(0, now).unwrap_or_default()
}

/// Observable state of one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub now_ms: Millis,
    pub scroll_y: f32,
    pub active: SectionId,
    pub scrolled: bool,
    pub theme: ColorScheme,
    /// Names of every region seen so far, sorted
    pub seen: Vec<String>,
    pub gallery_percent: f32,
    pub gallery_pinned: bool,
    pub hero_opacity: f32,
    pub contact_status: SubmissionStatus,
    pub success_banner: bool,
    pub copy_label: String,
}

pub struct Portfolio {
    content: Content,
    metrics: PageMetrics,
    viewport: Viewport,
    layout: PageLayout,
    scroll_y: f32,
    now: Millis,
    mounted_at: Option<Millis>,
    theme: ThemeState,
    hero: HeroScene,
    nav: NavigationController,
    visibility: VisibilityTracker,
    entrance: Entrance,
    reveals: Reveals,
    float_shapes: ToggledReveal,
    section_scrubs: Vec<(SectionId, ScrubEffect)>,
    about_drift: ScrubEffect,
    hero_fade: ScrubEffect,
    gallery: PinnedGallery,
    contact: ContactForm,
    copy: CopyControl,
    timers: TimerQueue<AppTimer>,
}

impl Portfolio {
    /// Load the page at the top of the document. The theme comes from
    /// `store`; observers get their initial visibility check right away.
    pub fn new(content: Content, store: Arc<dyn KeyValueStore>, viewport: Viewport) -> Result<Self> {
        let metrics = content.page_metrics();
        let layout = PageLayout::compute(viewport, &metrics)?;

        let mut theme = ThemeState::load(store);
        let hero = HeroScene::mount(&mut theme);

        let reveals = Reveals::new(&content);
        let mut visibility = VisibilityTracker::new();
        for id in SectionId::ALL {
            visibility.observe(id, RootMargin::SECTION);
        }
        for group in reveals.groups() {
            visibility.observe(group.trigger(), group.root_margin());
        }

        let gallery = PinnedGallery::new(content.projects.len());
        let copy = CopyControl::new(content.contact.email.clone());
        let section_scrubs = SectionId::ALL
            .into_iter()
            .map(|id| (id, ScrubEffect::section_opacity(id)))
            .collect();

        let mut portfolio = Self {
            content,
            metrics,
            viewport,
            layout,
            scroll_y: 0.0,
            now: 0,
            mounted_at: None,
            theme,
            hero,
            nav: NavigationController::new(),
            visibility,
            entrance: Entrance::new(),
            reveals,
            float_shapes: ToggledReveal::float_shapes(),
            section_scrubs,
            about_drift: ScrubEffect::about_drift(),
            hero_fade: ScrubEffect::hero_fade(),
            gallery,
            contact: ContactForm::new(),
            copy,
            timers: TimerQueue::new(),
        };
        portfolio.apply_scroll(0.0);
        Ok(portfolio)
    }

    /// Simulate a page reload: all ephemeral state is rebuilt and the theme
    /// is read back from the same storage. The clock keeps running.
    pub fn reload(&mut self) -> Result<()> {
        let mut fresh = Self::new(self.content.clone(), self.theme.store(), self.viewport)?;
        fresh.now = self.now;
        self.hero.unmount(&mut self.theme);
        *self = fresh;
        tracing::debug!("Portfolio::reload - reloaded with {} theme", self.theme.get());
        Ok(())
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    pub fn hero(&self) -> &HeroScene {
        &self.hero
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    pub fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn copy_control(&self) -> &CopyControl {
        &self.copy
    }

    pub fn gallery(&self) -> &PinnedGallery {
        &self.gallery
    }

    /// Process one event to completion
    pub fn dispatch(&mut self, event: &Event) {
        self.advance(event.timestamp_ms);
        match event.event_type {
            event_types::SCROLL => {
                if let Some(offset) = event.scroll_offset() {
                    // A user scroll wins over any smooth scroll in flight
                    self.nav.cancel_scroll();
                    self.apply_scroll(offset);
                }
            }
            event_types::SCROLL_END => self.settle_gallery(),
            event_types::RESIZE => {
                if let EventData::Resize { width, height } = event.data {
                    self.resize(Viewport::new(width, height));
                }
            }
            event_types::CLICK => self.click(&event.target),
            event_types::MOUNT => self.mount(),
            other => tracing::trace!(event_type = other, "unhandled event"),
        }
    }

    /// Advance the clock: fire due timers and step any smooth scroll
    pub fn tick(&mut self, now: Millis) {
        self.advance(now);
        if let Some(offset) = self.nav.tick(self.now) {
            self.apply_scroll(offset);
        }
    }

    fn advance(&mut self, now: Millis) {
        self.now = self.now.max(now);
        for timer in self.timers.drain_due(self.now) {
            match timer {
                AppTimer::ContactBanner => self.contact.on_banner_elapsed(),
                AppTimer::CopyConfirmation => self.copy.on_confirmation_elapsed(),
            }
        }
    }

    fn mount(&mut self) {
        if self.mounted_at.is_none() {
            self.mounted_at = Some(self.now);
        }
        self.entrance.timeline.start(self.now);
    }

    fn apply_scroll(&mut self, offset: f32) {
        let y = offset.clamp(0.0, self.layout.max_scroll(self.viewport));
        self.scroll_y = y;
        self.nav.on_scroll(&self.layout, y);

        for target in self.visibility.update(&self.layout, y, self.viewport) {
            tracing::debug!("Portfolio - `{}` revealed", target);
            self.reveals.reveal(target, self.now);
        }
        self.float_shapes
            .update(&self.layout, y, self.viewport, self.now);
    }

    fn settle_gallery(&mut self) {
        let target = self
            .gallery
            .snap_target(&self.layout, self.viewport, self.scroll_y);
        if (target - self.scroll_y).abs() > f32::EPSILON {
            tracing::trace!(from = self.scroll_y, to = target, "gallery snap");
            self.nav.scroll_to_offset(self.scroll_y, target, self.now);
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        match PageLayout::compute(viewport, &self.metrics) {
            Ok(layout) => {
                self.viewport = viewport;
                self.layout = layout;
                self.apply_scroll(self.scroll_y);
            }
            Err(e) => tracing::warn!("Portfolio::resize - keeping previous layout: {}", e),
        }
    }

    fn click(&mut self, target: &str) {
        match target {
            "logo" => {
                self.scroll_to(SectionId::Home);
            }
            "email-me" => {
                self.scroll_to(SectionId::Contact);
            }
            "chevron" => self.scroll_to_content(),
            "theme-toggle" => {
                self.toggle_theme();
            }
            other => match other.strip_prefix("nav:").map(str::parse::<SectionId>) {
                Some(Ok(id)) => {
                    self.scroll_to(id);
                }
                Some(Err(e)) => tracing::debug!("Portfolio::click - {}", e),
                None => tracing::debug!("Portfolio::click - no handler for `{}`", other),
            },
        }
    }

    /// Smooth-scroll to a section. False if it is not mounted.
    pub fn scroll_to(&mut self, id: SectionId) -> bool {
        self.nav
            .scroll_to(id, &self.layout, self.scroll_y, self.viewport, self.now)
    }

    /// Smooth-scroll one viewport down, past the hero
    pub fn scroll_to_content(&mut self) {
        let target = self
            .viewport
            .height
            .min(self.layout.max_scroll(self.viewport));
        self.nav.scroll_to_offset(self.scroll_y, target, self.now);
    }

    /// Remove a section from the page, as if it failed to mount. A resize
    /// lays the full page out again.
    pub fn unmount_section(&mut self, id: SectionId) {
        self.layout = self.layout.without(id);
    }

    pub fn toggle_theme(&mut self) -> ColorScheme {
        self.theme.toggle()
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.contact.set_field(field, value);
    }

    /// Submit the contact form. Relay failures are logged, not returned.
    pub async fn submit_contact(
        &mut self,
        relay: &dyn EmailRelay,
    ) -> std::result::Result<SubmissionStatus, ContactError> {
        self.contact.submit(relay, self.now, &mut self.timers).await
    }

    /// Copy the contact address. Returns whether the copy succeeded.
    pub fn copy_email(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        self.copy
            .copy(clipboard, self.now, &mut self.timers)
            .is_ok()
    }

    /// Hero content opacity at the current offset
    pub fn hero_opacity(&self) -> f32 {
        self.hero_fade
            .value(&self.layout, self.scroll_y, self.viewport)
            .unwrap_or(1.0)
    }

    /// Gallery translation in percent of card width
    pub fn gallery_percent(&self) -> f32 {
        let progress = self
            .gallery
            .progress(&self.layout, self.viewport, self.scroll_y);
        self.gallery.translate_percent(progress)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let mut seen: Vec<String> = self
            .visibility
            .seen()
            .into_iter()
            .map(|t| t.name())
            .collect();
        seen.sort();
        FrameSnapshot {
            now_ms: self.now,
            scroll_y: self.scroll_y,
            active: self.nav.active(),
            scrolled: self.nav.is_scrolled(),
            theme: self.theme.get(),
            seen,
            gallery_percent: self.gallery_percent(),
            gallery_pinned: self
                .gallery
                .is_pinned(&self.layout, self.viewport, self.scroll_y),
            hero_opacity: self.hero_opacity(),
            contact_status: self.contact.status(),
            success_banner: self.contact.success_banner().is_some(),
            copy_label: self.copy.label().to_string(),
        }
    }

    /// Sampled style of every animated element
    pub fn frame_styles(&self) -> FrameStyles {
        let now = self.now;
        let (layout, y, vp) = (&self.layout, self.scroll_y, self.viewport);
        let r = &self.reveals;

        let section_opacity = self
            .section_scrubs
            .iter()
            .filter_map(|(id, effect)| effect.value(layout, y, vp).map(|v| (*id, v)))
            .collect();
        let progress = self.gallery.progress(layout, vp, y);

        FrameStyles {
            nav: self.entrance.sample(self.entrance.nav, now),
            section_opacity,
            hero_fade: self.hero_opacity(),
            hero: self
                .entrance
                .hero
                .iter()
                .map(|&id| self.entrance.sample(id, now))
                .collect(),
            chevron_bob: self
                .mounted_at
                .map_or(0.0, |at| chevron_bob(now.saturating_sub(at))),
            about: samples(&r.about, now),
            about_shapes: (0..self.float_shapes.len())
                .filter_map(|i| self.float_shapes.sample(i, now))
                .collect(),
            about_drift: self.about_drift.value(layout, y, vp).unwrap_or(0.0),
            skills_heading: first(&r.skills_heading, now),
            skill_categories: samples(&r.skill_categories, now),
            skill_bars: r.skill_bars.iter().map(|g| samples(g, now)).collect(),
            projects_heading: first(&r.projects_heading, now),
            gallery_translate_pct: self.gallery.translate_percent(progress),
            gallery_pin_offset: self.gallery.pin_offset(layout, vp, y),
            gallery_pinned: self.gallery.is_pinned(layout, vp, y),
            experience_heading: first(&r.experience_heading, now),
            experience: samples(&r.experience, now),
            education_heading: first(&r.education_heading, now),
            education: samples(&r.education, now),
            contact_heading: first(&r.contact_heading, now),
            contact_subtitle: first(&r.contact_subtitle, now),
            contact_info: samples(&r.contact_info, now),
            contact_form: samples(&r.contact_form, now),
            footer: samples(&r.footer, now),
            footer_rule: first(&r.footer_rule, now),
        }
    }

    pub fn view_state(&self) -> ViewState<'_> {
        ViewState {
            content: &self.content,
            scheme: self.theme.get(),
            nav_items: self.nav.nav_items(),
            scrolled: self.nav.is_scrolled(),
            form: &self.contact,
            copy_label: self.copy.label(),
            styles: self.frame_styles(),
        }
    }

    /// The page as an HTML document
    pub fn render(&self) -> String {
        view::render_document(&view::page(&self.view_state()))
    }
}

impl fmt::Debug for Portfolio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Portfolio")
            .field("viewport", &self.viewport)
            .field("scroll_y", &self.scroll_y)
            .field("now", &self.now)
            .field("theme", &self.theme)
            .field("active", &self.nav.active())
            .field("contact", &self.contact)
            .finish_non_exhaustive()
    }
}
