//! Scenario definition for headless page runs.

use crate::contact::SubmissionStatus;
use anyhow::Result;
use folio_layout::SectionId;
use folio_theme::ColorScheme;
use serde::Deserialize;
use std::path::Path;

/// Sequence of headless steps.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

fn default_tolerance() -> f32 {
    0.5
}

/// One user action, clock advance or assertion.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Mount,
    Wait { ms: u64 },
    Tick { frames: u32 },
    Scroll { y: f32 },
    ScrollEnd,
    Resize { width: f32, height: f32 },
    Click { target: String },
    ClickNav { section: SectionId },
    ToggleTheme,
    Reload,
    FillContact { name: String, email: String, message: String },
    SubmitContact,
    CopyEmail,
    AssertActive { section: SectionId },
    AssertScrolled { value: bool },
    AssertSeen { target: String },
    AssertTheme { theme: ColorScheme },
    AssertContactStatus { status: SubmissionStatus },
    AssertCopyLabel { value: String },
    AssertGalleryPercent {
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertTextContains { id: String, value: String },
}

impl ScenarioStep {
    /// Assertion name for reports, `None` for actions
    pub fn assertion_name(&self) -> Option<&'static str> {
        Some(match self {
            ScenarioStep::AssertActive { .. } => "assert_active",
            ScenarioStep::AssertScrolled { .. } => "assert_scrolled",
            ScenarioStep::AssertSeen { .. } => "assert_seen",
            ScenarioStep::AssertTheme { .. } => "assert_theme",
            ScenarioStep::AssertContactStatus { .. } => "assert_contact_status",
            ScenarioStep::AssertCopyLabel { .. } => "assert_copy_label",
            ScenarioStep::AssertGalleryPercent { .. } => "assert_gallery_percent",
            ScenarioStep::AssertTextContains { .. } => "assert_text_contains",
            _ => return None,
        })
    }
}
