//! Section identifiers and observable regions
//!
//! The seven section ids are the only contract between the content sections
//! and the navigation/visibility machinery. Their declaration order is the
//! scrollspy tie-break order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Top-level page section
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    About,
    Skills,
    Projects,
    Experience,
    Education,
    Contact,
}

impl SectionId {
    /// All sections in declared order
    pub const ALL: [SectionId; 7] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Contact,
    ];

    /// Same-document anchor id
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Contact => "contact",
        }
    }

    /// Navigation label
    pub fn label(self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::About => "About",
            SectionId::Skills => "Skills",
            SectionId::Projects => "Projects",
            SectionId::Experience => "Experience",
            SectionId::Education => "Education",
            SectionId::Contact => "Contact",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section `{0}`")]
pub struct UnknownSection(pub String);

impl FromStr for SectionId {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.anchor() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// A region of the page that can be observed for visibility or scroll progress
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Section(SectionId),
    /// The projects heading animates on its own, ahead of the section margin
    ProjectsHeading,
    /// The horizontally scrolling card row
    ProjectsTrack,
    Footer,
}

impl Target {
    pub fn name(&self) -> String {
        match self {
            Target::Section(id) => id.anchor().to_string(),
            Target::ProjectsHeading => "projects-heading".to_string(),
            Target::ProjectsTrack => "projects-track".to_string(),
            Target::Footer => "footer".to_string(),
        }
    }
}

impl From<SectionId> for Target {
    fn from(id: SectionId) -> Self {
        Target::Section(id)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Target {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "projects-heading" => Ok(Target::ProjectsHeading),
            "projects-track" => Ok(Target::ProjectsTrack),
            "footer" => Ok(Target::Footer),
            other => other.parse().map(Target::Section),
        }
    }
}
