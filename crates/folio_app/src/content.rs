//! Page content
//!
//! Everything the sections display is static configuration. The default
//! content is embedded at compile time; the CLI can swap in another file
//! with the same shape.

use folio_layout::{PageMetrics, ProjectsMetrics};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Source of the built-in content
pub const DEFAULT_CONTENT: &str = include_str!("content.toml");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse content: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid content: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    /// Navigation logo text
    pub initials: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub tagline: String,
    pub location: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct About {
    pub paragraphs: Vec<String>,
    pub stats: Vec<Stat>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency in percent
    pub level: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
    pub focus: String,
    pub achievements: Vec<String>,
}

/// A social link in the contact section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Social {
    Link { label: String, href: String },
    /// Copies the contact address instead of navigating
    Copy { label: String },
}

impl Social {
    pub fn label(&self) -> &str {
        match self {
            Social::Link { label, .. } | Social::Copy { label } => label,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub location: String,
    pub subtitle: String,
    pub socials: Vec<Social>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    pub made_with: String,
    pub made_with_suffix: String,
    pub rights: String,
    pub year: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub owner: Owner,
    pub hero: Hero,
    pub about: About,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub contact: ContactInfo,
    pub footer: Footer,
}

impl Content {
    /// Content shipped with the binary
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_toml(DEFAULT_CONTENT)
    }

    pub fn from_toml(input: &str) -> Result<Self, ContentError> {
        let content: Content = toml::from_str(input)?;
        content.validate()?;
        Ok(content)
    }

    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.projects.is_empty() {
            return Err(ContentError::Invalid(
                "at least one project is required".to_string(),
            ));
        }
        for category in &self.skills {
            if let Some(skill) = category
                .skills
                .iter()
                .find(|s| !(0.0..=100.0).contains(&s.level))
            {
                return Err(ContentError::Invalid(format!(
                    "skill `{}` has level {} outside 0..=100",
                    skill.name, skill.level
                )));
            }
        }
        Ok(())
    }

    /// Number of items the education section reveals: every entry plus the
    /// certifications block
    pub fn education_items(&self) -> usize {
        self.education.len() + usize::from(!self.certifications.is_empty())
    }

    /// Layout metrics sized for this content
    pub fn page_metrics(&self) -> PageMetrics {
        PageMetrics {
            projects: ProjectsMetrics {
                card_count: self.projects.len(),
                ..ProjectsMetrics::default()
            },
            ..PageMetrics::default()
        }
    }
}
