//! Site scaffolding

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::config::{FolioConfig, CONFIG_FILE};

pub const CONTENT_FILE: &str = "content.toml";
pub const SCENARIO_FILE: &str = "scenarios/visit.json";

/// Create a new site directory with editable content and a sample scenario
pub fn create_site(path: &Path, title: &str) -> Result<()> {
    if path.join(CONFIG_FILE).exists() {
        bail!("{} already contains a {}", path.display(), CONFIG_FILE);
    }

    fs::create_dir_all(path.join("scenarios"))?;

    let mut config = FolioConfig::new(title);
    config.site.content = Some(CONTENT_FILE.to_string());
    fs::write(path.join(CONFIG_FILE), config.to_toml()?)?;

    fs::write(path.join(CONTENT_FILE), folio_app::content::DEFAULT_CONTENT)?;
    fs::write(path.join(SCENARIO_FILE), SAMPLE_SCENARIO)?;

    fs::write(
        path.join(".gitignore"),
        r#"# Folio state
/.folio/
/reports/
"#,
    )?;

    tracing::info!("created site `{}` in {}", title, path.display());
    Ok(())
}

const SAMPLE_SCENARIO: &str = r#"{
  "steps": [
    { "type": "mount" },
    { "type": "wait", "ms": 3000 },
    { "type": "assert_active", "section": "home" },
    { "type": "click_nav", "section": "projects" },
    { "type": "wait", "ms": 1000 },
    { "type": "assert_active", "section": "projects" },
    { "type": "assert_seen", "target": "projects-heading" },
    { "type": "toggle_theme" },
    { "type": "reload" },
    { "type": "assert_theme", "theme": "light" },
    { "type": "copy_email" },
    { "type": "assert_copy_label", "value": "Copied to clipboard!" }
  ]
}
"#;
