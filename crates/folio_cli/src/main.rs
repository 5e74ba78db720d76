//! Folio CLI
//!
//! Command-line driver for the headless portfolio page.
//!
//! ## Usage
//!
//! ```bash
//! folio init my-site --title "My Portfolio"
//! folio render my-site --scroll-y 1800 --theme light --out frame.html
//! folio run my-site/scenarios/visit.json --site my-site --report reports/visit.json
//! folio theme toggle my-site
//! folio send my-site --name Ada --email ada@example.com --message "Hello"
//! ```

mod config;
mod project;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_app::{
    run_loaded_scenario, Clipboard, Content, EmailJsRelay, EmailMessage, EmailRelay,
    HeadlessRunConfig, HeadlessScenario, MemoryClipboard, MemoryRelay, Portfolio,
    SystemClipboard,
};
use folio_core::Event;
use folio_theme::{
    ColorScheme, JsonFileStore, KeyValueStore, MemoryStore, ThemeState, THEME_STORAGE_KEY,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use config::FolioConfig;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Headless portfolio page: render frames and run scenarios", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new site directory
    Init {
        /// Directory to create the site in
        #[arg(value_name = "DIRECTORY", default_value = ".")]
        path: PathBuf,

        /// Site title
        #[arg(short, long, default_value = "Portfolio")]
        title: String,
    },

    /// Render one frame of the page as HTML
    Render {
        /// Site directory
        #[arg(value_name = "DIRECTORY", default_value = ".")]
        path: PathBuf,

        /// Scroll offset of the frame
        #[arg(long, default_value_t = 0.0)]
        scroll_y: f32,

        /// Render with this theme without touching the persisted choice
        #[arg(long, value_name = "SCHEME")]
        theme: Option<ColorScheme>,

        /// Milliseconds after mount at which the frame is sampled
        #[arg(long, default_value_t = 3_000)]
        at: u64,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Run a headless scenario
    Run {
        /// Scenario JSON file
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,

        /// Site directory
        #[arg(long, default_value = ".")]
        site: PathBuf,

        /// Relative path for the JSON report
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,

        /// Frame step in logical milliseconds
        #[arg(long, default_value_t = 16)]
        tick_ms: u64,

        /// Send through the configured relay and the system clipboard
        #[arg(long)]
        live: bool,
    },

    /// Send a contact message through the configured relay
    Send {
        /// Site directory
        #[arg(value_name = "DIRECTORY", default_value = ".")]
        path: PathBuf,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,
    },

    /// Show or change the persisted theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the persisted theme
    Show {
        #[arg(value_name = "DIRECTORY", default_value = ".")]
        path: PathBuf,
    },
    /// Switch between light and dark
    Toggle {
        #[arg(value_name = "DIRECTORY", default_value = ".")]
        path: PathBuf,
    },
    /// Set a specific theme
    Set {
        #[arg(value_name = "SCHEME")]
        scheme: ColorScheme,
        #[arg(value_name = "DIRECTORY", default_value = ".")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path, title } => project::create_site(&path, &title),
        Commands::Render {
            path,
            scroll_y,
            theme,
            at,
            out,
        } => render(&path, scroll_y, theme, at, out.as_deref()),
        Commands::Run {
            scenario,
            site,
            report,
            tick_ms,
            live,
        } => run(&scenario, &site, report.as_deref(), tick_ms, live).await,
        Commands::Send {
            path,
            name,
            email,
            message,
        } => send(&path, name, email, message).await,
        Commands::Theme { action } => theme(action),
    }
}

fn load_site(root: &Path, theme: Option<ColorScheme>) -> Result<(FolioConfig, Portfolio)> {
    let config = FolioConfig::load_from_dir(root)?;
    let content = match config.content_path(root) {
        Some(path) => Content::from_path(&path)
            .with_context(|| format!("Failed to load content from {}", path.display()))?,
        None => Content::embedded()?,
    };
    let store: Arc<dyn KeyValueStore> = match theme {
        Some(scheme) => Arc::new(MemoryStore::with_entry(THEME_STORAGE_KEY, scheme.as_str())),
        None => Arc::new(JsonFileStore::new(config.theme_store_path(root))),
    };
    let portfolio = Portfolio::new(content, store, config.viewport.into())?;
    Ok((config, portfolio))
}

fn render(
    root: &Path,
    scroll_y: f32,
    theme: Option<ColorScheme>,
    at: u64,
    out: Option<&Path>,
) -> Result<()> {
    let (_, mut page) = load_site(root, theme)?;
    page.dispatch(&Event::mount(0));
    page.dispatch(&Event::scroll(scroll_y, 0));
    page.tick(at);

    let html = page.render();
    match out {
        Some(path) => {
            std::fs::write(path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("frame written to {}", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

async fn run(
    scenario_path: &Path,
    root: &Path,
    report_path: Option<&Path>,
    tick_ms: u64,
    live: bool,
) -> Result<()> {
    let scenario = HeadlessScenario::from_path(scenario_path)
        .with_context(|| format!("Failed to load {}", scenario_path.display()))?;
    let (config, mut page) = load_site(root, None)?;
    let cfg = HeadlessRunConfig {
        tick_ms,
        ..HeadlessRunConfig::default()
    };

    let (relay, mut clipboard): (Box<dyn EmailRelay>, Box<dyn Clipboard>) = if live {
        (
            Box::new(EmailJsRelay::new(config.relay)),
            Box::new(SystemClipboard::new()?),
        )
    } else {
        (Box::new(MemoryRelay::new()), Box::new(MemoryClipboard::new()))
    };

    let outcome =
        run_loaded_scenario(&scenario, &mut page, cfg, relay.as_ref(), clipboard.as_mut()).await?;
    let report = outcome.report();

    match report_path {
        Some(path) => report.write_to_path(path)?,
        None => report.write_to_writer(&mut std::io::stdout())?,
    }

    if outcome.is_failed() {
        tracing::error!(
            step = ?report.failed_step_index,
            "scenario failed: {}",
            report.message.as_deref().unwrap_or("assertion failed")
        );
        std::process::exit(1);
    }
    tracing::info!("scenario passed in {} ms", report.elapsed_ms);
    Ok(())
}

async fn send(root: &Path, name: String, email: String, message: String) -> Result<()> {
    let config = FolioConfig::load_from_dir(root)?;
    let relay = EmailJsRelay::new(config.relay);
    relay
        .send(&EmailMessage {
            from_name: name,
            reply_to: email,
            message,
        })
        .await?;
    tracing::info!("message sent");
    Ok(())
}

fn theme(action: ThemeAction) -> Result<()> {
    let path = match &action {
        ThemeAction::Show { path } | ThemeAction::Toggle { path } | ThemeAction::Set { path, .. } => {
            path.clone()
        }
    };
    let config = FolioConfig::load_from_dir(&path)?;
    let mut state = ThemeState::load(Arc::new(JsonFileStore::new(config.theme_store_path(&path))));

    match action {
        ThemeAction::Show { .. } => {}
        ThemeAction::Toggle { .. } => {
            state.toggle();
        }
        ThemeAction::Set { scheme, .. } => {
            state.set(scheme);
        }
    }
    println!("{}", state.get());
    Ok(())
}
