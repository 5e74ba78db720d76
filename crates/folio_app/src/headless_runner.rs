//! Scenario runner that drives a `Portfolio` through headless steps.

use crate::app::Portfolio;
use crate::clipboard::Clipboard;
use crate::contact::Field;
use crate::headless_assert::{
    evaluate_assert_active, evaluate_assert_contact_status, evaluate_assert_copy_label,
    evaluate_assert_gallery_percent, evaluate_assert_scrolled, evaluate_assert_seen,
    evaluate_assert_text_contains, evaluate_assert_theme, AssertionResult,
};
use crate::headless_report::HeadlessReport;
use crate::headless_runtime::{wait_frames, HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use crate::relay::EmailRelay;
use crate::view;
use anyhow::Result;
use folio_core::{Event, Millis};

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Parse scenario JSON and run it against `portfolio`.
pub async fn run_scenario(
    input: &str,
    portfolio: &mut Portfolio,
    cfg: HeadlessRunConfig,
    relay: &dyn EmailRelay,
    clipboard: &mut dyn Clipboard,
) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, portfolio, cfg, relay, clipboard).await
}

/// Run a pre-loaded scenario. Stops at the first failed assertion.
pub async fn run_loaded_scenario(
    scenario: &HeadlessScenario,
    portfolio: &mut Portfolio,
    cfg: HeadlessRunConfig,
    relay: &dyn EmailRelay,
    clipboard: &mut dyn Clipboard,
) -> Result<RunOutcome> {
    let started_at = portfolio.now();
    let mut elapsed_frames: u64 = 0;

    for (step_index, step) in scenario.steps.iter().enumerate() {
        let now = portfolio.now();
        match step {
            ScenarioStep::Mount => portfolio.dispatch(&Event::mount(now)),
            ScenarioStep::Wait { ms } => {
                let frames = wait_frames(*ms, cfg.tick_ms);
                run_frames(portfolio, cfg, *ms, frames, &mut elapsed_frames)?;
            }
            ScenarioStep::Tick { frames } => {
                let span = cfg.tick_ms.saturating_mul(u64::from(*frames));
                run_frames(portfolio, cfg, span, *frames, &mut elapsed_frames)?;
            }
            ScenarioStep::Scroll { y } => portfolio.dispatch(&Event::scroll(*y, now)),
            ScenarioStep::ScrollEnd => portfolio.dispatch(&Event::scroll_end(now)),
            ScenarioStep::Resize { width, height } => {
                portfolio.dispatch(&Event::resize(*width, *height, now))
            }
            ScenarioStep::Click { target } => portfolio.dispatch(&Event::click(target.as_str(), now)),
            ScenarioStep::ClickNav { section } => {
                portfolio.dispatch(&Event::click(format!("nav:{section}"), now))
            }
            ScenarioStep::ToggleTheme => {
                portfolio.toggle_theme();
            }
            ScenarioStep::Reload => portfolio.reload()?,
            ScenarioStep::FillContact {
                name,
                email,
                message,
            } => {
                portfolio.set_field(Field::Name, name.as_str());
                portfolio.set_field(Field::Email, email.as_str());
                portfolio.set_field(Field::Message, message.as_str());
            }
            ScenarioStep::SubmitContact => {
                if let Err(e) = portfolio.submit_contact(relay).await {
                    tracing::debug!("run_loaded_scenario - submit ignored: {}", e);
                }
            }
            ScenarioStep::CopyEmail => {
                portfolio.copy_email(clipboard);
            }
            assertion => {
                if let AssertionResult::Failed { message, .. } = evaluate(assertion, portfolio) {
                    let report = HeadlessReport::failed(
                        assertion.assertion_name().unwrap_or("assert"),
                        step_index,
                        message,
                        elapsed_frames,
                        portfolio.now().saturating_sub(started_at),
                        portfolio.snapshot(),
                    );
                    return Ok(RunOutcome::Failed { report });
                }
            }
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(
            elapsed_frames,
            portfolio.now().saturating_sub(started_at),
            portfolio.snapshot(),
        ),
    })
}

fn evaluate(step: &ScenarioStep, portfolio: &Portfolio) -> AssertionResult {
    let snapshot = portfolio.snapshot();
    match step {
        ScenarioStep::AssertActive { section } => evaluate_assert_active(*section, &snapshot),
        ScenarioStep::AssertScrolled { value } => evaluate_assert_scrolled(*value, &snapshot),
        ScenarioStep::AssertSeen { target } => evaluate_assert_seen(target, &snapshot),
        ScenarioStep::AssertTheme { theme } => evaluate_assert_theme(*theme, &snapshot),
        ScenarioStep::AssertContactStatus { status } => {
            evaluate_assert_contact_status(*status, &snapshot)
        }
        ScenarioStep::AssertCopyLabel { value } => evaluate_assert_copy_label(value, &snapshot),
        ScenarioStep::AssertGalleryPercent { value, tolerance } => {
            evaluate_assert_gallery_percent(*value, *tolerance, &snapshot)
        }
        ScenarioStep::AssertTextContains { id, value } => {
            let page = view::page(&portfolio.view_state());
            evaluate_assert_text_contains(id, value, &page)
        }
        _ => AssertionResult::Passed,
    }
}

fn run_frames(
    portfolio: &mut Portfolio,
    cfg: HeadlessRunConfig,
    span_ms: Millis,
    frames: u32,
    elapsed_frames: &mut u64,
) -> Result<()> {
    let start = portfolio.now();
    HeadlessRuntime::run(cfg, start, span_ms, frames, |ctx| {
        portfolio.tick(ctx.now_ms);
        *elapsed_frames = elapsed_frames.saturating_add(1);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::content::Content;
    use crate::relay::MemoryRelay;
    use folio_layout::Viewport;
    use folio_theme::MemoryStore;
    use std::sync::Arc;

    fn portfolio() -> Portfolio {
        Portfolio::new(
            Content::embedded().unwrap(),
            Arc::new(MemoryStore::new()),
            Viewport::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_wait_advances_clock() {
        let mut app = portfolio();
        let outcome = run_scenario(
            r#"{"steps": [{"type": "wait", "ms": 100}]}"#,
            &mut app,
            HeadlessRunConfig::default(),
            &MemoryRelay::new(),
            &mut MemoryClipboard::new(),
        )
        .await
        .unwrap();

        assert!(!outcome.is_failed());
        assert_eq!(outcome.report().elapsed_frames, 7);
        assert_eq!(outcome.report().elapsed_ms, 100);
        assert_eq!(app.now(), 100);
    }

    #[tokio::test]
    async fn test_failed_assertion_reports_step() {
        let mut app = portfolio();
        let outcome = run_scenario(
            r#"{"steps": [
                {"type": "assert_theme", "theme": "dark"},
                {"type": "assert_active", "section": "contact"}
            ]}"#,
            &mut app,
            HeadlessRunConfig::default(),
            &MemoryRelay::new(),
            &mut MemoryClipboard::new(),
        )
        .await
        .unwrap();

        assert!(outcome.is_failed());
        let report = outcome.report();
        assert_eq!(report.failed_step_index, Some(1));
        assert_eq!(report.assertion.as_deref(), Some("assert_active"));
    }
}
