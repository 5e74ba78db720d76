//! Assertion helpers for headless page runs.

use crate::app::FrameSnapshot;
use crate::contact::SubmissionStatus;
use crate::view::Node;
use folio_layout::{SectionId, Target};
use folio_theme::ColorScheme;

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

fn failed(code: &str, message: String) -> AssertionResult {
    AssertionResult::Failed {
        code: code.to_string(),
        message,
    }
}

fn check<T: PartialEq + std::fmt::Debug>(what: &str, expected: T, actual: T) -> AssertionResult {
    if expected == actual {
        AssertionResult::Passed
    } else {
        failed(
            "mismatch",
            format!("{what}: expected {expected:?}, got {actual:?}"),
        )
    }
}

pub fn evaluate_assert_active(expected: SectionId, snapshot: &FrameSnapshot) -> AssertionResult {
    check("active section", expected, snapshot.active)
}

pub fn evaluate_assert_scrolled(expected: bool, snapshot: &FrameSnapshot) -> AssertionResult {
    check("scrolled", expected, snapshot.scrolled)
}

pub fn evaluate_assert_theme(expected: ColorScheme, snapshot: &FrameSnapshot) -> AssertionResult {
    check("theme", expected, snapshot.theme)
}

pub fn evaluate_assert_contact_status(
    expected: SubmissionStatus,
    snapshot: &FrameSnapshot,
) -> AssertionResult {
    check("contact status", expected, snapshot.contact_status)
}

pub fn evaluate_assert_copy_label(expected: &str, snapshot: &FrameSnapshot) -> AssertionResult {
    check("copy label", expected, snapshot.copy_label.as_str())
}

pub fn evaluate_assert_seen(target: &str, snapshot: &FrameSnapshot) -> AssertionResult {
    let target = match target.parse::<Target>() {
        Ok(t) => t.name(),
        Err(e) => return failed("unknown_target", e.to_string()),
    };
    if snapshot.seen.contains(&target) {
        AssertionResult::Passed
    } else {
        failed("not_seen", format!("{target}: not seen yet"))
    }
}

pub fn evaluate_assert_gallery_percent(
    expected: f32,
    tolerance: f32,
    snapshot: &FrameSnapshot,
) -> AssertionResult {
    let actual = snapshot.gallery_percent;
    if (actual - expected).abs() <= tolerance {
        AssertionResult::Passed
    } else {
        failed(
            "out_of_tolerance",
            format!("gallery percent: expected {expected}±{tolerance}, got {actual}"),
        )
    }
}

pub fn evaluate_assert_text_contains(id: &str, expected: &str, page: &Node) -> AssertionResult {
    let Some(element) = page.find_by_id(id) else {
        return failed("missing_element", format!("{id}: element not found"));
    };
    let text = element.text_content();
    if text.contains(expected) {
        AssertionResult::Passed
    } else {
        failed(
            "text_mismatch",
            format!("{id}: expected substring '{expected}', got '{text}'"),
        )
    }
}
