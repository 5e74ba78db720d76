use folio_app::clipboard::COPIED_LABEL;
use folio_app::{
    Content, EmailJsRelay, Field, MemoryClipboard, MemoryRelay, Portfolio, RelayConfig,
    SubmissionStatus,
};
use folio_core::Event;
use folio_layout::{SectionId, Viewport};
use folio_theme::{ColorScheme, KeyValueStore, MemoryStore, ReadOnlyStore, THEME_STORAGE_KEY};
use std::sync::Arc;

const EMAIL: &str = "mohithsiddhartht@gmail.com";

fn portfolio_with(store: Arc<dyn KeyValueStore>) -> Portfolio {
    Portfolio::new(Content::embedded().unwrap(), store, Viewport::new(1280.0, 720.0)).unwrap()
}

fn portfolio() -> Portfolio {
    portfolio_with(Arc::new(MemoryStore::new()))
}

fn fill(page: &mut Portfolio) {
    page.set_field(Field::Name, "Ada");
    page.set_field(Field::Email, "ada@example.com");
    page.set_field(Field::Message, "Hello");
}

#[test]
fn nav_click_scrolls_to_section() {
    let mut page = portfolio();
    let skills_top = page.layout().section_top(SectionId::Skills).unwrap();

    page.dispatch(&Event::click("nav:skills", 0));
    assert_eq!(page.snapshot().active, SectionId::Skills);
    assert!(page.navigation().is_scrolling());

    page.tick(2_000);
    let snap = page.snapshot();
    assert_eq!(snap.scroll_y, skills_top);
    assert_eq!(snap.active, SectionId::Skills);
    assert!(snap.scrolled);
    assert!(!page.navigation().is_scrolling());
}

#[test]
fn user_scroll_cancels_smooth_scroll() {
    let mut page = portfolio();
    page.dispatch(&Event::click("nav:contact", 0));
    page.tick(100);
    page.dispatch(&Event::scroll(300.0, 120));
    assert!(!page.navigation().is_scrolling());

    page.tick(2_000);
    assert_eq!(page.scroll_y(), 300.0);
}

#[test]
fn chevron_scrolls_one_viewport() {
    let mut page = portfolio();
    page.dispatch(&Event::click("chevron", 0));
    page.tick(1_000);
    assert_eq!(page.scroll_y(), 720.0);
}

#[test]
fn unmounted_section_is_not_scrolled_to() {
    let mut page = portfolio();
    page.unmount_section(SectionId::Projects);
    assert!(!page.scroll_to(SectionId::Projects));
    assert_eq!(page.snapshot().active, SectionId::Home);
    assert!(!page.navigation().is_scrolling());
}

#[test]
fn seen_flags_survive_scrolling_back() {
    let mut page = portfolio();
    let about_top = page.layout().section_top(SectionId::About).unwrap();

    assert!(!page.snapshot().seen.contains(&"about".to_string()));
    page.dispatch(&Event::scroll(about_top, 0));
    page.dispatch(&Event::scroll(0.0, 10));

    let snap = page.snapshot();
    assert!(snap.seen.contains(&"about".to_string()));
    assert!(snap.seen.contains(&"home".to_string()));
}

#[test]
fn resize_clamps_scroll_offset() {
    let mut page = portfolio();
    let bottom = page.layout().max_scroll(page.viewport());
    page.dispatch(&Event::scroll(bottom + 500.0, 0));
    assert_eq!(page.scroll_y(), bottom);

    page.dispatch(&Event::resize(1280.0, 1400.0, 10));
    assert!(page.scroll_y() <= page.layout().max_scroll(page.viewport()));
    assert_eq!(page.viewport(), Viewport::new(1280.0, 1400.0));
}

#[tokio::test]
async fn contact_success_banner_lasts_five_seconds() {
    let relay = MemoryRelay::new();
    let mut page = portfolio();
    page.tick(1_000);
    fill(&mut page);

    let status = page.submit_contact(&relay).await.unwrap();
    assert_eq!(status, SubmissionStatus::Success);
    assert_eq!(relay.sent().len(), 1);
    assert!(page.contact().field(Field::Name).is_empty());

    page.tick(5_999);
    assert!(page.snapshot().success_banner);
    page.tick(6_000);
    let snap = page.snapshot();
    assert!(!snap.success_banner);
    assert_eq!(snap.contact_status, SubmissionStatus::Idle);
}

#[tokio::test]
async fn contact_failure_keeps_fields() {
    let relay = MemoryRelay::failing();
    let mut page = portfolio();
    fill(&mut page);

    let status = page.submit_contact(&relay).await.unwrap();
    assert_eq!(status, SubmissionStatus::Idle);
    assert_eq!(page.contact().field(Field::Message), "Hello");
    assert!(!page.snapshot().success_banner);
}

#[tokio::test]
async fn empty_form_is_not_sent() {
    let relay = MemoryRelay::new();
    let mut page = portfolio();
    assert!(page.submit_contact(&relay).await.is_err());
    assert!(relay.sent().is_empty());
}

#[tokio::test]
async fn contact_submits_through_http_relay() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let relay = EmailJsRelay::new(RelayConfig {
        endpoint: format!("{}/send", server.uri()),
        ..RelayConfig::default()
    });
    let mut page = portfolio();
    fill(&mut page);

    let status = page.submit_contact(&relay).await.unwrap();
    assert_eq!(status, SubmissionStatus::Success);
}

#[test]
fn copy_label_reverts_after_two_seconds() {
    let mut page = portfolio();
    let mut clipboard = MemoryClipboard::new();

    assert!(page.copy_email(&mut clipboard));
    assert_eq!(clipboard.contents(), Some(EMAIL));
    assert_eq!(page.snapshot().copy_label, COPIED_LABEL);

    page.tick(1_999);
    assert_eq!(page.snapshot().copy_label, COPIED_LABEL);
    page.tick(2_000);
    assert_eq!(page.snapshot().copy_label, EMAIL);
}

#[test]
fn failed_copy_keeps_label() {
    let mut page = portfolio();
    assert!(!page.copy_email(&mut MemoryClipboard::failing()));
    assert_eq!(page.snapshot().copy_label, EMAIL);
}

#[test]
fn theme_persists_across_reload() {
    let store = Arc::new(MemoryStore::new());
    let mut page = portfolio_with(store.clone());
    assert_eq!(page.snapshot().theme, ColorScheme::Dark);

    page.dispatch(&Event::click("theme-toggle", 0));
    assert_eq!(page.snapshot().theme, ColorScheme::Light);
    assert_eq!(page.hero().material().clearcoat, 0.4);

    page.tick(500);
    page.reload().unwrap();
    assert_eq!(page.snapshot().theme, ColorScheme::Light);
    assert_eq!(page.now(), 500);
    assert_eq!(page.theme().subscriber_count(), 1);

    page.toggle_theme();
    assert_eq!(page.snapshot().theme, ColorScheme::Dark);
    assert_eq!(store.get(THEME_STORAGE_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn unwritable_storage_still_toggles() {
    let mut page = portfolio_with(Arc::new(ReadOnlyStore::new()));
    assert_eq!(page.toggle_theme(), ColorScheme::Light);
    assert_eq!(page.snapshot().theme, ColorScheme::Light);
}

#[test]
fn render_reflects_theme_and_copy_state() {
    let mut page = portfolio();
    let html = page.render();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<html lang="en" class="dark">"#));
    assert!(html.contains("Mohit Siddharth T"));

    page.toggle_theme();
    page.copy_email(&mut MemoryClipboard::new());
    let html = page.render();
    assert!(!html.contains(r#"<html lang="en" class="dark">"#));
    assert!(html.contains(COPIED_LABEL));
}
