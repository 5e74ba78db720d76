//! Views
//!
//! Every view is a plain function from explicit state to a [`Node`] tree.
//! Animated elements carry their sampled style inline, so a rendered frame
//! is a complete picture of the page at one scroll offset and instant.

use crate::contact::{ContactForm, Field};
use crate::content::{Content, Social};
use folio_animation::KeyframeProperties;
use folio_layout::{NavItem, SectionId};
use folio_theme::{ColorScheme, Palette};
use std::collections::BTreeMap;

const VOID_ELEMENTS: &[&str] = &["input", "meta", "br", "hr"];

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Start an element
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl Element {
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    /// Inline style. Empty declarations add nothing.
    pub fn style(self, css: impl Into<String>) -> Self {
        let css = css.into();
        if css.is_empty() {
            self
        } else {
            self.attr("style", css)
        }
    }

    /// Inline style from animated properties
    pub fn animated(self, props: &KeyframeProperties) -> Self {
        self.style(props.to_css())
    }

    /// Click target understood by `Portfolio::dispatch`
    pub fn on_click(self, target: &str) -> Self {
        self.attr("data-click", target)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl Node {
    /// Depth-first search for an element with the given id
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        let Node::Element(element) = self else {
            return None;
        };
        if element.get_attr("id") == Some(id) {
            return Some(element);
        }
        element.children.iter().find_map(|c| c.find_by_id(id))
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.text_content(),
        }
    }
}

impl Element {
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

/// Serialize a node tree as HTML
pub fn render_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Serialize a whole document, doctype included
pub fn render_document(node: &Node) -> String {
    format!("<!DOCTYPE html>\n{}\n", render_html(node))
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
        Node::Element(element) => {
            out.push('<');
            out.push_str(element.tag);
            for (name, value) in &element.attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(value));
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&element.tag) {
                return;
            }
            for child in &element.children {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(element.tag);
            out.push('>');
        }
    }
}

/// Sampled styles of every animated element for one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameStyles {
    pub nav: KeyframeProperties,
    pub section_opacity: BTreeMap<SectionId, f32>,
    pub hero_fade: f32,
    /// Container, heading, subtitle, location, chevron
    pub hero: Vec<KeyframeProperties>,
    pub chevron_bob: f32,
    pub about: Vec<KeyframeProperties>,
    pub about_shapes: Vec<KeyframeProperties>,
    pub about_drift: f32,
    pub skills_heading: KeyframeProperties,
    pub skill_categories: Vec<KeyframeProperties>,
    pub skill_bars: Vec<Vec<KeyframeProperties>>,
    pub projects_heading: KeyframeProperties,
    pub gallery_translate_pct: f32,
    pub gallery_pin_offset: f32,
    pub gallery_pinned: bool,
    pub experience_heading: KeyframeProperties,
    pub experience: Vec<KeyframeProperties>,
    pub education_heading: KeyframeProperties,
    pub education: Vec<KeyframeProperties>,
    pub contact_heading: KeyframeProperties,
    pub contact_subtitle: KeyframeProperties,
    pub contact_info: Vec<KeyframeProperties>,
    pub contact_form: Vec<KeyframeProperties>,
    pub footer: Vec<KeyframeProperties>,
    pub footer_rule: KeyframeProperties,
}

/// Everything the page view reads
pub struct ViewState<'a> {
    pub content: &'a Content,
    pub scheme: ColorScheme,
    pub nav_items: Vec<NavItem>,
    pub scrolled: bool,
    pub form: &'a ContactForm,
    pub copy_label: &'a str,
    pub styles: FrameStyles,
}

fn nth(list: &[KeyframeProperties], index: usize) -> KeyframeProperties {
    list.get(index).copied().unwrap_or_default()
}

fn section_shell(id: SectionId, styles: &FrameStyles) -> Element {
    let opacity = styles.section_opacity.get(&id).copied().unwrap_or(1.0);
    el("section")
        .id(id.anchor())
        .animated(&KeyframeProperties::opacity(opacity))
}

fn heading(text: &str, props: &KeyframeProperties) -> Element {
    el("h2").class("section-heading").animated(props).text(text)
}

pub fn nav_bar(state: &ViewState<'_>) -> Node {
    let class = if state.scrolled {
        "nav nav-scrolled"
    } else {
        "nav"
    };
    let links = state.nav_items.iter().map(|item| {
        let class = if item.active { "nav-link active" } else { "nav-link" };
        el("button")
            .class(class)
            .on_click(&format!("nav:{}", item.id))
            .text(item.label)
    });
    el("nav")
        .class(class)
        .animated(&state.styles.nav)
        .child(
            el("button")
                .class("logo")
                .on_click("logo")
                .text(state.content.owner.initials.as_str()),
        )
        .child(el("div").class("nav-links").children(links))
        .child(el("button").class("cta").on_click("email-me").text("Email Me"))
        .into()
}

pub fn theme_toggle(scheme: ColorScheme) -> Node {
    let (icon, label) = match scheme {
        ColorScheme::Dark => ("sun", "Switch to light mode"),
        ColorScheme::Light => ("moon", "Switch to dark mode"),
    };
    el("button")
        .id("theme-toggle")
        .class("theme-toggle")
        .attr("aria-label", label)
        .attr("data-icon", icon)
        .on_click("theme-toggle")
        .into()
}

pub fn hero(state: &ViewState<'_>) -> Node {
    let s = &state.styles;
    let content = state.content;
    let chevron = nth(&s.hero, 4);
    let bob = KeyframeProperties::translate(0.0, s.chevron_bob);
    section_shell(SectionId::Home, s)
        .class("hero")
        .child(el("div").class("hero-scene").attr("data-scheme", state.scheme.as_str()))
        .child(
            el("div")
                .class("hero-content")
                .animated(&KeyframeProperties::opacity(s.hero_fade))
                .child(
                    el("div")
                        .animated(&nth(&s.hero, 0))
                        .child(el("h1").animated(&nth(&s.hero, 1)).text(content.owner.name.as_str()))
                        .child(el("p").animated(&nth(&s.hero, 2)).text(content.hero.tagline.as_str()))
                        .child(el("p").animated(&nth(&s.hero, 3)).text(content.hero.location.as_str())),
                ),
        )
        .child(
            el("button")
                .class("chevron")
                .attr("aria-label", "Scroll down")
                .on_click("chevron")
                .animated(&chevron)
                .child(el("span").animated(&bob)),
        )
        .into()
}

pub fn about(state: &ViewState<'_>) -> Node {
    let s = &state.styles;
    let about = &state.content.about;
    let shapes = s
        .about_shapes
        .iter()
        .map(|props| el("div").class("float-shape").animated(props));
    let stats = about.stats.iter().map(|stat| {
        el("div")
            .class("stat")
            .child(el("div").class("stat-value").text(stat.value.as_str()))
            .child(el("div").class("stat-label").text(stat.label.as_str()))
    });
    let paragraphs = about.paragraphs.iter().map(|p| el("p").text(p.as_str()));

    section_shell(SectionId::About, s)
        .child(
            el("div")
                .class("about-backdrop")
                .animated(&KeyframeProperties::translate(0.0, s.about_drift))
                .children(shapes),
        )
        .child(heading("About Me", &nth(&s.about, 0)))
        .child(el("div").class("about-text").animated(&nth(&s.about, 1)).children(paragraphs))
        .child(el("div").class("stats").animated(&nth(&s.about, 2)).children(stats))
        .into()
}

pub fn skills(state: &ViewState<'_>) -> Node {
    let s = &state.styles;
    let categories = state.content.skills.iter().enumerate().map(|(i, category)| {
        let bars = s.skill_bars.get(i).map(Vec::as_slice).unwrap_or_default();
        let rows = category.skills.iter().enumerate().map(|(j, skill)| {
            el("div")
                .class("skill")
                .child(
                    el("div")
                        .class("skill-label")
                        .child(el("span").text(skill.name.as_str()))
                        .child(el("span").text(format!("{}%", skill.level))),
                )
                .child(
                    el("div")
                        .class("skill-track")
                        .child(el("div").class("skill-bar").animated(&nth(bars, j))),
                )
        });
        el("div")
            .class("skill-category")
            .animated(&nth(&s.skill_categories, i))
            .child(el("h3").text(category.name.as_str()))
            .children(rows)
    });

    section_shell(SectionId::Skills, s)
        .child(heading("Skills & Expertise", &s.skills_heading))
        .child(el("div").class("skill-grid").children(categories))
        .into()
}

pub fn projects(state: &ViewState<'_>) -> Node {
    let s = &state.styles;
    let cards = state.content.projects.iter().map(|project| {
        let tags = project
            .tags
            .iter()
            .map(|tag| el("span").class("tag").text(tag.as_str()));
        let mut card = el("article")
            .class("project-card")
            .child(el("h3").text(project.title.as_str()))
            .child(el("p").text(project.description.as_str()))
            .child(el("div").class("tags").children(tags));
        if let Some(href) = &project.github {
            card = card.child(
                el("a")
                    .attr("href", href.as_str())
                    .attr("target", "_blank")
                    .attr("rel", "noopener noreferrer")
                    .text("GitHub"),
            );
        }
        if let Some(href) = &project.link {
            card = card.child(
                el("a")
                    .attr("href", href.as_str())
                    .attr("target", "_blank")
                    .attr("rel", "noopener noreferrer")
                    .text("Live"),
            );
        }
        card
    });

    let pin = if s.gallery_pinned { "true" } else { "false" };
    section_shell(SectionId::Projects, s)
        .child(heading("Featured Projects", &s.projects_heading).id("projects-heading"))
        .child(
            el("div")
                .id("projects-track")
                .class("projects-pin")
                .attr("data-pinned", pin)
                .style(format!("transform: translateY({}px)", s.gallery_pin_offset))
                .child(
                    el("div")
                        .class("projects-row")
                        .style(format!("transform: translateX({}%)", s.gallery_translate_pct))
                        .children(cards),
                ),
        )
        .child(el("p").class("caption").text("Scroll horizontally to explore projects \u{2192}"))
        .into()
}

pub fn experience(state: &ViewState<'_>) -> Node {
    let s = &state.styles;
    let items = state.content.experience.iter().enumerate().map(|(i, exp)| {
        let achievements = exp
            .achievements
            .iter()
            .map(|a| el("li").text(a.as_str()));
        el("div")
            .class("timeline-item")
            .animated(&nth(&s.experience, i))
            .child(el("h3").text(exp.role.as_str()))
            .child(el("p").class("company").text(exp.company.as_str()))
            .child(el("span").class("period").text(exp.period.as_str()))
            .child(el("p").text(exp.description.as_str()))
            .child(el("ul").children(achievements))
    });

    section_shell(SectionId::Experience, s)
        .child(heading("Work Experience", &s.experience_heading))
        .child(el("div").class("timeline").children(items))
        .into()
}

pub fn education(state: &ViewState<'_>) -> Node {
    let s = &state.styles;
    let content = state.content;
    let entries = content.education.iter().enumerate().map(|(i, edu)| {
        let achievements = edu
            .achievements
            .iter()
            .map(|a| el("li").text(a.as_str()));
        el("div")
            .class("education-card")
            .animated(&nth(&s.education, i))
            .child(el("h3").text(edu.degree.as_str()))
            .child(el("p").class("institution").text(edu.institution.as_str()))
            .child(el("span").class("period").text(edu.period.as_str()))
            .child(el("p").class("focus").text(edu.focus.as_str()))
            .child(el("ul").children(achievements))
    });

    let mut section = section_shell(SectionId::Education, s)
        .child(heading("Education & Certifications", &s.education_heading))
        .children(entries);
    if !content.certifications.is_empty() {
        let certs = content
            .certifications
            .iter()
            .map(|c| el("div").class("certification").text(c.as_str()));
        section = section.child(
            el("div")
                .class("certifications")
                .animated(&nth(&s.education, content.education.len()))
                .child(el("h3").text("Certifications"))
                .children(certs),
        );
    }
    section.into()
}

pub fn contact(state: &ViewState<'_>) -> Node {
    let s = &state.styles;
    let info = &state.content.contact;
    let form = state.form;

    let socials = info.socials.iter().map(|social| match social {
        Social::Link { label, href } => el("a")
            .class("social")
            .attr("href", href.as_str())
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
            .attr("aria-label", label.as_str()),
        Social::Copy { label } => el("button")
            .class("social")
            .attr("aria-label", label.as_str())
            .on_click("copy-email"),
    });

    let inputs = Field::ALL.into_iter().enumerate().map(|(i, field)| {
        let input = match field {
            Field::Message => el("textarea")
                .attr("rows", "6")
                .text(form.field(field)),
            Field::Email => el("input")
                .attr("type", "email")
                .attr("value", form.field(field)),
            Field::Name => el("input")
                .attr("type", "text")
                .attr("value", form.field(field)),
        };
        el("label")
            .animated(&nth(&s.contact_form, i))
            .text(field.label())
            .child(
                input
                    .attr("name", field.as_str())
                    .attr("placeholder", field.placeholder())
                    .attr("required", "required"),
            )
    });

    let mut submit = el("button")
        .attr("type", "submit")
        .animated(&nth(&s.contact_form, 3))
        .text(form.button_label());
    if form.submit_disabled() {
        submit = submit.attr("disabled", "disabled");
    }

    let mut form_node = el("form")
        .id("contact-form")
        .children(inputs)
        .child(submit);
    if let Some(banner) = form.success_banner() {
        form_node = form_node.child(el("p").id("contact-success").class("success").text(banner));
    }

    section_shell(SectionId::Contact, s)
        .child(heading("Get In Touch", &s.contact_heading))
        .child(
            el("p")
                .class("subtitle")
                .animated(&s.contact_subtitle)
                .text(info.subtitle.as_str()),
        )
        .child(
            el("div")
                .class("contact-info")
                .child(
                    el("div")
                        .animated(&nth(&s.contact_info, 0))
                        .child(el("h3").text("Contact Information"))
                        .child(
                            el("button")
                                .id("copy-email")
                                .on_click("copy-email")
                                .text(state.copy_label),
                        )
                        .child(el("p").text(info.location.as_str())),
                )
                .child(
                    el("div")
                        .animated(&nth(&s.contact_info, 1))
                        .child(el("h3").text("Connect With Me"))
                        .child(el("div").class("socials").children(socials)),
                ),
        )
        .child(form_node)
        .into()
}

pub fn footer(state: &ViewState<'_>) -> Node {
    let s = &state.styles;
    let content = state.content;
    el("footer")
        .id("footer")
        .child(
            el("div")
                .animated(&nth(&s.footer, 0))
                .child(el("h3").text(content.owner.name.as_str()))
                .child(el("p").text(content.owner.title.as_str())),
        )
        .child(
            el("p")
                .animated(&nth(&s.footer, 1))
                .text(format!("{} ", content.footer.made_with))
                .child(el("span").class("heart").text("\u{2666}"))
                .text(format!(" {}", content.footer.made_with_suffix)),
        )
        .child(
            el("p")
                .animated(&nth(&s.footer, 2))
                .text(format!("\u{a9} {} {}", content.footer.year, content.footer.rights)),
        )
        .child(el("div").class("footer-rule").animated(&s.footer_rule))
        .into()
}

/// The whole document
pub fn page(state: &ViewState<'_>) -> Node {
    let palette = Palette::for_scheme(state.scheme);
    let mut html = el("html").attr("lang", "en");
    if state.scheme.is_dark() {
        html = html.class("dark");
    }
    html.child(
        el("head")
            .child(el("meta").attr("charset", "utf-8"))
            .child(el("title").text(state.content.owner.name.as_str()))
            .child(el("style").text(palette.to_css_block(":root"))),
    )
    .child(
        el("body")
            .child(nav_bar(state))
            .child(theme_toggle(state.scheme))
            .child(hero(state))
            .child(about(state))
            .child(skills(state))
            .child(projects(state))
            .child(experience(state))
            .child(education(state))
            .child(contact(state))
            .child(footer(state)),
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state<'a>(content: &'a Content, form: &'a ContactForm) -> ViewState<'a> {
        ViewState {
            content,
            scheme: ColorScheme::Dark,
            nav_items: Vec::new(),
            scrolled: false,
            form,
            copy_label: "mohithsiddhartht@gmail.com",
            styles: FrameStyles::default(),
        }
    }

    #[test]
    fn test_render_escapes_text_and_attributes() {
        let node: Node = el("p")
            .attr("title", "a \"quoted\" & value")
            .text("1 < 2 & 3")
            .into();
        assert_eq!(
            render_html(&node),
            "<p title=\"a &quot;quoted&quot; &amp; value\">1 &lt; 2 &amp; 3</p>"
        );
    }

    #[test]
    fn test_void_elements_have_no_close_tag() {
        let node: Node = el("input").attr("name", "email").into();
        assert_eq!(render_html(&node), "<input name=\"email\">");
    }

    #[test]
    fn test_empty_style_is_dropped() {
        let element = el("div").animated(&KeyframeProperties::default());
        assert!(element.get_attr("style").is_none());
    }

    #[test]
    fn test_page_marks_dark_root() {
        let content = Content::embedded().unwrap();
        let form = ContactForm::new();
        let dark = page(&state(&content, &form));
        let Node::Element(root) = &dark else {
            panic!("page root must be an element");
        };
        assert_eq!(root.get_attr("class"), Some("dark"));

        let mut light_state = state(&content, &form);
        light_state.scheme = ColorScheme::Light;
        let Node::Element(root) = page(&light_state) else {
            panic!("page root must be an element");
        };
        assert_eq!(root.get_attr("class"), None);
    }

    #[test]
    fn test_every_section_has_its_anchor() {
        let content = Content::embedded().unwrap();
        let form = ContactForm::new();
        let tree = page(&state(&content, &form));
        for id in SectionId::ALL {
            assert!(tree.find_by_id(id.anchor()).is_some(), "missing #{id}");
        }
        assert!(tree.find_by_id("footer").is_some());
    }

    #[test]
    fn test_contact_shows_copy_label_and_no_banner() {
        let content = Content::embedded().unwrap();
        let form = ContactForm::new();
        let tree = page(&state(&content, &form));
        let copy = tree.find_by_id("copy-email").unwrap();
        assert_eq!(
            Node::Element(copy.clone()).text_content(),
            "mohithsiddhartht@gmail.com"
        );
        assert!(tree.find_by_id("contact-success").is_none());
    }
}
