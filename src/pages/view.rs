//! View models built from content documents.
//!
//! Documents have no schema, so rendering is shape-driven: objects become
//! sections, arrays of `{value, label}` become counters, other object arrays
//! become cards, string arrays become galleries or bullet lists.

use serde_json::{Map, Value};

use super::catalog;
use crate::content::PageName;
use crate::countup::{CountUp, format_thousands};
use crate::forms::scalar_text;
use crate::icons::Icon;

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg"];

#[derive(Debug, Clone, PartialEq)]
pub struct LinkView {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconView {
    pub class: &'static str,
    pub glyph: &'static str,
}

impl From<Icon> for IconView {
    fn from(icon: Icon) -> Self {
        Self { class: icon.css_class(), glyph: icon.glyph() }
    }
}

/// A counter. Rendered at its final text; the data attributes let the
/// page script animate it from `start_text`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatView {
    pub label: String,
    pub final_text: String,
    pub start_text: String,
    pub end: String,
    pub prefix: String,
    pub suffix: String,
    pub numeric: bool,
}

impl StatView {
    pub fn new(value: &str, label: &str) -> Self {
        let counter = CountUp::parse(value);
        Self {
            label: label.to_string(),
            final_text: counter.final_text(),
            start_text: counter.start_text(),
            end: counter.end().map(|e| e.to_string()).unwrap_or_default(),
            prefix: counter.prefix().to_string(),
            suffix: counter.suffix().to_string(),
            numeric: counter.is_numeric(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardView {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub icon: Option<IconView>,
    pub badge: Option<String>,
    pub progress: Option<u32>,
    pub meta: Vec<MetaItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditLink {
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionView {
    pub key: String,
    pub is_hero: bool,
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub paragraphs: Vec<String>,
    pub image: Option<String>,
    pub button: Option<LinkView>,
    pub stats: Vec<StatView>,
    pub cards: Vec<CardView>,
    pub gallery: Vec<String>,
    pub bullets: Vec<String>,
    pub facts: Vec<MetaItem>,
    pub edit: Option<EditLink>,
}

/// `"backgroundImage"` -> `"Background Image"`.
pub fn humanize(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else if c == '_' {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

pub fn looks_like_image_path(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub fn is_image_like(key: &str, value: &str) -> bool {
    let key = key.to_ascii_lowercase();
    matches!(key.as_str(), "image" | "img" | "logo" | "url")
        || key.contains("image")
        || looks_like_image_path(value)
}

fn is_scalar(v: &Value) -> bool {
    matches!(v, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn display_scalar(v: &Value) -> String {
    match v {
        Value::Number(n) => n.as_f64().map(format_thousands).unwrap_or_else(|| n.to_string()),
        other => scalar_text(Some(other)),
    }
}

/// Link to the editor that writes `key` of `page`'s document.
pub fn edit_link(page: Option<PageName>, key: &str) -> Option<EditLink> {
    let page = page?;
    catalog::editor_for_key(page, key).map(|editor| EditLink {
        url: format!("/admin/edit/{page}/{}", editor.id),
        label: editor.title,
    })
}

/// Render every top-level key of `doc`, in document order.
///
/// With `edit_page` set, sections that have an editor carry an edit link.
pub fn build_sections(doc: &Value, edit_page: Option<PageName>) -> Vec<SectionView> {
    let Some(map) = doc.as_object() else {
        return Vec::new();
    };
    map.iter()
        .map(|(key, value)| {
            let mut section = build_section(key, value);
            section.edit = edit_link(edit_page, key);
            section
        })
        .collect()
}

pub fn build_section(key: &str, value: &Value) -> SectionView {
    let mut section = SectionView {
        key: key.to_string(),
        is_hero: key == "hero",
        ..SectionView::default()
    };
    match value {
        Value::Object(map) => fill_from_object(&mut section, map),
        Value::Array(items) => {
            section.heading = Some(humanize(key));
            fill_from_array(&mut section, key, items);
        }
        Value::Null => {}
        scalar => section.paragraphs.push(display_scalar(scalar)),
    }
    section
}

fn fill_from_object(section: &mut SectionView, map: &Map<String, Value>) {
    let text = |k: &str| map.get(k).map(|v| scalar_text(Some(v))).filter(|s| !s.is_empty());

    if let Some(count) = text("count") {
        let label = text("subtitle").unwrap_or_default();
        section.stats.push(StatView::new(&count, &label));
    }
    if let Some(label) = text("buttonText") {
        let href = text("buttonLink").unwrap_or_else(|| "/contact".to_string());
        section.button = Some(LinkView { label, href });
    }

    for (k, v) in map {
        match (k.as_str(), v) {
            ("title", _) => section.heading = text("title"),
            ("subtitle", _) if section.stats.is_empty() => section.subheading = text("subtitle"),
            ("count" | "subtitle" | "buttonText" | "buttonLink", _) => {}
            (_, Value::String(s)) if is_image_like(k, s) => {
                if section.image.is_none() && !s.is_empty() {
                    section.image = Some(s.clone());
                }
            }
            ("description" | "desc" | "closingText", Value::String(s)) => {
                section.paragraphs.push(s.clone())
            }
            (_, Value::Array(items)) => fill_from_array(section, k, items),
            (_, Value::Object(inner)) => {
                section.facts.extend(
                    inner
                        .iter()
                        .filter(|(_, v)| is_scalar(v))
                        .map(|(ik, iv)| MetaItem { label: humanize(ik), value: display_scalar(iv) }),
                );
            }
            (_, v) if is_scalar(v) => section.facts.push(MetaItem {
                label: humanize(k),
                value: display_scalar(v),
            }),
            _ => {}
        }
    }
}

fn fill_from_array(section: &mut SectionView, key: &str, items: &[Value]) {
    let all_stats = !items.is_empty()
        && items
            .iter()
            .all(|i| i.get("value").is_some() && i.get("label").is_some());
    if all_stats {
        section.stats.extend(items.iter().map(|i| {
            StatView::new(&scalar_text(i.get("value")), &scalar_text(i.get("label")))
        }));
        return;
    }

    for item in items {
        match item {
            Value::String(s) if looks_like_image_path(s) || key.contains("image") || key.contains("Photo") => {
                section.gallery.push(s.clone())
            }
            Value::String(s) => section.bullets.push(s.clone()),
            Value::Object(obj) => section.cards.push(card_from_object(obj)),
            _ => {}
        }
    }
}

pub fn card_from_object(obj: &Map<String, Value>) -> CardView {
    let mut card = CardView::default();
    for (k, v) in obj {
        let s = scalar_text(Some(v));
        match k.as_str() {
            "title" | "name" if card.title.is_empty() => card.title = s,
            "description" | "desc" => card.description = Some(s).filter(|d| !d.is_empty()),
            "icon" => card.icon = Some(Icon::from_name(&s).into()),
            "status" | "type" => card.badge = Some(s).filter(|b| !b.is_empty()),
            "progress" => card.progress = v.as_f64().or_else(|| s.trim().parse().ok()).map(|p| p.clamp(0.0, 100.0) as u32),
            _ if is_scalar(v) && is_image_like(k, &s) => {
                if card.image.is_none() && !s.is_empty() {
                    card.image = Some(s);
                }
            }
            _ if is_scalar(v) => card.meta.push(MetaItem { label: humanize(k), value: display_scalar(v) }),
            _ => {}
        }
    }
    card
}

/// Header and footer, from the `layout` document.
#[derive(Debug, Clone, Default)]
pub struct LayoutView {
    pub logo: String,
    pub brand_name: String,
    pub phone: String,
    pub quote_button_text: String,
    pub company_name: String,
    pub address: String,
    pub mail_login_text: String,
    pub contact: Vec<MetaItem>,
    pub copyright_text: String,
    pub designed_by_text: String,
    pub designed_by_link: String,
}

impl LayoutView {
    pub fn from_doc(layout: &Value) -> Self {
        let header = |k: &str| scalar_text(layout.get("header").and_then(|h| h.get(k)));
        let footer = |k: &str| scalar_text(layout.get("footer").and_then(|f| f.get(k)));
        let contact = layout
            .get("footer")
            .and_then(|f| f.get("contactInfo"))
            .and_then(Value::as_object)
            .map(|info| {
                info.iter()
                    .filter(|(_, v)| is_scalar(v) && !scalar_text(Some(v)).is_empty())
                    .map(|(k, v)| MetaItem { label: humanize(k), value: scalar_text(Some(v)) })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            logo: header("logo"),
            brand_name: header("brandName"),
            phone: header("phone"),
            quote_button_text: header("quoteButtonText"),
            company_name: footer("companyName"),
            address: footer("address"),
            mail_login_text: footer("mailLoginText"),
            contact,
            copyright_text: footer("copyrightText"),
            designed_by_text: footer("designedByText"),
            designed_by_link: footer("designedByLink"),
        }
    }
}

/// Project list filter from `?type=`. Items without a status count as completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFilter {
    All,
    Running,
    Completed,
}

impl ProjectFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("running") => ProjectFilter::Running,
            Some("completed") => ProjectFilter::Completed,
            _ => ProjectFilter::All,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ProjectFilter::All => "All Projects",
            ProjectFilter::Running => "Running Projects",
            ProjectFilter::Completed => "Completed Projects",
        }
    }

    pub fn matches(&self, project: &Value) -> bool {
        let status = project.get("status").and_then(Value::as_str).filter(|s| !s.is_empty());
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Running => status == Some("running"),
            ProjectFilter::Completed => status.unwrap_or("completed") == "completed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSummary {
    pub total: usize,
    pub running: usize,
    pub completed: usize,
    pub average_progress: u32,
}

impl ProjectSummary {
    pub fn from_projects(projects: &[Value]) -> Self {
        let status = |p: &Value| p.get("status").and_then(Value::as_str).map(str::to_string);
        let running: Vec<&Value> = projects
            .iter()
            .filter(|p| status(p).as_deref() == Some("running"))
            .collect();
        let completed = projects.iter().filter(|p| ProjectFilter::Completed.matches(p)).count();
        let average_progress = if running.is_empty() {
            0
        } else {
            let sum: f64 = running
                .iter()
                .map(|p| match p.get("progress") {
                    Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
                    Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
                    _ => 0.0,
                })
                .sum();
            (sum / running.len() as f64).round() as u32
        };
        Self { total: projects.len(), running: running.len(), completed, average_progress }
    }
}

/// Items whose name or type contains `query`, case-insensitively.
pub fn search_items<'a>(items: &'a [Value], query: &str) -> Vec<&'a Value> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || ["name", "type"].iter().any(|k| {
                    item.get(*k)
                        .map(|v| scalar_text(Some(v)).to_lowercase().contains(&needle))
                        .unwrap_or(false)
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn humanize_splits_camel_case() {
        assert_eq!(humanize("backgroundImage"), "Background Image");
        assert_eq!(humanize("hero"), "Hero");
        assert_eq!(humanize("issued_by"), "Issued by");
    }

    #[test]
    fn stats_array_becomes_counters() {
        let section = build_section("stats", &json!([{"value": "2,500+", "label": "Workers"}]));
        assert_eq!(section.stats.len(), 1);
        assert_eq!(section.stats[0].final_text, "2,500+");
        assert_eq!(section.stats[0].start_text, "0+");
        assert!(section.cards.is_empty());
    }

    #[test]
    fn string_lists_split_into_gallery_and_bullets() {
        let gallery = build_section("images", &json!(["/a.jpg", "/b.png"]));
        assert_eq!(gallery.gallery, vec!["/a.jpg", "/b.png"]);
        let bullets = build_section("content", &json!({"title": "T", "bulletPoints": ["one", "two"]}));
        assert_eq!(bullets.heading.as_deref(), Some("T"));
        assert_eq!(bullets.bullets, vec!["one", "two"]);
    }

    #[test]
    fn object_section_picks_out_heading_image_and_button() {
        let section = build_section(
            "hero",
            &json!({"title": "Hi", "subtitle": "Sub", "buttonText": "Go", "backgroundImage": "/bg.jpg"}),
        );
        assert!(section.is_hero);
        assert_eq!(section.heading.as_deref(), Some("Hi"));
        assert_eq!(section.subheading.as_deref(), Some("Sub"));
        assert_eq!(section.image.as_deref(), Some("/bg.jpg"));
        assert_eq!(section.button, Some(LinkView { label: "Go".into(), href: "/contact".into() }));
    }

    #[test]
    fn count_sections_render_a_counter() {
        let section = build_section("direct", &json!({"title": "Direct", "count": "1,200+", "subtitle": "Workers"}));
        assert_eq!(section.stats[0].label, "Workers");
        assert_eq!(section.subheading, None);
    }

    #[test]
    fn cards_resolve_icons_with_default() {
        let card = card_from_object(json!({"title": "A", "icon": "Nope"}).as_object().unwrap());
        assert_eq!(card.icon, Some(IconView::from(Icon::Trophy)));
    }

    #[test]
    fn project_filter_defaults_missing_status_to_completed() {
        let projects = vec![json!({"status": "running"}), json!({}), json!({"status": "completed"})];
        let completed = projects.iter().filter(|p| ProjectFilter::Completed.matches(p)).count();
        assert_eq!(completed, 2);
        assert_eq!(ProjectFilter::parse(Some("RUNNING")), ProjectFilter::Running);
        assert_eq!(ProjectFilter::parse(Some("other")), ProjectFilter::All);
    }

    #[test]
    fn project_summary_averages_running_progress() {
        let projects = vec![
            json!({"status": "running", "progress": 40}),
            json!({"status": "running", "progress": "61"}),
            json!({"status": "completed", "progress": 100}),
        ];
        let summary = ProjectSummary::from_projects(&projects);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.running, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.average_progress, 51);
    }

    #[test]
    fn search_matches_name_or_type() {
        let items = vec![
            json!({"name": "Scaffolding Pipe", "type": "EQUIPMENT"}),
            json!({"name": "Ladder", "type": "TOOL"}),
        ];
        assert_eq!(search_items(&items, "pipe").len(), 1);
        assert_eq!(search_items(&items, "tool").len(), 1);
        assert_eq!(search_items(&items, "").len(), 2);
    }

    #[test]
    fn edit_links_only_for_sections_with_editors() {
        let doc = json!({"hero": {"title": "x"}, "features": {"title": "y"}});
        let sections = build_sections(&doc, Some(PageName::Home));
        assert_eq!(
            sections[0].edit.as_ref().map(|e| e.url.as_str()),
            Some("/admin/edit/homepage/hero")
        );
        assert!(sections[1].edit.is_none());
        assert!(build_sections(&doc, None)[0].edit.is_none());
    }
}
