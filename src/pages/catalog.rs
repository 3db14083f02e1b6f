//! Editable sections per content document.
//!
//! Each [`SectionEditor`] knows which slice of its document the form edits,
//! which fields it shows, and how the submitted draft turns back into an
//! update payload for [`crate::content::ContentStore::update`].

use serde_json::{Map, Value};

use crate::content::PageName;
use crate::forms::{FieldDescriptor, FieldKind};

/// How a form's draft maps onto its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Draft is `doc[key]`; payload is `{key: draft}`.
    Section(&'static str),
    /// Draft is `{k: doc[k]}` for each key; payload is the draft itself.
    TopLevel(&'static [&'static str]),
}

/// A list of plain strings edited as a list of single-key objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListAdapter {
    pub field: &'static str,
    pub item_key: &'static str,
}

#[derive(Debug, Clone)]
pub struct SectionEditor {
    pub id: &'static str,
    pub title: String,
    pub fields: Vec<FieldDescriptor>,
    pub binding: Binding,
    pub adapters: Vec<ListAdapter>,
}

impl SectionEditor {
    fn new(id: &'static str, binding: Binding, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            id,
            title: format!("Edit {}", capitalize(id)),
            fields,
            binding,
            adapters: Vec::new(),
        }
    }

    fn section(id: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self::new(id, Binding::Section(id), fields)
    }

    fn top_level(id: &'static str, keys: &'static [&'static str], fields: Vec<FieldDescriptor>) -> Self {
        Self::new(id, Binding::TopLevel(keys), fields)
    }

    fn adapt(mut self, field: &'static str, item_key: &'static str) -> Self {
        self.adapters.push(ListAdapter { field, item_key });
        self
    }

    /// True when this editor writes the document key `key`.
    pub fn covers(&self, key: &str) -> bool {
        match &self.binding {
            Binding::Section(k) => *k == key,
            Binding::TopLevel(keys) => keys.contains(&key),
        }
    }

    /// Slice `doc` into the value the form is seeded with.
    pub fn initial(&self, doc: &Value) -> Value {
        let mut draft = match &self.binding {
            Binding::Section(key) => match doc.get(*key) {
                Some(Value::Object(map)) => map.clone(),
                _ => Map::new(),
            },
            Binding::TopLevel(keys) => keys
                .iter()
                .filter_map(|k| doc.get(*k).map(|v| (k.to_string(), v.clone())))
                .collect(),
        };

        for adapter in &self.adapters {
            if let Some(Value::Array(items)) = draft.get_mut(adapter.field) {
                for item in items.iter_mut() {
                    if let Value::String(s) = item {
                        let mut wrapped = Map::new();
                        wrapped.insert(adapter.item_key.to_string(), Value::String(std::mem::take(s)));
                        *item = Value::Object(wrapped);
                    }
                }
            }
        }
        Value::Object(draft)
    }

    /// Turn a submitted draft into the update payload for the document.
    pub fn payload(&self, draft: Value) -> Value {
        let mut draft = match draft {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        for adapter in &self.adapters {
            if let Some(Value::Array(items)) = draft.get_mut(adapter.field) {
                for item in items.iter_mut() {
                    if let Value::Object(obj) = item {
                        *item = obj.remove(adapter.item_key).unwrap_or_else(|| Value::String(String::new()));
                    }
                }
            }
        }

        match &self.binding {
            Binding::Section(key) => {
                let mut payload = Map::new();
                payload.insert(key.to_string(), Value::Object(draft));
                Value::Object(payload)
            }
            Binding::TopLevel(_) => Value::Object(draft),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

type F = FieldDescriptor;

fn cta_fields(body: &str) -> Vec<FieldDescriptor> {
    vec![
        F::text("title", "Title"),
        F::textarea(body, capitalize(body).as_str()),
        F::text("buttonText", "Button Text"),
    ]
}

/// All editable sections of `page`, in display order.
pub fn editors(page: PageName) -> Vec<SectionEditor> {
    match page {
        PageName::Home => vec![
            SectionEditor::section(
                "hero",
                vec![
                    F::text("title", "Title"),
                    F::textarea("subtitle", "Subtitle"),
                    F::text("buttonText", "Button Text"),
                    F::image("backgroundImage", "Background Image"),
                ],
            ),
            SectionEditor::top_level(
                "stats",
                &["stats"],
                vec![F::array(
                    "stats",
                    "Stats",
                    vec![F::item("value", "Value (e.g. 150+)"), F::item("label", "Label")],
                )],
            ),
        ],
        PageName::Service => vec![
            SectionEditor::top_level(
                "services",
                &["services"],
                vec![F::array(
                    "services",
                    "Services",
                    vec![
                        F::item("title", "Service Title"),
                        F::item("desc", "Description").with_kind(FieldKind::Textarea),
                        F::item("image", "Image URL").with_kind(FieldKind::Image),
                    ],
                )],
            ),
            SectionEditor::section("cta", cta_fields("description")),
        ],
        PageName::Project => vec![SectionEditor::top_level(
            "projects",
            &["projects"],
            vec![F::array(
                "projects",
                "Projects",
                vec![
                    F::item("title", "Project Title"),
                    F::item("company", "Company"),
                    F::item("client", "Client"),
                    F::item("year", "Year"),
                    F::item("nature", "Nature of Work"),
                    F::item("image", "Image URL").with_kind(FieldKind::Image),
                    F::item("progress", "Progress (%)"),
                    F::select("status", "", &["running", "completed"])
                        .with_placeholder("Status")
                        .with_default("completed"),
                ],
            )],
        )],
        PageName::Certificate => vec![
            SectionEditor::section(
                "hero",
                vec![F::text("title", "Title"), F::text("subtitle", "Subtitle")],
            ),
            SectionEditor::top_level(
                "certificates",
                &["certificates"],
                vec![F::array(
                    "certificates",
                    "Certificates",
                    vec![
                        F::item("image", "Certificate Image URL").with_kind(FieldKind::Image),
                        F::item("title", "Certificate Title"),
                        F::item("description", "Description"),
                        F::item("issuedBy", "Issued By"),
                        F::item("issuedDate", "Issued Date (Year)"),
                    ],
                )],
            ),
        ],
        PageName::Contact => vec![
            SectionEditor::section(
                "hero",
                vec![F::text("title", "Hero Title"), F::textarea("description", "Hero Description")],
            ),
            SectionEditor::section(
                "contactInfo",
                vec![
                    F::text("phone1", "Primary Phone"),
                    F::text("phone2", "Secondary Phone"),
                    F::text("email", "Email"),
                    F::textarea("address", "Registered Office"),
                    F::textarea("regionalOffice", "Regional Office"),
                ],
            ),
        ],
        PageName::Career => vec![
            SectionEditor::section(
                "hero",
                vec![F::text("title", "Title"), F::textarea("description", "Description")],
            ),
            SectionEditor::section(
                "whyWork",
                vec![
                    F::text("title", "Section Title"),
                    F::array("points", "Benefits", vec![F::item("point", "Benefit Point")]),
                ],
            )
            .adapt("points", "point"),
        ],
        PageName::Resources => vec![
            SectionEditor::top_level(
                "items",
                &["items"],
                vec![F::array(
                    "items",
                    "Resources",
                    vec![
                        F::item("name", "Name"),
                        F::item("type", "Type (TOOL/EQUIPMENT)"),
                        F::item("quantity", "Quantity"),
                        // untagged: picked up as an image by name
                        F::item("image", "Image URL"),
                    ],
                )],
            ),
            SectionEditor::section(
                "cta",
                vec![
                    F::text("title", "Title"),
                    F::textarea("subtitle", "Subtitle"),
                    F::text("buttonText", "Button Text"),
                    F::text("buttonLink", "Button Link"),
                ],
            ),
        ],
        PageName::Workforce => {
            let team = |count_hint: &str| {
                vec![
                    F::text("title", "Title"),
                    F::textarea("description", "Description"),
                    F::text("count", &format!("Count (e.g., {count_hint})")),
                    F::text("subtitle", "Subtitle"),
                ]
            };
            vec![
                SectionEditor::section("indirect", team("154+")),
                SectionEditor::section("direct", team("2,250+")),
                SectionEditor::section(
                    "cta",
                    vec![
                        F::text("title", "Title"),
                        F::textarea("subtitle", "Subtitle"),
                        F::text("buttonText", "Button Text"),
                        F::text("buttonLink", "Button Link"),
                    ],
                ),
            ]
        }
        PageName::Ehs => vec![
            SectionEditor::section(
                "hero",
                vec![F::image("image", "Hero Image"), F::text("title", "Title")],
            ),
            SectionEditor::section(
                "content",
                vec![
                    F::text("title", "Content Title"),
                    F::array(
                        "bulletPoints",
                        "Bullet Points",
                        vec![F::item("text", "Bullet point text")],
                    ),
                ],
            )
            .adapt("bulletPoints", "text"),
            SectionEditor::section(
                "achievements",
                vec![
                    F::text("title", "Section Title"),
                    F::array(
                        "images",
                        "Achievement Images",
                        vec![F::item("url", "Image URL").with_kind(FieldKind::Image)],
                    ),
                ],
            )
            .adapt("images", "url"),
            SectionEditor::top_level(
                "teamPhotos",
                &["teamPhotos"],
                vec![F::array(
                    "teamPhotos",
                    "Team Photos",
                    vec![F::item("url", "Image URL").with_kind(FieldKind::Image)],
                )],
            )
            .adapt("teamPhotos", "url"),
        ],
        PageName::Layout => vec![
            SectionEditor::section(
                "header",
                vec![
                    F::image("logo", "Logo URL"),
                    F::text("brandName", "Brand Name"),
                    F::text("phone", "Phone Number"),
                    F::text("quoteButtonText", "Quote Button Text"),
                ],
            ),
            SectionEditor::section(
                "footer",
                vec![
                    F::image("logo", "Logo URL"),
                    F::text("brandName", "Brand Name"),
                    F::text("companyName", "Company Name"),
                    F::textarea("address", "Address"),
                    F::text("mailLoginText", "Mail Login Text"),
                    F::text("copyrightText", "Copyright Text"),
                    F::text("designedByText", "Designed By Text"),
                    F::text("designedByLink", "Designed By Link"),
                    F::object(
                        "contactInfo",
                        "Contact Info",
                        vec![
                            F::text("phone1", "Phone 1"),
                            F::text("phone2", "Phone 2"),
                            F::text("email", "Email"),
                            F::text("socialHandle", "Social Handle"),
                        ],
                    ),
                ],
            ),
        ],
        PageName::About
        | PageName::Mission
        | PageName::Management
        | PageName::Gallery => Vec::new(),
    }
}

pub fn find(page: PageName, id: &str) -> Option<SectionEditor> {
    editors(page).into_iter().find(|e| e.id == id)
}

/// Editor that writes the document key `key`, if any.
pub fn editor_for_key(page: PageName, key: &str) -> Option<SectionEditor> {
    editors(page).into_iter().find(|e| e.covers(key))
}
