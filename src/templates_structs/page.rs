use askama::Template;

use super::SiteContext;
use crate::inquiry::{InputKind, InquiryKind, Submission};
use crate::pages::view::{CardView, EditLink, ProjectSummary, SectionView};

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub ctx: SiteContext,
    pub title: String,
    pub sections: Vec<SectionView>,
    pub projects: Option<ProjectsView>,
    pub listing: Option<ListingView>,
    pub inquiry: Option<InquiryFormView>,
}

/// `/projects`: filtered cards plus counts over all projects.
pub struct ProjectsView {
    pub heading: String,
    pub summary: ProjectSummary,
    pub cards: Vec<CardView>,
    pub edit: Option<EditLink>,
}

/// Searchable item grid (`/plant`, `/resources`).
pub struct ListingView {
    pub action: String,
    pub query: String,
    pub cards: Vec<CardView>,
    pub edit: Option<EditLink>,
}

pub struct ChoiceView {
    pub value: String,
    pub selected: bool,
}

pub struct InquiryInputView {
    pub name: String,
    pub label: String,
    pub value: String,
    pub required: bool,
    pub input_type: &'static str,
    pub is_textarea: bool,
    pub is_select: bool,
    pub is_checkboxes: bool,
    pub choices: Vec<ChoiceView>,
}

pub struct InquiryFormView {
    pub heading: String,
    pub action: String,
    pub inputs: Vec<InquiryInputView>,
    pub errors: Vec<String>,
}

impl InquiryFormView {
    /// Form for `kind`, refilled from `submission` after a failed attempt.
    pub fn new(kind: InquiryKind, submission: &Submission, errors: Vec<String>) -> Self {
        let inputs = kind
            .fields()
            .iter()
            .map(|f| {
                let value = submission.get(f.name).to_string();
                let picked = submission.all(f.name);
                let choices = |options: &[&str]| -> Vec<ChoiceView> {
                    options
                        .iter()
                        .map(|o| ChoiceView {
                            value: o.to_string(),
                            selected: picked.contains(o) || value == *o,
                        })
                        .collect()
                };
                let (input_type, choices) = match f.input {
                    InputKind::Text | InputKind::Textarea => ("text", Vec::new()),
                    InputKind::Email => ("email", Vec::new()),
                    InputKind::Tel => ("tel", Vec::new()),
                    InputKind::Select(options) | InputKind::Checkboxes(options) => {
                        ("text", choices(options))
                    }
                };
                InquiryInputView {
                    name: f.name.to_string(),
                    label: f.label.to_string(),
                    value,
                    required: f.required,
                    input_type,
                    is_textarea: f.input == InputKind::Textarea,
                    is_select: matches!(f.input, InputKind::Select(_)),
                    is_checkboxes: matches!(f.input, InputKind::Checkboxes(_)),
                    choices,
                }
            })
            .collect();

        Self {
            heading: kind.heading().to_string(),
            action: kind.path().to_string(),
            inputs,
            errors,
        }
    }
}
