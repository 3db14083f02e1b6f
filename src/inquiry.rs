//! Visitor-facing forms: contact, career application, quote request, feedback.
//!
//! Submissions are validated and acknowledged; nothing is delivered anywhere,
//! the handler only logs what arrived.

use crate::auth::validate;

pub const QUOTE_SERVICES: &[&str] = &[
    "FGD (Flue Gas Desulfurization)",
    "Mechanical Work",
    "Electrical Work",
    "Civil Work",
    "Commissioning",
    "Other",
];

pub const CONCERN_TYPES: &[&str] = &[
    "Violation of Company Policy",
    "Violation in Site Execution / FQP / EHS",
    "Fraud / Financial Misconduct",
    "Workplace Harassment / Discrimination",
    "Safety & Security Concern",
    "Legal / Regulatory Non-Compliance",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Textarea,
    Select(&'static [&'static str]),
    Checkboxes(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct InquiryField {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, input: InputKind, required: bool) -> InquiryField {
    InquiryField { name, label, input, required }
}

const CONTACT_FIELDS: &[InquiryField] = &[
    field("name", "Full Name", InputKind::Text, true),
    field("email", "Email Address", InputKind::Email, true),
    field("phone", "Phone Number", InputKind::Tel, true),
    field("subject", "Subject", InputKind::Text, true),
    field("message", "Message", InputKind::Textarea, true),
];

const CAREER_FIELDS: &[InquiryField] = &[
    field("name", "Full Name", InputKind::Text, true),
    field("email", "Email Address", InputKind::Email, true),
    field("phone", "Phone Number", InputKind::Tel, true),
    field("message", "Cover Letter", InputKind::Textarea, true),
];

const QUOTE_FIELDS: &[InquiryField] = &[
    field("name", "Full Name", InputKind::Text, true),
    field("email", "Email Address", InputKind::Email, true),
    field("phone", "Phone Number", InputKind::Tel, true),
    field("service", "Service Required", InputKind::Select(QUOTE_SERVICES), true),
    field("message", "Project Details", InputKind::Textarea, true),
];

const FEEDBACK_FIELDS: &[InquiryField] = &[
    field("name", "Full Name", InputKind::Text, true),
    field("employeeCode", "Employee Code", InputKind::Text, false),
    field("department", "Department", InputKind::Text, false),
    field("email", "Email Address", InputKind::Email, true),
    field("concernTypes", "Nature of Concern", InputKind::Checkboxes(CONCERN_TYPES), true),
    field("otherConcern", "Other Concern", InputKind::Text, false),
    field("message", "Details", InputKind::Textarea, true),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryKind {
    Contact,
    Career,
    Quote,
    Feedback,
}

impl InquiryKind {
    pub fn fields(&self) -> &'static [InquiryField] {
        match self {
            InquiryKind::Contact => CONTACT_FIELDS,
            InquiryKind::Career => CAREER_FIELDS,
            InquiryKind::Quote => QUOTE_FIELDS,
            InquiryKind::Feedback => FEEDBACK_FIELDS,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            InquiryKind::Contact => "/contact",
            InquiryKind::Career => "/career",
            InquiryKind::Quote => "/quote",
            InquiryKind::Feedback => "/feedback",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            InquiryKind::Contact => "Send us a message",
            InquiryKind::Career => "Apply now",
            InquiryKind::Quote => "Request a quote",
            InquiryKind::Feedback => "Report a concern",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            InquiryKind::Contact => "Message sent successfully! We will get back to you soon.",
            InquiryKind::Career => {
                "Application submitted successfully! Our team will contact you soon."
            }
            InquiryKind::Quote => {
                "Quote request submitted successfully! We will contact you shortly."
            }
            InquiryKind::Feedback => "Feedback sent successfully!",
        }
    }

    pub fn validate(&self, submission: &Submission) -> Vec<String> {
        let mut errors = Vec::new();
        for f in self.fields() {
            let value = submission.get(f.name);
            match f.input {
                InputKind::Email => errors.extend(validate::validate_email(value)),
                InputKind::Tel => errors.extend(validate::validate_phone(value)),
                InputKind::Select(options) => {
                    errors.extend(validate::validate_choice(value, f.label, options))
                }
                InputKind::Checkboxes(options) => {
                    let picked = submission.all(f.name);
                    if f.required && picked.is_empty() {
                        errors.push(format!("Select at least one {}", f.label.to_lowercase()));
                    }
                    if picked.iter().any(|p| !options.contains(p)) {
                        errors.push(format!("{} contains an unknown option", f.label));
                    }
                }
                InputKind::Textarea => errors.extend(if f.required {
                    validate::validate_required(value, f.label, 5000)
                } else {
                    validate::validate_optional(value, f.label, 5000)
                }),
                InputKind::Text => errors.extend(if f.required {
                    validate::validate_required(value, f.label, 200)
                } else {
                    validate::validate_optional(value, f.label, 200)
                }),
            }
        }
        errors
    }
}

/// Posted form values in submission order; repeated keys are kept.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    values: Vec<(String, String)>,
}

impl Submission {
    pub fn new(values: Vec<(String, String)>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> &str {
        self.values
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn all(&self, name: &str) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(k, v)| k == name && !v.is_empty())
            .map(|(_, v)| v.as_str())
            .collect()
    }
}
