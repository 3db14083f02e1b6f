//! Descriptor-driven edit forms.
//!
//! A form is described at open time by a list of [`FieldDescriptor`]s and
//! edited through a [`FormDraft`]. [`EditSession`] owns the draft and runs the
//! open, submit, cancel and upload lifecycle around it. [`EditSessions`] keeps one
//! session per signed-in admin.

mod draft;
mod field;
mod ops;
mod registry;
mod session;

pub use draft::{FormDraft, ImageTarget};
pub(crate) use draft::scalar_text;
pub use field::{FieldDescriptor, FieldKind, ItemWidget};
pub use ops::DraftOp;
pub use registry::{EditSessions, EditSlot};
pub use session::{EditSession, FormState, SubmitTicket, UploadTicket};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    UnknownField(String),
    UnknownSubField { field: String, sub: String },
    WrongKind { field: String, expected: &'static str },
    IndexOutOfRange { field: String, index: usize, len: usize },
    InvalidOption { field: String, value: String },
    NotOpen,
    Busy(&'static str),
    StaleResult,
    Cancelled,
    Save(String),
    Upload(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::UnknownField(name) => write!(f, "Unknown field '{name}'"),
            FormError::UnknownSubField { field, sub } => {
                write!(f, "Field '{field}' has no sub-field '{sub}'")
            }
            FormError::WrongKind { field, expected } => {
                write!(f, "Field '{field}' is not an {expected} field")
            }
            FormError::IndexOutOfRange { field, index, len } => {
                write!(f, "Item {index} out of range for '{field}' ({len} items)")
            }
            FormError::InvalidOption { field, value } => {
                write!(f, "'{value}' is not an option of '{field}'")
            }
            FormError::NotOpen => write!(f, "No form is open"),
            FormError::Busy(what) => write!(f, "The {what} is still in progress"),
            FormError::StaleResult => write!(f, "Result belongs to a form that was closed"),
            FormError::Cancelled => write!(f, "Operation cancelled"),
            FormError::Save(e) => write!(f, "Failed to save: {e}"),
            FormError::Upload(e) => write!(f, "Failed to upload image: {e}"),
        }
    }
}

impl std::error::Error for FormError {}
