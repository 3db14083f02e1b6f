use serde::{Deserialize, Serialize};

use super::{FormDraft, FormError};

/// One edit against an open draft, as sent by API clients or decoded from
/// posted HTML form keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DraftOp {
    Set { field: String, value: String },
    SetObject { field: String, sub: String, value: String },
    AddItem { field: String },
    RemoveItem { field: String, index: usize },
    SetItem { field: String, index: usize, sub: String, value: String },
}

impl DraftOp {
    pub fn apply(&self, draft: &mut FormDraft) -> Result<(), FormError> {
        match self {
            DraftOp::Set { field, value } => draft.set_field(field, value),
            DraftOp::SetObject { field, sub, value } => draft.set_object_field(field, sub, value),
            DraftOp::AddItem { field } => draft.add_item(field).map(|_| ()),
            DraftOp::RemoveItem { field, index } => draft.remove_item(field, *index).map(|_| ()),
            DraftOp::SetItem { field, index, sub, value } => {
                draft.set_item_field(field, *index, sub, value)
            }
        }
    }

    /// Decode a posted form key: `f.<field>`, `f.<field>.<sub>` or
    /// `f.<field>.<index>.<sub>`. Other keys are not draft values.
    pub fn from_form_key(key: &str, value: &str) -> Option<Self> {
        let path = key.strip_prefix("f.")?;
        let parts: Vec<&str> = path.split('.').collect();
        let value = value.to_string();
        match parts.as_slice() {
            [field] if !field.is_empty() => Some(DraftOp::Set { field: field.to_string(), value }),
            [field, sub] => Some(DraftOp::SetObject {
                field: field.to_string(),
                sub: sub.to_string(),
                value,
            }),
            [field, index, sub] => Some(DraftOp::SetItem {
                field: field.to_string(),
                index: index.parse().ok()?,
                sub: sub.to_string(),
                value,
            }),
            _ => None,
        }
    }

    /// Decode a form button action: `add_item:<field>` or `remove_item:<field>:<index>`.
    pub fn from_action(action: &str) -> Option<Self> {
        if let Some(field) = action.strip_prefix("add_item:") {
            return Some(DraftOp::AddItem { field: field.to_string() });
        }
        let rest = action.strip_prefix("remove_item:")?;
        let (field, index) = rest.rsplit_once(':')?;
        Some(DraftOp::RemoveItem { field: field.to_string(), index: index.parse().ok()? })
    }
}
