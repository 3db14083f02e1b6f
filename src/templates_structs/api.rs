use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::forms::{EditSession, FieldDescriptor, FormState};

/// Error response for API endpoints.
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ApiLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct ApiTokenResponse {
    pub token: String,
}

#[derive(Serialize, Debug)]
pub struct ApiVerifyResponse {
    pub valid: bool,
}

#[derive(Serialize, Debug)]
pub struct ApiUploadResponse {
    pub url: String,
}

/// Query of `POST /api/v1/edit/upload`: a top-level image field, or with
/// `index` and `sub` an image sub-field of an array item.
#[derive(Deserialize, Debug)]
pub struct ApiUploadTarget {
    pub field: String,
    pub index: Option<usize>,
    pub sub: Option<String>,
}

/// Snapshot of an admin's edit session.
#[derive(Serialize, Debug)]
pub struct ApiEditState {
    pub state: FormState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub title: String,
    pub uploading: bool,
    pub fields: Vec<FieldDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiEditState {
    pub fn new(session: &EditSession, target: Option<(String, String)>) -> Self {
        let (page, section) = match target {
            Some((p, s)) => (Some(p), Some(s)),
            None => (None, None),
        };
        Self {
            state: session.state(),
            page,
            section,
            title: session.title().to_string(),
            uploading: session.is_uploading(),
            fields: session.draft().map(|d| d.fields().to_vec()).unwrap_or_default(),
            draft: session.draft().map(|d| d.to_value()),
            error: session.last_error().map(str::to_string),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ApiSaveResponse {
    pub page: String,
    pub document: Value,
}

#[derive(Serialize, Debug)]
pub struct ApiAbortResponse {
    pub aborted: bool,
}
