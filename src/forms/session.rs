use std::fmt;
use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::{FieldDescriptor, FormDraft, FormError, ImageTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    Closed,
    Open,
    Submitting,
}

/// Handed out by [`EditSession::begin_upload`]; redeemed by `finish_upload`.
#[derive(Debug)]
pub struct UploadTicket {
    generation: u64,
    target: ImageTarget,
    token: CancellationToken,
}

impl UploadTicket {
    pub fn target(&self) -> &ImageTarget {
        &self.target
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// Handed out by [`EditSession::begin_submit`]; carries the exact draft being saved.
#[derive(Debug)]
pub struct SubmitTicket {
    generation: u64,
    payload: Value,
    token: CancellationToken,
}

impl SubmitTicket {
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// One editing session: Closed -> Open -> (Submitting -> Closed | Open), or
/// Open -> Closed on cancel.
///
/// At most one upload and one save run at a time, and never both at once.
/// While either is in flight the session cannot be reopened or cancelled;
/// [`EditSession::abort`] is the only way to stop it early.
#[derive(Debug)]
pub struct EditSession {
    state: FormState,
    title: String,
    draft: Option<FormDraft>,
    generation: u64,
    uploading: bool,
    cancel: CancellationToken,
    last_error: Option<String>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            state: FormState::Closed,
            title: String::new(),
            draft: None,
            generation: 0,
            uploading: false,
            cancel: CancellationToken::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != FormState::Closed
    }

    pub fn is_saving(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn draft(&self) -> Option<&FormDraft> {
        self.draft.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Token that aborts whatever save or upload is in flight.
    pub fn abort_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn ensure_idle(&self) -> Result<(), FormError> {
        if self.state == FormState::Submitting {
            return Err(FormError::Busy("save"));
        }
        if self.uploading {
            return Err(FormError::Busy("upload"));
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), FormError> {
        if self.state == FormState::Closed {
            return Err(FormError::NotOpen);
        }
        self.ensure_idle()
    }

    /// Open (or reopen) the form with a fresh draft seeded from `initial`.
    pub fn open(
        &mut self,
        fields: Vec<FieldDescriptor>,
        initial: &Value,
        title: &str,
    ) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.generation += 1;
        self.state = FormState::Open;
        self.title = title.to_string();
        self.draft = Some(FormDraft::seed(fields, initial));
        self.cancel = CancellationToken::new();
        self.last_error = None;
        Ok(())
    }

    /// Apply one field edit to the open draft.
    pub fn edit<R>(
        &mut self,
        f: impl FnOnce(&mut FormDraft) -> Result<R, FormError>,
    ) -> Result<R, FormError> {
        if self.state == FormState::Submitting {
            return Err(FormError::Busy("save"));
        }
        let draft = self.draft.as_mut().ok_or(FormError::NotOpen)?;
        f(draft)
    }

    /// Discard the draft without saving. Refused while a save or upload is pending.
    pub fn cancel(&mut self) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.close();
        Ok(())
    }

    fn close(&mut self) {
        self.state = FormState::Closed;
        self.title.clear();
        self.draft = None;
        self.last_error = None;
    }

    /// Cancel the in-flight save or upload. Returns false when nothing was pending.
    pub fn abort(&mut self) -> bool {
        if self.state == FormState::Submitting || self.uploading {
            self.cancel.cancel();
            true
        } else {
            false
        }
    }

    fn refresh_cancel(&mut self) {
        if self.cancel.is_cancelled() {
            self.cancel = CancellationToken::new();
        }
    }

    pub fn begin_upload(&mut self, target: ImageTarget) -> Result<UploadTicket, FormError> {
        self.ensure_open()?;
        let draft = self.draft.as_ref().ok_or(FormError::NotOpen)?;
        draft.validate_image_target(&target)?;
        self.uploading = true;
        Ok(UploadTicket {
            generation: self.generation,
            target,
            token: self.cancel.child_token(),
        })
    }

    /// Settle an upload. On success the target slot takes the URL; on failure
    /// the draft is left as it was and the error is remembered for display.
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<String, FormError>,
    ) -> Result<(), FormError> {
        if ticket.generation != self.generation {
            return Err(FormError::StaleResult);
        }
        self.uploading = false;
        self.refresh_cancel();

        let outcome = match result {
            Ok(url) => match self.draft.as_mut() {
                Some(draft) => draft.apply_image(&ticket.target, &url),
                None => Err(FormError::NotOpen),
            },
            Err(e @ (FormError::Upload(_) | FormError::Cancelled)) => Err(e),
            Err(other) => Err(FormError::Upload(other.to_string())),
        };
        self.last_error = outcome.as_ref().err().map(|e| e.to_string());
        outcome
    }

    pub async fn upload_image<F, Fut, E>(
        &mut self,
        target: ImageTarget,
        upload: F,
    ) -> Result<(), FormError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<String, E>>,
        E: fmt::Display,
    {
        let ticket = self.begin_upload(target)?;
        let token = ticket.token.clone();
        let result = tokio::select! {
            r = upload(token.clone()) => r.map_err(|e| FormError::Upload(e.to_string())),
            _ = token.cancelled() => Err(FormError::Cancelled),
        };
        self.finish_upload(ticket, result)
    }

    pub fn begin_submit(&mut self) -> Result<SubmitTicket, FormError> {
        self.ensure_open()?;
        let payload = self
            .draft
            .as_ref()
            .map(FormDraft::to_value)
            .ok_or(FormError::NotOpen)?;
        self.state = FormState::Submitting;
        Ok(SubmitTicket {
            generation: self.generation,
            payload,
            token: self.cancel.child_token(),
        })
    }

    /// Settle a save. Success closes the form and returns what was saved;
    /// failure reopens it with the draft intact.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<(), FormError>,
    ) -> Result<Value, FormError> {
        if ticket.generation != self.generation || self.state != FormState::Submitting {
            return Err(FormError::StaleResult);
        }
        self.refresh_cancel();

        match result {
            Ok(()) => {
                self.close();
                Ok(ticket.payload)
            }
            Err(e) => {
                self.state = FormState::Open;
                let e = match e {
                    FormError::Save(_) | FormError::Cancelled => e,
                    other => FormError::Save(other.to_string()),
                };
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Hand the whole draft to `save`, then close on success.
    pub async fn submit<F, Fut, E>(&mut self, save: F) -> Result<Value, FormError>
    where
        F: FnOnce(Value) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: fmt::Display,
    {
        let ticket = self.begin_submit()?;
        let token = ticket.token.clone();
        let result = tokio::select! {
            r = save(ticket.payload.clone()) => r.map_err(|e| FormError::Save(e.to_string())),
            _ = token.cancelled() => Err(FormError::Cancelled),
        };
        self.finish_submit(ticket, result)
    }
}
