//! Section editing on top of the form engine: open a section's form, apply
//! edits, save it back to its document, upload images into it.
//!
//! Shared by the admin HTML pages and the JSON API. Every step takes the
//! registry lock only for the synchronous transition; the save and the
//! upload run with it released.

use serde_json::Value;

use super::catalog::{self, SectionEditor};
use crate::content::{ContentStore, PageName};
use crate::errors::AppError;
use crate::forms::{DraftOp, EditSessions, EditSlot, FormError, ImageTarget};
use crate::uploads::UploadStore;

/// A begun save or upload. If the request driving it goes away before
/// `settle` runs, dropping the guard settles it as cancelled so the form
/// returns to Open instead of staying busy.
struct InFlight<'a, T> {
    edits: &'a EditSessions,
    key: &'a str,
    ticket: Option<T>,
    abandon: fn(&mut EditSlot, T),
}

impl<'a, T> InFlight<'a, T> {
    fn new(edits: &'a EditSessions, key: &'a str, ticket: T, abandon: fn(&mut EditSlot, T)) -> Self {
        Self { edits, key, ticket: Some(ticket), abandon }
    }

    fn settle<R>(mut self, f: impl FnOnce(&mut EditSlot, T) -> R) -> Option<R> {
        let ticket = self.ticket.take()?;
        Some(self.edits.with(self.key, |slot| f(slot, ticket)))
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            log::warn!("Edit request dropped while in flight, settling it as cancelled");
            let abandon = self.abandon;
            self.edits.with(self.key, |slot| abandon(slot, ticket));
        }
    }
}

/// Open the form for `page`/`section` with a fresh draft from the stored document.
pub async fn open_section(
    edits: &EditSessions,
    store: &ContentStore,
    key: &str,
    page: PageName,
    section: &str,
) -> Result<SectionEditor, AppError> {
    let editor = catalog::find(page, section).ok_or(AppError::NotFound)?;
    let doc = store.get(page).await?;
    let initial = editor.initial(&doc);
    edits.with(key, |slot| {
        slot.session.open(editor.fields.clone(), &initial, &editor.title)?;
        slot.target = Some((page, editor.id.to_string()));
        Ok::<_, AppError>(())
    })?;
    log::info!("Opened {page}/{section} for editing");
    Ok(editor)
}

/// True when the open form of `key` edits `page`/`section`.
pub fn is_editing(edits: &EditSessions, key: &str, page: PageName, section: &str) -> bool {
    edits.with(key, |slot| {
        slot.session.is_open()
            && slot.target.as_ref().is_some_and(|(p, s)| *p == page && s == section)
    })
}

/// Apply `ops` in order, stopping at the first failure. Ops before the
/// failing one stay applied.
pub fn apply_ops(edits: &EditSessions, key: &str, ops: &[DraftOp]) -> Result<(), FormError> {
    edits.with(key, |slot| {
        slot.session.edit(|draft| {
            for op in ops {
                op.apply(draft)?;
            }
            Ok(())
        })
    })
}

/// Submit the open draft. On success the form closes and the updated
/// document is returned; on failure the form stays open with its draft.
pub async fn save(
    edits: &EditSessions,
    store: &ContentStore,
    key: &str,
) -> Result<(PageName, Value), AppError> {
    let (ticket, page, editor) = edits.with(key, |slot| {
        let (page, section) = slot.target.clone().ok_or(FormError::NotOpen)?;
        let editor = catalog::find(page, &section).ok_or(AppError::NotFound)?;
        let ticket = slot.session.begin_submit()?;
        Ok::<_, AppError>((ticket, page, editor))
    })?;

    let payload = editor.payload(ticket.payload().clone());
    let cancel = ticket.token().clone();
    let pending = InFlight::new(edits, key, ticket, |slot, ticket| {
        let _ = slot.session.finish_submit(ticket, Err(FormError::Cancelled));
    });
    let result = tokio::select! {
        r = store.update(page, payload) => r.map_err(|e| FormError::Save(e.to_string())),
        _ = cancel.cancelled() => Err(FormError::Cancelled),
    };
    let (outcome, updated) = match result {
        Ok(doc) => (Ok(()), Some(doc)),
        Err(e) => (Err(e), None),
    };

    pending
        .settle(|slot, ticket| {
            let settled = slot.session.finish_submit(ticket, outcome);
            if settled.is_ok() {
                slot.target = None;
            }
            settled
        })
        .ok_or(FormError::StaleResult)??;

    match updated {
        Some(doc) => {
            log::info!("Saved {page}/{}", editor.id);
            Ok((page, doc))
        }
        None => Err(FormError::StaleResult.into()),
    }
}

/// Store an image and write its URL into `target` of the open draft.
pub async fn upload(
    edits: &EditSessions,
    uploads: &UploadStore,
    key: &str,
    target: ImageTarget,
    bytes: &[u8],
    content_type: &str,
) -> Result<String, AppError> {
    let ticket = edits.with(key, |slot| slot.session.begin_upload(target))?;
    let cancel = ticket.token().clone();
    let pending = InFlight::new(edits, key, ticket, |slot, ticket| {
        let _ = slot.session.finish_upload(ticket, Err(FormError::Cancelled));
    });
    let result = tokio::select! {
        r = uploads.store(bytes, content_type) => r.map_err(|e| FormError::Upload(e.to_string())),
        _ = cancel.cancelled() => Err(FormError::Cancelled),
    };
    let url = result.clone().ok();
    pending
        .settle(|slot, ticket| slot.session.finish_upload(ticket, result))
        .ok_or(FormError::StaleResult)??;
    url.ok_or_else(|| FormError::StaleResult.into())
}

/// Discard the open draft.
pub fn cancel(edits: &EditSessions, key: &str) -> Result<(), FormError> {
    edits.with(key, |slot| {
        slot.session.cancel()?;
        slot.target = None;
        Ok(())
    })
}

/// Abort an in-flight save or upload. Returns false when nothing was pending.
pub fn abort(edits: &EditSessions, key: &str) -> bool {
    edits.with(key, |slot| slot.session.abort())
}
