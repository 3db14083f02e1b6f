use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::EditSession;
use crate::content::PageName;

/// The edit session of one admin, plus which page section it is editing.
#[derive(Debug, Default)]
pub struct EditSlot {
    pub target: Option<(PageName, String)>,
    pub session: EditSession,
}

/// Edit sessions keyed by admin token.
///
/// The lock is only held for synchronous state transitions; saves and uploads
/// run between `begin_*` and `finish_*` with the lock released.
#[derive(Clone, Default)]
pub struct EditSessions {
    slots: Arc<Mutex<HashMap<String, EditSlot>>>,
}

impl EditSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the slot for `key`, creating an empty one if needed.
    pub fn with<R>(&self, key: &str, f: impl FnOnce(&mut EditSlot) -> R) -> R {
        let mut map = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        f(map.entry(key.to_string()).or_default())
    }

    /// Drop the slot on logout. Anything still in flight is aborted.
    pub fn remove(&self, key: &str) {
        let mut map = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(mut slot) = map.remove(key) {
            slot.session.abort();
        }
    }

    /// Keep only the slots whose key passes `keep`; dropped slots are aborted.
    /// Returns how many were dropped.
    pub fn retain(&self, keep: impl Fn(&str) -> bool) -> usize {
        let mut map = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let before = map.len();
        map.retain(|key, slot| {
            let kept = keep(key);
            if !kept {
                slot.session.abort();
            }
            kept
        });
        before - map.len()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
