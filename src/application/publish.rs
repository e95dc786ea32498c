//! Publish state synchronization
//!
//! A local publish toggle is applied to the note right away and then held open
//! until the sync service reports the authoritative state for that note. Each
//! open request is a one-shot listener keyed by note identifier.

use crate::domain::{validate_identifier, Note, NoteHandle, PublishState};
use crate::error::Result;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace, warn};

type PublishCallback = Box<dyn FnOnce(&Note) + Send>;

/// A pending request waiting for its confirmation
struct PublishListener {
    note: NoteHandle,
    on_complete: PublishCallback,
}

/// Outcome of a publish state change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishRequest {
    /// The note already had the requested state; nothing was registered
    Unchanged,
    /// The note was updated locally and a listener awaits confirmation
    Pending,
}

/// Tracks publish requests until the sync service confirms them.
///
/// Holds at most one listener per note identifier. A newer request for the same
/// identifier replaces the older listener, whose callback is dropped unfired.
#[derive(Default)]
pub struct PublishController {
    listeners: Mutex<HashMap<String, PublishListener>>,
}

impl PublishController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that `note` become published (or unpublished).
    ///
    /// The note is updated optimistically and its public URL cleared until the
    /// sync service confirms. `on_complete` runs once, with the confirmed note,
    /// when `did_receive_update` is called for this note's identifier.
    ///
    /// Requesting the state the note already has is a no-op: no listener is
    /// registered and `on_complete` is dropped without being called.
    pub fn update_publish_state<F>(
        &self,
        note: &NoteHandle,
        published: bool,
        on_complete: F,
    ) -> Result<PublishRequest>
    where
        F: FnOnce(&Note) + Send + 'static,
    {
        let identifier = {
            let mut note = lock(note);
            validate_identifier(&note.identifier)?;

            if note.published == published {
                trace!(note = %note.identifier, published, "publish state unchanged");
                return Ok(PublishRequest::Unchanged);
            }

            note.published = published;
            note.publish_url.clear();
            note.touch();
            note.identifier.clone()
        };

        let listener = PublishListener {
            note: NoteHandle::clone(note),
            on_complete: Box::new(on_complete),
        };

        let mut listeners = lock(&self.listeners);
        if listeners.insert(identifier.clone(), listener).is_some() {
            warn!(note = %identifier, "superseding pending publish request");
        }
        debug!(note = %identifier, published, "awaiting publish confirmation");

        Ok(PublishRequest::Pending)
    }

    /// Deliver the sync service's view of a note.
    ///
    /// When a listener is registered for `identifier` it is removed, the
    /// confirmed state is applied to its note and the callback runs with a
    /// snapshot of the updated note. Returns whether a listener was resolved;
    /// updates for notes with no pending request are ignored.
    pub fn did_receive_update(&self, identifier: &str, published: bool, url: &str) -> bool {
        let listener = lock(&self.listeners).remove(identifier);

        let Some(listener) = listener else {
            trace!(note = %identifier, "no pending publish request for update");
            return false;
        };

        let snapshot = {
            let mut note = lock(&listener.note);
            if note.published != published {
                warn!(
                    note = %identifier,
                    requested = note.published,
                    confirmed = published,
                    "sync service overrode requested publish state"
                );
            }
            note.published = published;
            note.publish_url = url.to_string();
            note.clone()
        };

        debug!(note = %identifier, published, url, "publish state confirmed");
        (listener.on_complete)(&snapshot);
        true
    }

    /// Whether a request for `identifier` is awaiting confirmation
    pub fn is_pending(&self, identifier: &str) -> bool {
        lock(&self.listeners).contains_key(identifier)
    }

    pub fn pending_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    /// Identifiers with a request awaiting confirmation, sorted
    pub fn pending_identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = lock(&self.listeners).keys().cloned().collect();
        identifiers.sort();
        identifiers
    }

    /// Logical publish state of `note` as seen by this controller
    pub fn publish_state(&self, note: &Note) -> PublishState {
        PublishState::derive(note.published, self.is_pending(&note.identifier))
    }
}

impl fmt::Debug for PublishController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishController")
            .field("pending", &self.pending_identifiers())
            .finish()
    }
}

// A panicking callback must not wedge every later request.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
