//! Session Store Port - concurrency-safe mapping from identity to session.
//!
//! Lookups never block on upstream I/O: the store is purely in-memory and
//! its locks are never held across an `.await`.
//!
//! # Consistency
//!
//! The store guarantees one session object per identity, even when two
//! first events for a new identity race. It does not serialize whole event
//! handling: the engine works on a snapshot and commits it at the end, so
//! two events for the same identity handled concurrently are resolved by
//! last commit wins. This is an accepted weak-consistency trade-off for a
//! single-process chat session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::dialogue::Session;
use crate::domain::foundation::{Identity, Timestamp};

/// Shared pointer to one identity's session.
#[derive(Debug, Clone)]
pub struct SessionHandle(Arc<Mutex<Session>>);

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    /// Replaces the stored session with `session`.
    pub fn commit(&self, session: Session) {
        *self.lock() = session;
    }

    /// Returns true while another holder, such as an event being handled,
    /// keeps a clone of this handle.
    pub fn is_in_use(&self) -> bool {
        Arc::strong_count(&self.0) > 1
    }

    /// Returns true if both handles point at the same session object.
    pub fn same_session(&self, other: &SessionHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    // A panic while holding the guard cannot leave a Session half-written:
    // mutation happens on snapshots, the guard only swaps whole values.
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Port for session storage.
pub trait SessionStore: Send + Sync {
    /// Returns the session for `identity`, creating an idle one on first access.
    fn session(&self, identity: Identity) -> SessionHandle;

    /// Returns the session for `identity` without creating it.
    fn get(&self, identity: Identity) -> Option<SessionHandle>;

    /// Drops the session for `identity`. Returns true if one existed.
    fn remove(&self, identity: Identity) -> bool;

    /// Drops every session not mutated since `cutoff` and not held by an
    /// in-flight event. Returns how many.
    fn evict_idle(&self, cutoff: Timestamp) -> usize;

    /// Number of live sessions.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
