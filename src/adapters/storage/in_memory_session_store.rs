//! In-Memory Session Store Adapter
//!
//! Keeps every session in a process-local map. Suitable for the assumed
//! single-process deployment; sessions do not survive restarts.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::dialogue::Session;
use crate::domain::foundation::{Identity, Timestamp};
use crate::ports::{SessionHandle, SessionStore};

/// In-memory session storage.
///
/// The read lock covers the common lookup path; the write lock is taken
/// only to insert on miss, and the entry is re-checked under it so two
/// concurrent first events for one identity share a single session.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Identity, SessionHandle>>,
}

impl InMemorySessionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Identities with a live session, in no particular order.
    pub fn identities(&self) -> Vec<Identity> {
        self.read().keys().copied().collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Identity, SessionHandle>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Identity, SessionHandle>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for InMemorySessionStore {
    fn session(&self, identity: Identity) -> SessionHandle {
        if let Some(handle) = self.read().get(&identity) {
            return handle.clone();
        }

        self.write()
            .entry(identity)
            .or_insert_with(|| {
                tracing::debug!(%identity, "Creating session");
                SessionHandle::new(Session::new(identity))
            })
            .clone()
    }

    fn get(&self, identity: Identity) -> Option<SessionHandle> {
        self.read().get(&identity).cloned()
    }

    fn remove(&self, identity: Identity) -> bool {
        self.write().remove(&identity).is_some()
    }

    fn evict_idle(&self, cutoff: Timestamp) -> usize {
        let mut sessions = self.write();
        let before = sessions.len();
        // The map holds one reference; any other is an event mid-handling
        // that will commit into this handle.
        sessions.retain(|_, handle| {
            handle.is_in_use() || !handle.snapshot().is_idle_since(&cutoff)
        });
        before - sessions.len()
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn creates_session_on_first_access() {
        let store = InMemorySessionStore::new();
        assert!(store.is_empty());

        let handle = store.session(Identity::new(7));
        assert_eq!(handle.snapshot().identity(), Identity::new(7));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn returns_same_session_on_repeat_access() {
        let store = InMemorySessionStore::new();
        let a = store.session(Identity::new(7));
        let b = store.session(Identity::new(7));
        assert!(a.same_session(&b));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_does_not_create() {
        let store = InMemorySessionStore::new();
        assert!(store.get(Identity::new(1)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_drops_session() {
        let store = InMemorySessionStore::new();
        store.session(Identity::new(1));
        assert!(store.remove(Identity::new(1)));
        assert!(!store.remove(Identity::new(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn evict_idle_keeps_recent_sessions() {
        let store = InMemorySessionStore::new();
        store.session(Identity::new(1));
        let cutoff = Timestamp::now();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store.session(Identity::new(2));

        assert_eq!(store.evict_idle(cutoff), 1);
        assert_eq!(store.identities(), vec![Identity::new(2)]);
    }

    #[test]
    fn evict_idle_skips_sessions_held_elsewhere() {
        let store = InMemorySessionStore::new();
        let held = store.session(Identity::new(1));
        store.session(Identity::new(2));
        std::thread::sleep(std::time::Duration::from_millis(5));

        assert_eq!(store.evict_idle(Timestamp::now()), 1);
        assert_eq!(store.identities(), vec![Identity::new(1)]);

        drop(held);
        assert_eq!(store.evict_idle(Timestamp::now()), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn concurrent_first_access_yields_one_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.session(Identity::new(42)))
            })
            .collect();

        let sessions: Vec<SessionHandle> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(store.len(), 1);
        assert!(sessions.windows(2).all(|w| w[0].same_session(&w[1])));
    }

    #[test]
    fn concurrent_distinct_identities_are_all_kept() {
        let store = Arc::new(InMemorySessionStore::new());
        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.session(Identity::new(i));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 64);
    }
}
