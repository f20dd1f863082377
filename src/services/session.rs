// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store: bearer token + profile, persisted and observable.

use crate::db::{keys, KeyValueStore};
use crate::models::{AuthUser, Session};
use std::sync::Arc;
use tokio::sync::watch;

/// Holds the current session and mirrors every change into durable storage.
///
/// Clones share state. Storage failures never escape: they are logged and
/// the in-memory value stays authoritative for the rest of the process.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<Option<Session>>>,
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Create a store initialised from whatever `storage` holds.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let initial = load_session(storage.as_ref());
        let (state, _) = watch::channel(initial);
        Self {
            state: Arc::new(state),
            storage,
        }
    }

    /// Replace the current session.
    pub fn set_session(&self, token: impl Into<String>, user: Option<AuthUser>) {
        let session = Session::new(token, user);
        persist(self.storage.as_ref(), Some(&session));
        self.state.send_replace(Some(session));
        tracing::debug!("Session updated");
    }

    /// Log out: drop the session and remove it from storage.
    pub fn clear_session(&self) {
        persist(self.storage.as_ref(), None);
        self.state.send_replace(None);
        tracing::debug!("Session cleared");
    }

    pub fn get_token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .borrow()
            .as_ref()
            .is_some_and(Session::has_token)
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    /// Observe session changes. The receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }
}

/// Read the stored session, treating anything unreadable as "logged out".
fn load_session(storage: &dyn KeyValueStore) -> Option<Session> {
    let raw = match storage.get_item(keys::SESSION) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read stored session");
            return None;
        }
    };

    match serde_json::from_str::<Option<Session>>(&raw) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse stored session");
            None
        }
    }
}

fn persist(storage: &dyn KeyValueStore, session: Option<&Session>) {
    let result = match session {
        None => storage.remove_item(keys::SESSION),
        Some(session) => serde_json::to_string(session)
            .map_err(Into::into)
            .and_then(|json| storage.set_item(keys::SESSION, &json)),
    };

    if let Err(e) = result {
        tracing::warn!(error = %e, "Failed to persist session");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn store_with(storage: &MemoryStore) -> SessionStore {
        SessionStore::new(Arc::new(storage.clone()))
    }

    #[test]
    fn test_set_then_get_token() {
        let store = store_with(&MemoryStore::new());
        assert!(!store.is_authenticated());
        assert_eq!(store.get_token(), None);

        store.set_session("tok-1", None);
        assert_eq!(store.get_token().as_deref(), Some("tok-1"));
        assert!(store.is_authenticated());

        store.clear_session();
        assert!(!store.is_authenticated());
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let store = store_with(&MemoryStore::new());
        store.set_session("", None);

        assert_eq!(store.get_token().as_deref(), Some(""));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_reload_from_storage() {
        let storage = MemoryStore::new();
        let user = AuthUser {
            name: Some("Lucía".to_string()),
            email: Some("lucia@example.org".to_string()),
            ..Default::default()
        };

        let first = store_with(&storage);
        first.set_session("persisted", Some(user.clone()));

        let second = store_with(&storage);
        assert_eq!(
            second.current(),
            Some(Session::new("persisted", Some(user)))
        );
    }

    #[test]
    fn test_clear_removes_storage_entry() {
        let storage = MemoryStore::new();
        let store = store_with(&storage);

        store.set_session("t", None);
        assert!(storage.get_item(keys::SESSION).unwrap().is_some());

        store.clear_session();
        assert_eq!(storage.get_item(keys::SESSION).unwrap(), None);
    }

    #[test]
    fn test_malformed_storage_yields_no_session() {
        let storage = MemoryStore::with_item(keys::SESSION, "{\"token\":");
        let store = store_with(&storage);
        assert_eq!(store.current(), None);

        let storage = MemoryStore::with_item(keys::SESSION, "null");
        assert_eq!(store_with(&storage).current(), None);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let storage = MemoryStore::new();
        storage.set_read_only(true);

        let store = store_with(&storage);
        store.set_session("only-in-memory", None);

        assert_eq!(store.get_token().as_deref(), Some("only-in-memory"));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = store_with(&MemoryStore::new());
        let mut rx = store.subscribe();
        assert!(rx.borrow_and_update().is_none());

        store.set_session("abc", None);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|s| s.token.as_str()), Some("abc"));

        store.clear_session();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
