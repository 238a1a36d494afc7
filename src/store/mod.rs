//! Session state store
//!
//! In-memory mapping from session ID to current analysis state. This is the
//! coordinator's single source of truth: reads never fail (unknown sessions
//! are `Idle`), writes are whole-state replacements, and entries are removed
//! when the owning context is torn down so memory stays bounded by the
//! number of live sessions.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{AnalysisState, SessionId};

/// Shared in-memory store of per-session analysis state
///
/// Cloning is cheap; all clones share the same map. The coordinator is the
/// only writer, and the lock serializes writes so concurrent transitions for
/// the same session never interleave.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, AnalysisState>>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state for a session
    ///
    /// Sessions that were never submitted (or were ended) report `Idle`.
    pub async fn get(&self, session_id: &SessionId) -> AnalysisState {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the state for a session, creating the entry if needed
    pub async fn set(&self, session_id: SessionId, state: AnalysisState) {
        self.sessions.write().await.insert(session_id, state);
    }

    /// Remove a session's entry entirely
    pub async fn remove(&self, session_id: &SessionId) {
        self.sessions.write().await.remove(session_id);
    }

    /// Number of sessions currently tracked
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no sessions are tracked
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Snapshot of all tracked session IDs
    pub async fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.read().await.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_session_is_idle() {
        let store = SessionStore::new();
        let state = store.get(&SessionId::from("never-seen")).await;
        assert_eq!(state, AnalysisState::Idle);
    }

    #[tokio::test]
    async fn test_set_replaces_whole_state() {
        let store = SessionStore::new();
        let id = SessionId::from("tab-7");

        store.set(id.clone(), AnalysisState::Loading).await;
        assert_eq!(store.get(&id).await, AnalysisState::Loading);

        store
            .set(
                id.clone(),
                AnalysisState::Error {
                    message: "boom".to_string(),
                },
            )
            .await;
        assert_eq!(
            store.get(&id).await,
            AnalysisState::Error {
                message: "boom".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_remove_resets_to_idle() {
        let store = SessionStore::new();
        let id = SessionId::from("tab-9");

        store.set(id.clone(), AnalysisState::Loading).await;
        assert_eq!(store.len().await, 1);

        store.remove(&id).await;
        assert_eq!(store.get(&id).await, AnalysisState::Idle);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new();
        store
            .set(SessionId::from("a"), AnalysisState::Loading)
            .await;
        store
            .set(
                SessionId::from("b"),
                AnalysisState::Error {
                    message: "x".to_string(),
                },
            )
            .await;

        store.remove(&SessionId::from("a")).await;
        assert_eq!(
            store.get(&SessionId::from("b")).await,
            AnalysisState::Error {
                message: "x".to_string()
            }
        );
    }
}
