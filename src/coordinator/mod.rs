//! Analysis coordinator
//!
//! The coordinator owns the lifecycle of one analysis attempt per session:
//! it resolves the config record fresh for every submission, applies the
//! `Loading` transition before the network call, serializes exactly one
//! settling transition (`Done` or `Error`) when the attempt completes, and
//! broadcasts every transition to subscribers.
//!
//! # Concurrency
//!
//! `submit_text` never blocks on the backend; the request runs as a spawned
//! task whose handle is returned to the caller. Overlapping submissions for
//! the same session are not cancelled: both attempts settle, and the store
//! reflects whichever continuation resumes last. Viewers that miss a
//! broadcast recover by polling [`Coordinator::get_state`].

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::client::AnalysisClient;
use crate::config::{Config, SharedConfig};
use crate::error::AnalysisError;
use crate::metrics;
use crate::models::{AnalysisState, SessionId, StateChange};
use crate::store::SessionStore;

/// Per-session analysis orchestrator
///
/// Cheap to clone; clones share the store, client, config handle and event
/// channel. The coordinator is the sole writer of session state.
#[derive(Debug, Clone)]
pub struct Coordinator {
    store: SessionStore,
    client: AnalysisClient,
    config: SharedConfig,
    events: broadcast::Sender<StateChange>,
}

impl Coordinator {
    /// Create a coordinator from its parts
    pub fn new(
        store: SessionStore,
        client: AnalysisClient,
        config: SharedConfig,
        events_buffer: usize,
    ) -> Self {
        let (events, _) = broadcast::channel(events_buffer);
        Self {
            store,
            client,
            config,
            events,
        }
    }

    /// Create a coordinator wired from a full service config
    pub fn from_config(config: &Config) -> Result<Self, AnalysisError> {
        let client = AnalysisClient::with_timeout(config.request_timeout())?;
        Ok(Self::new(
            SessionStore::new(),
            client,
            SharedConfig::new(config.analysis.clone()),
            config.service.events_buffer,
        ))
    }

    /// Subscribe to state-change notifications
    ///
    /// Dropping the receiver detaches the subscriber. Subscribers that fall
    /// behind skip missed notifications instead of slowing the coordinator,
    /// and reconcile through [`Coordinator::get_state`].
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.events.subscribe()
    }

    /// Handle to the runtime-editable analysis config record
    pub fn config(&self) -> SharedConfig {
        self.config.clone()
    }

    /// Submit text for analysis on behalf of a session
    ///
    /// Resolves the config record, marks the session `Loading` (and
    /// broadcasts it) before returning, then runs the backend attempt as a
    /// spawned task. The task applies exactly one settling transition; all
    /// failures fold into `Error { message }` and nothing is retried. The
    /// returned handle is the explicit task boundary: tests await it, and a
    /// future cancellation policy can abort it.
    pub async fn submit_text(&self, session_id: SessionId, text: String) -> JoinHandle<()> {
        let config = self.config.resolve().await;

        tracing::info!(
            session_id = %session_id,
            text_len = text.chars().count(),
            backend_url = %config.backend_url,
            "Submitting analysis request"
        );
        metrics::record_submission();

        self.transition(&session_id, AnalysisState::Loading).await;

        let coordinator = self.clone();
        tokio::spawn(async move {
            let state = match coordinator.client.analyze(&config.backend_url, &text).await {
                Ok(result) => {
                    metrics::record_verdict(result.result.as_str());
                    AnalysisState::Done { result }
                }
                Err(err) => {
                    metrics::record_analysis_error(err.kind());
                    tracing::warn!(
                        session_id = %session_id,
                        error = %err,
                        "Analysis attempt failed"
                    );
                    AnalysisState::Error {
                        message: err.to_string(),
                    }
                }
            };

            coordinator.transition(&session_id, state).await;
        })
    }

    /// Current state for a session; `Idle` for unknown sessions
    pub async fn get_state(&self, session_id: &SessionId) -> AnalysisState {
        self.store.get(session_id).await
    }

    /// Drop a session's state when its context is torn down
    pub async fn end_session(&self, session_id: &SessionId) {
        tracing::debug!(session_id = %session_id, "Ending session");
        self.store.remove(session_id).await;
        metrics::set_live_sessions(self.store.len().await);
    }

    /// Number of sessions currently tracked
    pub async fn session_count(&self) -> usize {
        self.store.len().await
    }

    /// Apply one whole-state transition and notify subscribers
    async fn transition(&self, session_id: &SessionId, state: AnalysisState) {
        tracing::debug!(
            session_id = %session_id,
            status = %state,
            "Session state transition"
        );

        self.store.set(session_id.clone(), state.clone()).await;
        metrics::set_live_sessions(self.store.len().await);

        // Best-effort: a send error only means nobody is listening right now.
        let _ = self.events.send(StateChange::new(session_id.clone(), state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;

    fn test_coordinator(backend_url: &str) -> Coordinator {
        let config = AnalysisConfig {
            backend_url: backend_url.to_string(),
            ..AnalysisConfig::default()
        };
        Coordinator::new(
            SessionStore::new(),
            AnalysisClient::new().expect("client"),
            SharedConfig::new(config),
            16,
        )
    }

    #[tokio::test]
    async fn test_unknown_session_is_idle() {
        let coordinator = test_coordinator("http://127.0.0.1:1/analyze");
        let state = coordinator.get_state(&SessionId::from("nobody")).await;
        assert_eq!(state, AnalysisState::Idle);
    }

    #[tokio::test]
    async fn test_unreachable_backend_settles_as_error() {
        // Port 1 refuses connections, so the attempt fails at transport level
        let coordinator = test_coordinator("http://127.0.0.1:1/analyze");
        let id = SessionId::from("tab-1");

        let handle = coordinator
            .submit_text(id.clone(), "some long enough text".to_string())
            .await;
        handle.await.expect("analysis task");

        match coordinator.get_state(&id).await {
            AnalysisState::Error { message } => {
                assert!(message.contains("unreachable"), "message: {message}");
            }
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_loading_broadcast_fires_before_settlement() {
        let coordinator = test_coordinator("http://127.0.0.1:1/analyze");
        let mut events = coordinator.subscribe();
        let id = SessionId::from("tab-2");

        let handle = coordinator.submit_text(id.clone(), "text".to_string()).await;

        // Loading was applied and broadcast before submit_text returned
        assert_eq!(coordinator.get_state(&id).await, AnalysisState::Loading);
        let first = events.recv().await.expect("loading event");
        assert_eq!(first.session_id, id);
        assert_eq!(first.state, AnalysisState::Loading);

        handle.await.expect("analysis task");
        let second = events.recv().await.expect("settling event");
        assert!(second.state.is_settled());
    }

    #[tokio::test]
    async fn test_end_session_resets_to_idle() {
        let coordinator = test_coordinator("http://127.0.0.1:1/analyze");
        let id = SessionId::from("tab-3");

        let handle = coordinator.submit_text(id.clone(), "text".to_string()).await;
        handle.await.expect("analysis task");
        assert!(coordinator.get_state(&id).await.is_settled());

        coordinator.end_session(&id).await;
        assert_eq!(coordinator.get_state(&id).await, AnalysisState::Idle);
        assert_eq!(coordinator.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_broadcast_without_subscribers_does_not_fail() {
        let coordinator = test_coordinator("http://127.0.0.1:1/analyze");
        let handle = coordinator
            .submit_text(SessionId::from("tab-4"), "text".to_string())
            .await;
        handle.await.expect("analysis task");
    }
}
