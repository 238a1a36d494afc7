//! stopfake - Fake-news analysis coordinator
//!
//! A coordinator service for per-session news-text analysis: page-side
//! extractors submit text samples, the coordinator serializes requests to an
//! external analysis backend, and viewer panels observe per-session status
//! either by polling or through the state-change event stream.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and the runtime config record
//! - [`coordinator`] - Per-session analysis lifecycle and broadcast protocol
//! - [`store`] - In-memory session state store
//! - [`client`] - HTTP client for the analysis backend
//! - [`extract`] - Page-text extraction and truncation policy
//! - [`server`] - HTTP host exposing the coordinator to extractors/viewers
//! - [`models`] - Core data structures and wire types
//! - [`metrics`] - Prometheus metrics
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```no_run
//! use stopfake::config::Config;
//! use stopfake::coordinator::Coordinator;
//! use stopfake::models::SessionId;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let coordinator = Coordinator::from_config(&config)?;
//!
//!     let session = SessionId::generate();
//!     let handle = coordinator
//!         .submit_text(session.clone(), "article text...".to_string())
//!         .await;
//!     handle.await?;
//!
//!     println!("{:?}", coordinator.get_state(&session).await);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod commands;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod models;
pub mod server;
pub mod store;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::AnalysisClient;
    pub use crate::config::{AnalysisConfig, Config, SharedConfig};
    pub use crate::coordinator::Coordinator;
    pub use crate::error::{AnalysisError, Error, Result};
    pub use crate::models::{AnalysisState, Label, SessionId, StateChange, Tone, Verdict};
    pub use crate::store::SessionStore;
}

// Direct re-exports for convenience
pub use models::{AnalysisState, SessionId, StateChange, Verdict};
