//! Common test utilities

use serde_json::json;
use stopfake::client::AnalysisClient;
use stopfake::config::{AnalysisConfig, SharedConfig};
use stopfake::coordinator::Coordinator;
use stopfake::store::SessionStore;

/// A well-formed backend verdict body
pub fn verdict_body() -> serde_json::Value {
    json!({
        "result": "real",
        "confidence": 0.87,
        "emotion": "factual",
        "reasons": ["r1"],
        "sources": []
    })
}

/// Build a coordinator pointed at a mock backend URI
#[allow(dead_code)]
pub fn coordinator_for(backend_uri: &str) -> Coordinator {
    let config = AnalysisConfig {
        backend_url: format!("{backend_uri}/analyze"),
        ..AnalysisConfig::default()
    };

    Coordinator::new(
        SessionStore::new(),
        AnalysisClient::new().expect("client"),
        SharedConfig::new(config),
        16,
    )
}
