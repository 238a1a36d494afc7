//! Prometheus metrics for the stopfake coordinator
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If initialization fails (or is skipped, as in most tests), metrics
//! operations become no-ops.

use prometheus::{
    register_counter, register_counter_vec, register_gauge, Counter, CounterVec, Encoder, Gauge,
    TextEncoder,
};
use std::sync::OnceLock;

/// Container for all coordinator metrics
struct CoordinatorMetrics {
    submissions: Counter,
    verdicts: CounterVec,
    analysis_errors: CounterVec,
    live_sessions: Gauge,
}

/// Global storage for coordinator metrics
static METRICS: OnceLock<CoordinatorMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

/// Initialize all Prometheus metrics
///
/// This function should be called once at application startup. A second
/// call is a no-op.
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    if METRICS_INIT_ATTEMPTED.get().is_some() {
        return Ok(());
    }
    METRICS_INIT_ATTEMPTED.set(true).ok();

    let metrics = CoordinatorMetrics {
        submissions: register_counter!(
            "stopfake_submissions_total",
            "Total analysis submissions accepted"
        )?,
        verdicts: register_counter_vec!(
            "stopfake_verdicts_total",
            "Settled verdicts by classification label",
            &["label"]
        )?,
        analysis_errors: register_counter_vec!(
            "stopfake_analysis_errors_total",
            "Failed analysis attempts by error kind",
            &["kind"]
        )?,
        live_sessions: register_gauge!(
            "stopfake_live_sessions",
            "Number of sessions currently tracked"
        )?,
    };

    METRICS.set(metrics).ok();
    Ok(())
}

/// Check if metrics have been initialized
pub fn metrics_initialized() -> bool {
    METRICS.get().is_some()
}

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record an accepted submission
pub fn record_submission() {
    if let Some(m) = METRICS.get() {
        m.submissions.inc();
    }
}

/// Record a settled verdict by label
pub fn record_verdict(label: &str) {
    if let Some(m) = METRICS.get() {
        m.verdicts.with_label_values(&[label]).inc();
    }
}

/// Record a failed analysis attempt by error kind
pub fn record_analysis_error(kind: &str) {
    if let Some(m) = METRICS.get() {
        m.analysis_errors.with_label_values(&[kind]).inc();
    }
}

/// Update the live-session gauge
pub fn set_live_sessions(count: usize) {
    if let Some(m) = METRICS.get() {
        m.live_sessions.set(count as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_are_noops_before_init() {
        // Must not panic even when init_metrics was never called
        record_submission();
        record_verdict("fake");
        record_analysis_error("unreachable");
        set_live_sessions(3);
    }

    #[test]
    fn test_double_init_is_ok() {
        let first = init_metrics();
        let second = init_metrics();
        assert!(first.is_ok());
        assert!(second.is_ok());
    }
}
