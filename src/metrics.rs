//! Adapter metrics
//!
//! Counters are recorded through the `metrics` facade; they are no-ops unless
//! the host pipeline installs a recorder.

/// Metrics for the stop ID resolver
pub struct StopIdMetrics;

impl StopIdMetrics {
    /// Record a successful resolution and the strategy that produced it
    pub fn record_resolved(strategy: &'static str) {
        ::metrics::counter!("adapter_stop_id_resolved_total", "strategy" => strategy).increment(1);
    }

    /// Record a stop identifier with no mapping
    pub fn record_unmapped() {
        ::metrics::counter!("adapter_stop_id_unmapped_total").increment(1);
    }
}

/// Metrics for the text normalizer
pub struct NormalizeMetrics;

impl NormalizeMetrics {
    /// Record one normalization and how many passes it took to settle
    pub fn record_normalized(pipeline: &'static str, passes: usize) {
        ::metrics::counter!("adapter_labels_normalized_total", "pipeline" => pipeline).increment(1);
        ::metrics::histogram!("adapter_normalize_passes", "pipeline" => pipeline).record(passes as f64);
    }

    /// Record a label that was still changing when the pass limit was reached
    pub fn record_unsettled(pipeline: &'static str) {
        ::metrics::counter!("adapter_labels_unsettled_total", "pipeline" => pipeline).increment(1);
    }
}

/// Metrics for batch record transformation
pub struct TransformMetrics;

impl TransformMetrics {
    pub fn record_batch(kind: &'static str, size: usize) {
        ::metrics::counter!("adapter_batches_processed_total", "kind" => kind).increment(1);
        ::metrics::histogram!("adapter_batch_size", "kind" => kind).record(size as f64);
    }
}
