// Metrics hooks for the `matcher` crate.
//
// A global `BatchMetrics` observer, installed with [`set_batch_metrics`],
// receives the document count, pair count and latency of every batch.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Metrics observer for batch comparisons.
pub trait BatchMetrics: Send + Sync {
    /// Record one completed batch: `documents` fingerprinted, `pairs`
    /// compared, and the wall-clock `latency` of the whole batch.
    fn record_batch(&self, documents: usize, pairs: usize, latency: Duration);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn BatchMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn BatchMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn BatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global batch metrics recorder.
pub fn set_batch_metrics(recorder: Option<Arc<dyn BatchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
