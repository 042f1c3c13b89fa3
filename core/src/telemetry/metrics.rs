use std::sync::Mutex;

/// Counters describing the coordinator's activity since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub evaluations: usize,
    pub skipped_strikes: usize,
    pub expired_strikes: usize,
    pub results_broadcast: usize,
    pub clears_broadcast: usize,
}

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_evaluation(&self, skipped: usize, expired: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.evaluations += 1;
            metrics.skipped_strikes += skipped;
            metrics.expired_strikes += expired;
        }
    }

    pub fn record_result(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.results_broadcast += 1;
        }
    }

    pub fn record_clear(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.clears_broadcast += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
