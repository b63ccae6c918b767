use crate::domain::traits::Metrics;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Counters keyed by name plus a timer that accumulates across
/// start/stop pairs.
#[derive(Debug, Clone, Default)]
pub struct SimpleMetrics {
    started: Option<Instant>,
    elapsed: Duration,
    counters: BTreeMap<String, u64>,
}

impl SimpleMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.started = None;
        self.elapsed = Duration::ZERO;
        self.counters.clear();
    }

    pub fn total_ops(&self) -> u64 {
        self.counters.values().sum()
    }
}

impl Metrics for SimpleMetrics {
    fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    fn stop_timer(&mut self) {
        // A stop without a matching start is a no-op.
        if let Some(t0) = self.started.take() {
            self.elapsed += t0.elapsed();
        }
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn increment(&mut self, counter: &str) {
        match self.counters.get_mut(counter) {
            Some(n) => *n += 1,
            None => {
                self.counters.insert(counter.to_string(), 1);
            }
        }
    }

    fn count(&self, counter: &str) -> u64 {
        self.counters.get(counter).copied().unwrap_or(0)
    }

    fn all_counts(&self) -> BTreeMap<String, u64> {
        self.counters.clone()
    }
}

pub struct NoopMetrics;

impl Metrics for NoopMetrics {
    fn start_timer(&mut self) {}

    fn stop_timer(&mut self) {}

    fn elapsed(&self) -> Duration {
        Duration::ZERO
    }

    fn increment(&mut self, _counter: &str) {}

    fn count(&self, _counter: &str) -> u64 {
        0
    }

    fn all_counts(&self) -> BTreeMap<String, u64> {
        BTreeMap::new()
    }
}
