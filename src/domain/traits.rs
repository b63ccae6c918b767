use crate::domain::graph::{Graph, SccResult};
use std::collections::BTreeMap;
use std::time::Duration;

pub trait SccDetector {
    fn compute_scc(&self, graph: &Graph, metrics: &mut dyn Metrics) -> SccResult;
}

/// Instrumentation sink: an accumulating timer plus named operation counters.
///
/// Purely observational. Swapping one implementation for another must never
/// change a computed result.
pub trait Metrics {
    fn start_timer(&mut self);
    fn stop_timer(&mut self);
    fn elapsed(&self) -> Duration;

    fn increment(&mut self, counter: &str);
    fn count(&self, counter: &str) -> u64;
    fn all_counts(&self) -> BTreeMap<String, u64>;
}
