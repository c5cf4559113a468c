//! Lightweight solver call timing.
//!
//! Counts and times solver context builds and queries so sweeps and
//! compensation runs can report where runtime is spent. Enabled through
//! the `WT_TIMING` environment variable or programmatically.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable performance timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Disable performance timing globally.
pub fn disable_timing() {
    ENABLED.store(false, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var("WT_TIMING").is_ok()
}

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
    enabled: bool,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
            enabled: is_enabled(),
        }
    }

    /// Stop the timer and return elapsed time in seconds.
    /// If timing is disabled, returns None.
    pub fn stop(self) -> Option<f64> {
        if self.enabled {
            Some(self.start.elapsed().as_secs_f64())
        } else {
            None
        }
    }

    /// Stop the timer and record it into `acc`; logs the result if enabled.
    pub fn stop_into(self, acc: &AccumulatingTimer) {
        let label = self.label;
        if let Some(elapsed) = self.stop() {
            acc.record(elapsed);
            tracing::trace!(label, elapsed_s = elapsed, "timer");
        }
    }
}

/// Accumulating timer for tracking total time across multiple calls.
pub struct AccumulatingTimer {
    total_ns: AtomicU64,
    count: AtomicU64,
}

impl Default for AccumulatingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl AccumulatingTimer {
    pub const fn new() -> Self {
        Self {
            total_ns: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Record a timing measurement.
    pub fn record(&self, duration_s: f64) {
        let nanos = (duration_s * 1e9) as u64;
        self.total_ns.fetch_add(nanos, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total time spent (in seconds).
    pub fn total_seconds(&self) -> f64 {
        self.total_ns.load(Ordering::Relaxed) as f64 / 1e9
    }

    /// Get number of calls.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Get average time per call (in seconds).
    pub fn average_seconds(&self) -> f64 {
        let count = self.count();
        if count > 0 {
            self.total_seconds() / count as f64
        } else {
            0.0
        }
    }

    pub fn reset(&self) {
        self.total_ns.store(0, Ordering::Relaxed);
        self.count.store(0, Ordering::Relaxed);
    }
}

/// Solver call timers.
pub mod solver_timing {
    use super::AccumulatingTimer;

    /// Solver context builds (one per frequency sample)
    pub static CONTEXT_BUILDS: AccumulatingTimer = AccumulatingTimer::new();
    /// Input impedance queries
    pub static IMPEDANCE_QUERIES: AccumulatingTimer = AccumulatingTimer::new();
    /// Far-field gain queries (single direction or grid)
    pub static GAIN_QUERIES: AccumulatingTimer = AccumulatingTimer::new();

    pub fn reset_all() {
        CONTEXT_BUILDS.reset();
        IMPEDANCE_QUERIES.reset();
        GAIN_QUERIES.reset();
    }

    /// Log the solver timing summary.
    pub fn log_summary() {
        if !super::is_enabled() {
            return;
        }
        for (name, timer) in [
            ("context builds", &CONTEXT_BUILDS),
            ("impedance queries", &IMPEDANCE_QUERIES),
            ("gain queries", &GAIN_QUERIES),
        ] {
            if timer.count() > 0 {
                tracing::info!(
                    "{name}: {} calls, {:.3}s total, {:.4}ms avg",
                    timer.count(),
                    timer.total_seconds(),
                    timer.average_seconds() * 1000.0
                );
            }
        }
    }
}
