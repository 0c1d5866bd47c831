use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Format a `Duration` with automatic unit scaling, e.g. `1.94ms` or `2.34s`.
pub fn fmt_duration(d: Duration) -> String {
    format!("{d:.2?}")
}

/// Log a warning if the elapsed time since `start` exceeds `threshold`.
pub fn log_if_slow(start: Instant, threshold: Duration, label: &str) {
    let elapsed = start.elapsed();
    if elapsed > threshold {
        tracing::warn!(
            duration = fmt_duration(elapsed),
            threshold = fmt_duration(threshold),
            "slow operation: {label}"
        );
    }
}

/// Remove every already-finished task from `tasks` without waiting, logging
/// panics. Returns how many tasks were removed.
pub fn reap_finished(tasks: &mut JoinSet<()>, label: &str) -> usize {
    let mut reaped = 0;
    while let Some(result) = tasks.try_join_next() {
        reaped += 1;
        if let Err(e) = result {
            tracing::warn!(error = ?e, "{label} task failed");
        }
    }
    reaped
}
