//! Search configuration types.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a search run.
///
/// Budgets are polled at expansion boundaries only: the search never yields
/// inside a successor generation, so a cancelled or timed-out run leaves all
/// data structures consistent.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Wall-clock limit; `None` means unbounded.
    pub timeout: Option<Duration>,
    /// Process resident-set limit in MB; `None` means unbounded.
    pub memory_limit_mb: Option<usize>,
    /// Cooperative cancellation flag, settable by an external watchdog.
    pub cancellation: Option<Arc<AtomicBool>>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_memory_limit_mb(mut self, limit: usize) -> Self {
        self.memory_limit_mb = Some(limit);
        self
    }

    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancellation = Some(flag);
        self
    }
}

/// Get current process RSS in MB. Returns None if unavailable.
pub fn process_memory_mb() -> Option<usize> {
    #[cfg(target_os = "linux")]
    {
        let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
        let rss_pages: usize = statm.split_whitespace().nth(1)?.parse().ok()?;
        let page_size = 4096usize; // standard on Linux
        Some(rss_pages * page_size / (1024 * 1024))
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}
