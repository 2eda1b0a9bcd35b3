//! Fixed monitor settings.
//!
//! Nothing here is read from disk or the command line. The values are
//! compile-time constants gathered into [`KillerConfig`] so the poller and
//! tests can pass them around as one value.

use std::time::Duration;

/// Process name to watch, without the `.exe` extension.
pub const TARGET_PROCESS_NAME: &str = "RuneLite";

/// Main window title that marks a client as stuck.
pub const QUALIFYING_TITLE: &str = "RuneLite";

/// How long a process may continuously show [`QUALIFYING_TITLE`].
pub const KILL_THRESHOLD: Duration = Duration::from_secs(3 * 60);

/// Delay between two polling cycles.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// How long to wait for a killed process to actually exit.
pub const EXIT_WAIT: Duration = Duration::from_secs(5);

/// Configuration for the monitor loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillerConfig {
    /// Process name to enumerate (default: `RuneLite`).
    pub process_name: String,

    /// Exact window title that qualifies a process for tracking.
    pub qualifying_title: String,

    /// Continuous qualifying time before a kill is attempted (default: 3 min).
    pub kill_threshold: Duration,

    /// Sleep between cycles (default: 10s).
    pub poll_interval: Duration,

    /// Bound on the wait after a kill request (default: 5s).
    pub exit_wait: Duration,
}

impl Default for KillerConfig {
    fn default() -> Self {
        Self {
            process_name: TARGET_PROCESS_NAME.to_string(),
            qualifying_title: QUALIFYING_TITLE.to_string(),
            kill_threshold: KILL_THRESHOLD,
            poll_interval: POLL_INTERVAL,
            exit_wait: EXIT_WAIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_killer_config_default() {
        let config = KillerConfig::default();
        assert_eq!(config.process_name, "RuneLite");
        assert_eq!(config.qualifying_title, "RuneLite");
        assert_eq!(config.kill_threshold, Duration::from_secs(180));
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.exit_wait, Duration::from_secs(5));
    }
}
