//! Process polling loop.
//!
//! This module provides the loop that samples the target processes every
//! poll interval, advances the tracker, and kills whatever the tracker
//! reports as expired.

use super::clock::Clock;
use super::process::ProcessSource;
use super::sampler::take_sample;
use super::terminator::{terminate, KillOutcome};
use super::tracker::Tracker;
use crate::config::KillerConfig;
use crate::error::KillerResult;
use std::sync::mpsc::{Receiver, RecvTimeoutError};

/// Counters accumulated over the lifetime of a [`Monitor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    /// Polling cycles started.
    pub cycles: u64,

    /// Cycles that ended with an error.
    pub failed_cycles: u64,

    /// Kills where the process exited within the wait bound.
    pub kills_confirmed: u64,

    /// Kills where the process was still alive after the wait.
    pub kills_timed_out: u64,

    /// Kill requests that failed outright.
    pub kills_failed: u64,
}

impl MonitorStats {
    fn record_kill(&mut self, outcome: &KillOutcome) {
        match outcome {
            KillOutcome::Exited => self.kills_confirmed += 1,
            KillOutcome::TimedOut => self.kills_timed_out += 1,
            KillOutcome::Failed(_) => self.kills_failed += 1,
        }
    }

    /// Total kill attempts, whatever their outcome.
    pub fn kill_attempts(&self) -> u64 {
        self.kills_confirmed + self.kills_timed_out + self.kills_failed
    }
}

/// What happened during one successful cycle.
#[derive(Debug, Default)]
pub struct CycleReport {
    /// Processes returned by the enumeration.
    pub enumerated: usize,

    /// Entries left in the tracker after the cycle.
    pub tracked: usize,

    /// Kill attempts made this cycle.
    pub kills: Vec<(u32, KillOutcome)>,
}

/// Owns the tracker and drives the sample -> track -> kill cycle.
pub struct Monitor<S, C> {
    source: S,
    clock: C,
    config: KillerConfig,
    tracker: Tracker,
    stats: MonitorStats,
}

impl<S: ProcessSource, C: Clock> Monitor<S, C> {
    /// Creates a monitor with an empty tracker.
    pub fn new(source: S, clock: C, config: KillerConfig) -> Self {
        let tracker = Tracker::new(config.kill_threshold);
        Self {
            source,
            clock,
            config,
            tracker,
            stats: MonitorStats::default(),
        }
    }

    pub fn config(&self) -> &KillerConfig {
        &self.config
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    /// Performs a single poll cycle.
    ///
    /// Every handle taken during the cycle is released before this returns.
    ///
    /// # Errors
    /// Returns an error only when the processes could not be enumerated. The
    /// tracker is left untouched in that case.
    pub fn run_cycle(&mut self) -> KillerResult<CycleReport> {
        let sample = take_sample(
            &self.source,
            &self.config.process_name,
            &self.config.qualifying_title,
        )?;
        let now = self.clock.now();

        let expired = self.tracker.observe(sample.observations(), now);

        let mut kills = Vec::with_capacity(expired.len());
        for pid in expired {
            let Some(process) = sample.handle(pid) else {
                tracing::warn!(pid, "No handle for expired process, skipping kill");
                continue;
            };

            let outcome = terminate(process, self.config.exit_wait);
            self.stats.record_kill(&outcome);
            kills.push((pid, outcome));
        }

        Ok(CycleReport {
            enumerated: sample.enumerated(),
            tracked: self.tracker.len(),
            kills,
        })
    }

    /// Runs one cycle and logs a failure instead of returning it.
    pub fn poll_once(&mut self) -> Option<CycleReport> {
        self.stats.cycles += 1;

        match self.run_cycle() {
            Ok(report) => Some(report),
            Err(e) => {
                self.stats.failed_cycles += 1;
                tracing::error!(error = %e, "Error during process check");
                None
            }
        }
    }

    /// Polls until a message arrives on `shutdown` or its sender is dropped.
    ///
    /// The wait between cycles is the poll interval; a shutdown message ends
    /// the wait immediately.
    pub fn run(&mut self, shutdown: &Receiver<()>) {
        tracing::info!(
            interval_secs = self.config.poll_interval.as_secs(),
            threshold_secs = self.config.kill_threshold.as_secs(),
            process = %self.config.process_name,
            "Process polling loop started"
        );

        loop {
            self.poll_once();

            match shutdown.recv_timeout(self.config.poll_interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        tracing::info!(
            cycles = self.stats.cycles,
            kills = self.stats.kill_attempts(),
            "Process polling loop shutting down"
        );
    }
}
