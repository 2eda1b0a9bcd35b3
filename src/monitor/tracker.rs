//! Dwell-time tracking for qualifying processes.
//!
//! The [`Tracker`] remembers when each process was first seen showing the
//! qualifying title. Every cycle it is fed the current observations and
//! returns the processes that have held the title continuously for at least
//! the kill threshold. Any interruption (title change, disappearance, kill
//! attempt) drops the entry, so the next qualifying sample starts over.

use super::sampler::{Observation, TitleState};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// A process currently showing the qualifying title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedProcess {
    /// Process ID.
    pub pid: u32,

    /// First sample in the current unbroken qualifying run.
    pub since: DateTime<Utc>,
}

impl TrackedProcess {
    /// Time spent qualifying as of `now`.
    pub fn dwell(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.since
    }
}

/// Per-process tracking state, owned by the polling loop.
#[derive(Debug)]
pub struct Tracker {
    entries: HashMap<u32, TrackedProcess>,
    kill_threshold: TimeDelta,
}

impl Tracker {
    /// Creates an empty tracker.
    pub fn new(kill_threshold: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            kill_threshold: TimeDelta::from_std(kill_threshold).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Applies one cycle's observations and returns the PIDs to terminate.
    ///
    /// Rules, in order:
    /// 1. No live processes at all: forget everything.
    /// 2. For each observation:
    ///    - qualifying and untracked: start tracking at `now`
    ///    - qualifying and tracked past the threshold: stop tracking, report it
    ///    - any other title: stop tracking
    ///    - unreadable title: leave the entry as it is
    /// 3. Forget tracked PIDs that were not observed.
    ///
    /// Reported PIDs are already removed, whether or not the kill succeeds.
    pub fn observe(&mut self, observations: &[Observation], now: DateTime<Utc>) -> Vec<u32> {
        if observations.is_empty() {
            if !self.entries.is_empty() {
                tracing::info!(
                    count = self.entries.len(),
                    "No target processes found, clearing tracker"
                );
                self.entries.clear();
            }
            return Vec::new();
        }

        let mut present = HashSet::with_capacity(observations.len());
        let mut expired = Vec::new();

        for observation in observations {
            let pid = observation.pid;
            present.insert(pid);

            match &observation.title {
                TitleState::Qualifying => match self.entries.get(&pid) {
                    None => {
                        self.entries.insert(pid, TrackedProcess { pid, since: now });
                        tracing::info!(pid, "Started tracking process");
                    }
                    Some(tracked) => {
                        let dwell = tracked.dwell(now);
                        tracing::debug!(
                            pid,
                            dwell_secs = dwell.num_seconds(),
                            "Process still has the qualifying title"
                        );

                        if dwell >= self.kill_threshold {
                            self.entries.remove(&pid);
                            tracing::info!(
                                pid,
                                dwell_secs = dwell.num_seconds(),
                                threshold_secs = self.kill_threshold.num_seconds(),
                                "Process exceeded kill threshold"
                            );
                            expired.push(pid);
                        }
                    }
                },
                TitleState::Other(title) => {
                    if self.entries.remove(&pid).is_some() {
                        tracing::info!(pid, title = %title, "Title changed, removing from tracker");
                    }
                }
                TitleState::Unreadable(reason) => {
                    if self.entries.contains_key(&pid) {
                        tracing::debug!(pid, reason = %reason, "Title unreadable, keeping entry");
                    }
                }
            }
        }

        let mut stale: Vec<u32> = self
            .entries
            .keys()
            .filter(|pid| !present.contains(pid))
            .copied()
            .collect();
        stale.sort_unstable();

        for pid in stale {
            self.entries.remove(&pid);
            tracing::info!(pid, "Process no longer exists, removing from tracker");
        }

        expired
    }

    /// Entry for `pid`, if it is being tracked.
    pub fn get(&self, pid: u32) -> Option<&TrackedProcess> {
        self.entries.get(&pid)
    }

    pub fn is_tracking(&self, pid: u32) -> bool {
        self.entries.contains_key(&pid)
    }

    /// Tracked PIDs in ascending order.
    pub fn tracked_pids(&self) -> Vec<u32> {
        let mut pids: Vec<u32> = self.entries.keys().copied().collect();
        pids.sort_unstable();
        pids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
