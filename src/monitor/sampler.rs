//! Per-cycle process sampling.
//!
//! Enumerates the target processes once, reads each one's exit status and
//! main window title, and keeps the live handles around until the cycle
//! ends so expired processes can be killed through the same handle.

use super::process::{ProcessHandle, ProcessSource};
use crate::error::KillerResult;
use std::collections::HashMap;

/// What a process's main window title looked like when sampled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleState {
    /// The title equals the qualifying title exactly.
    Qualifying,

    /// Any other title, including an empty one.
    Other(String),

    /// The title could not be read. Carries the error message.
    Unreadable(String),
}

/// One live process seen during a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub pid: u32,
    pub title: TitleState,
}

impl Observation {
    /// Classifies `title` against `qualifying_title`.
    pub fn from_title(pid: u32, title: String, qualifying_title: &str) -> Self {
        let title = if title == qualifying_title {
            TitleState::Qualifying
        } else {
            TitleState::Other(title)
        };
        Self { pid, title }
    }
}

/// Result of sampling the target processes once.
#[derive(Debug)]
pub struct Sample<H> {
    enumerated: usize,
    observations: Vec<Observation>,
    handles: HashMap<u32, H>,
}

impl<H> Sample<H> {
    /// Number of processes the enumeration returned, exited ones included.
    pub fn enumerated(&self) -> usize {
        self.enumerated
    }

    /// Live processes in enumeration order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Handle of a live process from this sample.
    pub fn handle(&self, pid: u32) -> Option<&H> {
        self.handles.get(&pid)
    }
}

/// Samples every process called `process_name`.
///
/// Per-process failures never fail the sample:
/// - a process whose exit status cannot be read is logged and skipped
/// - an exited process is skipped and its handle released right away
/// - a process whose title cannot be read is kept as [`TitleState::Unreadable`]
///
/// # Errors
/// Returns the enumeration error if the process list itself is unavailable.
pub fn take_sample<S: ProcessSource>(
    source: &S,
    process_name: &str,
    qualifying_title: &str,
) -> KillerResult<Sample<S::Handle>> {
    let processes = source.processes_by_name(process_name)?;
    let enumerated = processes.len();

    if enumerated > 0 {
        tracing::info!(
            count = enumerated,
            process = process_name,
            "Found {} {} process(es)",
            enumerated,
            process_name
        );
    }

    let mut observations = Vec::with_capacity(enumerated);
    let mut handles = HashMap::with_capacity(enumerated);

    for process in processes {
        let pid = process.pid();

        match process.has_exited() {
            Ok(false) => {}
            Ok(true) => {
                tracing::trace!(pid, "Process already exited, skipping");
                continue;
            }
            Err(e) => {
                tracing::error!(pid, error = %e, "Error processing process, skipping");
                continue;
            }
        }

        let observation = match process.main_window_title() {
            Ok(title) => Observation::from_title(pid, title, qualifying_title),
            Err(e) => {
                tracing::error!(pid, error = %e, "Error reading main window title");
                Observation {
                    pid,
                    title: TitleState::Unreadable(e.to_string()),
                }
            }
        };

        observations.push(observation);
        handles.insert(pid, process);
    }

    Ok(Sample {
        enumerated,
        observations,
        handles,
    })
}
