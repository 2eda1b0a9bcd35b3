//! Fake process collaborator and clock for unit tests.

use super::clock::Clock;
use super::process::{ProcessHandle, ProcessSource};
use crate::error::{KillerError, KillerResult};
use chrono::{DateTime, TimeDelta, Utc};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Returns the test epoch shifted by `secs` seconds.
pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap() + TimeDelta::seconds(secs)
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(at(0))),
        }
    }

    pub fn set_secs(&self, secs: i64) {
        self.now.set(at(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// What a fake process does when killed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillBehavior {
    Exits,
    Hangs,
    Fails,
}

/// Description of one fake process as seen by the next enumeration.
#[derive(Debug, Clone)]
pub struct FakeEntry {
    pub pid: u32,
    pub title: Result<String, String>,
    pub exited: Result<bool, String>,
    pub kill: KillBehavior,
}

impl FakeEntry {
    pub fn titled(pid: u32, title: &str) -> Self {
        Self {
            pid,
            title: Ok(title.to_string()),
            exited: Ok(false),
            kill: KillBehavior::Exits,
        }
    }

    pub fn unreadable(pid: u32) -> Self {
        Self {
            title: Err("window went away".to_string()),
            ..Self::titled(pid, "")
        }
    }

    pub fn exited(mut self) -> Self {
        self.exited = Ok(true);
        self
    }

    pub fn exit_status_fails(mut self) -> Self {
        self.exited = Err("access denied".to_string());
        self
    }

    pub fn on_kill(mut self, kill: KillBehavior) -> Self {
        self.kill = kill;
        self
    }
}

#[derive(Debug, Default)]
struct Shared {
    entries: Vec<FakeEntry>,
    fail_enumeration: bool,
    kill_requests: Vec<u32>,
    waits: Vec<(u32, Duration)>,
    opened: usize,
    released: usize,
}

/// Process source backed by a shared, mutable list of [`FakeEntry`]s.
#[derive(Debug, Clone, Default)]
pub struct FakeSource {
    shared: Rc<RefCell<Shared>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the processes returned by the next enumeration.
    pub fn set(&self, entries: Vec<FakeEntry>) {
        self.shared.borrow_mut().entries = entries;
    }

    pub fn fail_enumeration(&self, fail: bool) {
        self.shared.borrow_mut().fail_enumeration = fail;
    }

    pub fn kill_requests(&self) -> Vec<u32> {
        self.shared.borrow().kill_requests.clone()
    }

    pub fn waits(&self) -> Vec<(u32, Duration)> {
        self.shared.borrow().waits.clone()
    }

    /// Handles handed out and not yet dropped.
    pub fn open_handles(&self) -> usize {
        let shared = self.shared.borrow();
        shared.opened - shared.released
    }
}

impl ProcessSource for FakeSource {
    type Handle = FakeProcess;

    fn processes_by_name(&self, name: &str) -> KillerResult<Vec<FakeProcess>> {
        let mut shared = self.shared.borrow_mut();
        if shared.fail_enumeration {
            return Err(KillerError::Enumeration {
                name: name.to_string(),
                reason: "snapshot failed".to_string(),
            });
        }

        let entries = shared.entries.clone();
        shared.opened += entries.len();
        drop(shared);

        Ok(entries
            .into_iter()
            .map(|entry| FakeProcess {
                entry,
                shared: Rc::clone(&self.shared),
            })
            .collect())
    }
}

/// Handle produced by [`FakeSource`].
#[derive(Debug)]
pub struct FakeProcess {
    entry: FakeEntry,
    shared: Rc<RefCell<Shared>>,
}

impl ProcessHandle for FakeProcess {
    fn pid(&self) -> u32 {
        self.entry.pid
    }

    fn has_exited(&self) -> KillerResult<bool> {
        self.entry
            .exited
            .clone()
            .map_err(|reason| KillerError::ExitStatus {
                pid: self.entry.pid,
                reason,
            })
    }

    fn main_window_title(&self) -> KillerResult<String> {
        self.entry
            .title
            .clone()
            .map_err(|reason| KillerError::WindowTitle {
                pid: self.entry.pid,
                reason,
            })
    }

    fn kill(&self) -> KillerResult<()> {
        self.shared.borrow_mut().kill_requests.push(self.entry.pid);
        match self.entry.kill {
            KillBehavior::Fails => Err(KillerError::Kill {
                pid: self.entry.pid,
                reason: "Access is denied.".to_string(),
            }),
            KillBehavior::Exits | KillBehavior::Hangs => Ok(()),
        }
    }

    fn wait_for_exit(&self, timeout: Duration) -> KillerResult<bool> {
        self.shared
            .borrow_mut()
            .waits
            .push((self.entry.pid, timeout));
        Ok(self.entry.kill == KillBehavior::Exits)
    }
}

impl Drop for FakeProcess {
    fn drop(&mut self) {
        self.shared.borrow_mut().released += 1;
    }
}
