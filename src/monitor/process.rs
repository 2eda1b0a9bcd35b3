//! Process collaborator traits.
//!
//! The monitor never talks to the operating system directly. It enumerates
//! processes through a [`ProcessSource`] and queries or kills each one
//! through its [`ProcessHandle`]. Dropping a handle releases whatever OS
//! resource backs it.

use crate::error::KillerResult;
use std::path::Path;
use std::time::Duration;

/// A live reference to one process.
///
/// Implementations must release their OS handle in `Drop`, so a handle is
/// freed on every exit path of a cycle.
pub trait ProcessHandle {
    /// Process ID.
    fn pid(&self) -> u32;

    /// Whether the process has already exited.
    fn has_exited(&self) -> KillerResult<bool>;

    /// Title of the process's main window.
    ///
    /// Returns an empty string when the process has no main window.
    fn main_window_title(&self) -> KillerResult<String>;

    /// Requests forceful termination.
    fn kill(&self) -> KillerResult<()>;

    /// Blocks until the process exits or `timeout` elapses.
    ///
    /// Returns `true` if the process exited within the timeout.
    fn wait_for_exit(&self, timeout: Duration) -> KillerResult<bool>;
}

/// Enumerates processes by name.
pub trait ProcessSource {
    type Handle: ProcessHandle;

    /// Returns a handle for every running process called `name`.
    fn processes_by_name(&self, name: &str) -> KillerResult<Vec<Self::Handle>>;
}

/// Checks whether an executable file name refers to the process `name`.
///
/// The comparison uses the file stem (`RuneLite.exe` -> `RuneLite`) and
/// ignores ASCII case, matching how Windows names processes.
pub fn matches_process_name(exe_file: &str, name: &str) -> bool {
    Path::new(exe_file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_process_name_strips_extension() {
        assert!(matches_process_name("RuneLite.exe", "RuneLite"));
        assert!(matches_process_name("runelite.EXE", "RuneLite"));
        assert!(matches_process_name("RuneLite", "RuneLite"));
    }

    #[test]
    fn test_matches_process_name_rejects_other_names() {
        assert!(!matches_process_name("RuneLiteLauncher.exe", "RuneLite"));
        assert!(!matches_process_name("java.exe", "RuneLite"));
        assert!(!matches_process_name("", "RuneLite"));
    }
}
