//! Process-related WinAPI wrappers.
//!
//! Provides safe abstractions for enumerating processes by name, querying
//! their state, and terminating them.

use super::window::main_window_title;
use crate::error::{KillerError, KillerResult};
use crate::monitor::{matches_process_name, ProcessHandle, ProcessSource};
use std::mem;
use std::time::Duration;
use windows::Win32::Foundation::{CloseHandle, HANDLE, WAIT_OBJECT_0, WAIT_TIMEOUT};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};
use windows::Win32::System::Threading::{
    OpenProcess, TerminateProcess, WaitForSingleObject, PROCESS_ACCESS_RIGHTS,
    PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_SYNCHRONIZE, PROCESS_TERMINATE,
};

/// RAII wrapper for Windows handles.
///
/// Automatically closes the handle when dropped to prevent handle leaks.
struct OwnedHandle(HANDLE);

impl OwnedHandle {
    /// Opens a process with the given access rights.
    fn open_process(pid: u32, access: PROCESS_ACCESS_RIGHTS) -> windows::core::Result<Self> {
        let handle = unsafe { OpenProcess(access, false, pid)? };
        Ok(Self(handle))
    }

    fn as_raw(&self) -> HANDLE {
        self.0
    }
}

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// An open process, queried through a limited-information handle.
pub struct WinProcess {
    pid: u32,
    handle: OwnedHandle,
}

impl WinProcess {
    /// Opens `pid` with query and synchronize rights.
    fn open(pid: u32) -> KillerResult<Self> {
        let handle =
            OwnedHandle::open_process(pid, PROCESS_QUERY_LIMITED_INFORMATION | PROCESS_SYNCHRONIZE)
                .map_err(|e| KillerError::OpenProcess {
                    pid,
                    reason: e.to_string(),
                })?;
        Ok(Self { pid, handle })
    }

    /// Waits on the process handle. `Ok(true)` means the process has exited.
    fn wait(&self, millis: u32) -> windows::core::Result<bool> {
        let status = unsafe { WaitForSingleObject(self.handle.as_raw(), millis) };
        if status == WAIT_OBJECT_0 {
            Ok(true)
        } else if status == WAIT_TIMEOUT {
            Ok(false)
        } else {
            Err(windows::core::Error::from_win32())
        }
    }
}

impl ProcessHandle for WinProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn has_exited(&self) -> KillerResult<bool> {
        self.wait(0).map_err(|e| KillerError::ExitStatus {
            pid: self.pid,
            reason: e.to_string(),
        })
    }

    fn main_window_title(&self) -> KillerResult<String> {
        main_window_title(self.pid).map_err(|e| KillerError::WindowTitle {
            pid: self.pid,
            reason: e.to_string(),
        })
    }

    fn kill(&self) -> KillerResult<()> {
        let to_kill = |e: windows::core::Error| KillerError::Kill {
            pid: self.pid,
            reason: e.to_string(),
        };

        // The sampling handle only carries query rights
        let handle = OwnedHandle::open_process(self.pid, PROCESS_TERMINATE).map_err(to_kill)?;
        unsafe { TerminateProcess(handle.as_raw(), 1) }.map_err(to_kill)
    }

    fn wait_for_exit(&self, timeout: Duration) -> KillerResult<bool> {
        // u32::MAX is INFINITE
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX - 1);
        self.wait(millis).map_err(|e| KillerError::Wait {
            pid: self.pid,
            reason: e.to_string(),
        })
    }
}

/// Enumerates processes through a Toolhelp snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinProcessSource;

impl ProcessSource for WinProcessSource {
    type Handle = WinProcess;

    fn processes_by_name(&self, name: &str) -> KillerResult<Vec<WinProcess>> {
        let pids = find_pids_by_name(name).map_err(|e| KillerError::Enumeration {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let mut processes = Vec::with_capacity(pids.len());
        for pid in pids {
            match WinProcess::open(pid) {
                Ok(process) => processes.push(process),
                // Usually the process exited between the snapshot and the open
                Err(e) => tracing::error!(pid, error = %e, "Error opening process, skipping"),
            }
        }
        Ok(processes)
    }
}

/// Gets the IDs of all processes whose executable is called `name`.
///
/// # Arguments
/// * `name` - Process name without extension (e.g., "RuneLite")
///
/// # Example
/// ```no_run
/// use stormkill::winapi_utils::find_pids_by_name;
///
/// for pid in find_pids_by_name("RuneLite").unwrap_or_default() {
///     println!("RuneLite PID: {}", pid);
/// }
/// ```
pub fn find_pids_by_name(name: &str) -> windows::core::Result<Vec<u32>> {
    let snapshot = OwnedHandle(unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)? });

    let mut entry = PROCESSENTRY32W {
        dwSize: mem::size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };

    let mut pids = Vec::new();

    if unsafe { Process32FirstW(snapshot.as_raw(), &mut entry) }.is_ok() {
        loop {
            let len = entry
                .szExeFile
                .iter()
                .position(|&c| c == 0)
                .unwrap_or(entry.szExeFile.len());
            let exe_file = String::from_utf16_lossy(&entry.szExeFile[..len]);

            if matches_process_name(&exe_file, name) {
                pids.push(entry.th32ProcessID);
            }

            if unsafe { Process32NextW(snapshot.as_raw(), &mut entry) }.is_err() {
                break;
            }
        }
    }

    Ok(pids)
}
