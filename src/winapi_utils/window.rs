//! Window-related WinAPI wrappers.
//!
//! Provides safe abstractions for finding a process's main window and
//! reading window text.

use windows::Win32::Foundation::{BOOL, FALSE, HWND, LPARAM, TRUE};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowLongPtrW, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsWindowVisible, GWLP_HWNDPARENT,
};

/// Gets the title of a process's main window.
///
/// The main window is the first visible, unowned top-level window that
/// belongs to the process. Returns an empty string if there is none.
///
/// # Arguments
/// * `pid` - Process ID
///
/// # Example
/// ```no_run
/// use stormkill::winapi_utils::main_window_title;
///
/// let title = main_window_title(std::process::id()).unwrap_or_default();
/// println!("Main window title: {}", title);
/// ```
pub fn main_window_title(pid: u32) -> windows::core::Result<String> {
    let mut search = MainWindowSearch { pid, found: None };

    let result = unsafe {
        EnumWindows(
            Some(find_main_window),
            LPARAM(&mut search as *mut MainWindowSearch as isize),
        )
    };

    // EnumWindows reports an error when the callback stops it early
    if let Some(hwnd) = search.found {
        return Ok(get_window_text(hwnd));
    }
    result?;

    Ok(String::new())
}

struct MainWindowSearch {
    pid: u32,
    found: Option<HWND>,
}

unsafe extern "system" fn find_main_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let search = &mut *(lparam.0 as *mut MainWindowSearch);

    let (_, owner_pid) = get_window_thread_process_id(hwnd);
    if owner_pid == search.pid && is_main_window(hwnd) {
        search.found = Some(hwnd);
        return FALSE;
    }

    TRUE
}

/// Visible top-level window with no owner window.
fn is_main_window(hwnd: HWND) -> bool {
    unsafe { IsWindowVisible(hwnd).as_bool() && GetWindowLongPtrW(hwnd, GWLP_HWNDPARENT) == 0 }
}

/// Gets the title text of a window.
///
/// Returns an empty string if the window has no title or if the call fails.
/// Handles Unicode window titles correctly.
///
/// # Arguments
/// * `hwnd` - Handle to the window
pub fn get_window_text(hwnd: HWND) -> String {
    unsafe {
        let len = GetWindowTextLengthW(hwnd);
        if len == 0 {
            return String::new();
        }

        // Allocate buffer with space for null terminator
        let mut buffer: Vec<u16> = vec![0; (len + 1) as usize];

        let copied = GetWindowTextW(hwnd, &mut buffer);
        if copied == 0 {
            return String::new();
        }

        String::from_utf16_lossy(&buffer[..copied as usize])
    }
}

/// Gets the thread ID and process ID of the window's owner.
///
/// # Returns
/// A tuple of `(thread_id, process_id)`. Both will be 0 if the call fails.
pub fn get_window_thread_process_id(hwnd: HWND) -> (u32, u32) {
    let mut process_id: u32 = 0;
    let thread_id = unsafe { GetWindowThreadProcessId(hwnd, Some(&mut process_id)) };
    (thread_id, process_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_window_text_empty_on_invalid_handle() {
        let invalid_hwnd = HWND(std::ptr::null_mut());
        let text = get_window_text(invalid_hwnd);
        assert!(text.is_empty());
    }

    #[test]
    fn test_get_window_thread_process_id_on_invalid_handle() {
        let invalid_hwnd = HWND(std::ptr::null_mut());
        let (tid, pid) = get_window_thread_process_id(invalid_hwnd);
        assert_eq!(tid, 0);
        assert_eq!(pid, 0);
    }

    #[test]
    fn test_main_window_title_without_window_is_empty() {
        // PID 0 never owns a window
        let title = main_window_title(0).unwrap();
        assert!(title.is_empty());
    }
}
