//! Safe wrappers around Windows API calls.
//!
//! This module provides the Windows implementation of the process
//! collaborator: Toolhelp enumeration, main window lookup, and
//! termination through process handles.

pub mod process;
pub mod window;

pub use process::*;
pub use window::*;
