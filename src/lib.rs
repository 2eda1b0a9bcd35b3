//! stormkill - RuneLite stuck-client killer
//!
//! Polls the running `RuneLite` processes, tracks how long each one has kept
//! the bare `RuneLite` window title, and forcibly terminates any that hold it
//! past the kill threshold.

pub mod config;
pub mod error;
pub mod monitor;

#[cfg(windows)]
pub mod winapi_utils;

pub use config::KillerConfig;
pub use error::{KillerError, KillerResult};
