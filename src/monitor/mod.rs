//! Core monitoring logic.
//!
//! This module contains the sampling, tracking and termination steps of a
//! polling cycle, plus the loop that drives them.

pub mod clock;
pub mod poller;
pub mod process;
pub mod sampler;
pub mod terminator;
pub mod tracker;

#[cfg(test)]
pub(crate) mod testing;

pub use clock::*;
pub use poller::*;
pub use process::*;
pub use sampler::*;
pub use terminator::*;
pub use tracker::*;
