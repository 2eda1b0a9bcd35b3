//! Error types shared by the sampler, terminator and platform layer.

use thiserror::Error;

/// Result alias used across the crate.
pub type KillerResult<T> = Result<T, KillerError>;

/// Errors raised while querying or killing processes.
///
/// Every variant is recoverable: the poller logs it and moves on to the next
/// process or the next cycle.
#[derive(Debug, Error)]
pub enum KillerError {
    #[error("failed to enumerate '{name}' processes: {reason}")]
    Enumeration { name: String, reason: String },

    #[error("failed to open process {pid}: {reason}")]
    OpenProcess { pid: u32, reason: String },

    #[error("failed to query exit status of process {pid}: {reason}")]
    ExitStatus { pid: u32, reason: String },

    #[error("failed to read main window title of process {pid}: {reason}")]
    WindowTitle { pid: u32, reason: String },

    #[error("failed to kill process {pid}: {reason}")]
    Kill { pid: u32, reason: String },

    #[error("failed to wait for process {pid} to exit: {reason}")]
    Wait { pid: u32, reason: String },

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_process() {
        let err = KillerError::Kill {
            pid: 4242,
            reason: "Access is denied.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to kill process 4242: Access is denied."
        );

        let err = KillerError::Enumeration {
            name: "RuneLite".to_string(),
            reason: "snapshot failed".to_string(),
        };
        assert!(err.to_string().contains("'RuneLite'"));
    }
}
