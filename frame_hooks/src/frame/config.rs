/// Frame loop configuration

use crate::error::{Error, Result};

/// Configuration for a `FrameLoop`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLoopConfig {
    /// Source name attached to every log entry the frame loop emits
    pub log_source: String,
    /// Emit a TRACE entry for every dispatch pass
    pub trace_dispatch: bool,
}

impl FrameLoopConfig {
    /// Reject configurations the frame loop cannot run with
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `log_source` is empty or blank.
    pub fn validate(&self) -> Result<()> {
        if self.log_source.trim().is_empty() {
            return Err(Error::InvalidConfig("log_source must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for FrameLoopConfig {
    fn default() -> Self {
        Self {
            log_source: "frame_hooks::FrameLoop".to_string(),
            trace_dispatch: false,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
