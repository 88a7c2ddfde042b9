/// Frame loop — fires the before-render dispatcher once per frame.
///
/// The loop owns a shared dispatcher and a frame counter. Each call to
/// `run_frame` is one frame: run the before-render pass, then hand the
/// frame index to the caller's render step.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::dispatch::BeforeRenderDispatcher;
use crate::{hooks_debug, hooks_error, hooks_trace};
use super::config::FrameLoopConfig;

/// Per-frame trigger for a `BeforeRenderDispatcher`
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use frame_hooks::hooks::{BeforeRenderDispatcher, FrameLoop, FrameLoopConfig};
///
/// let dispatcher = Arc::new(BeforeRenderDispatcher::new());
/// dispatcher.register(|| Ok(()), 0);
///
/// let mut frame_loop = FrameLoop::new(dispatcher, FrameLoopConfig::default())?;
/// frame_loop.run_frame(|frame| {
///     // submit draw calls for `frame`...
///     Ok(())
/// })?;
/// # Ok::<(), frame_hooks::hooks::Error>(())
/// ```
pub struct FrameLoop {
    dispatcher: Arc<BeforeRenderDispatcher>,
    config: FrameLoopConfig,
    /// Index of the next frame to run
    frame_index: u64,
}

impl FrameLoop {
    /// Create a frame loop driving `dispatcher`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the configuration is rejected.
    pub fn new(dispatcher: Arc<BeforeRenderDispatcher>, config: FrameLoopConfig) -> Result<Self> {
        config.validate()?;
        hooks_debug!(&config.log_source, "Frame loop created");
        Ok(Self {
            dispatcher,
            config,
            frame_index: 0,
        })
    }

    /// Run one frame
    ///
    /// Runs the before-render pass, then `render` with the frame index.
    /// If the pass fails, `render` is skipped and the callback's error is
    /// returned unchanged. A failing `render` is reported as
    /// `Error::FrameFailed`. The frame index advances either way.
    pub fn run_frame<R>(&mut self, render: R) -> Result<()>
    where
        R: FnOnce(u64) -> Result<()>,
    {
        let frame = self.frame_index;
        self.frame_index += 1;

        let (count, pass) = self.dispatcher.invoke_counted();
        if self.config.trace_dispatch {
            hooks_trace!(&self.config.log_source,
                "Frame {}: before-render pass over {} callbacks", frame, count);
        }

        if let Err(error) = pass {
            hooks_error!(&self.config.log_source,
                "Frame {}: before-render pass aborted: {}", frame, error);
            return Err(error);
        }

        render(frame).map_err(|error| {
            hooks_error!(&self.config.log_source, "Frame {}: render failed: {}", frame, error);
            Error::FrameFailed {
                frame,
                reason: error.to_string(),
            }
        })
    }

    /// Index the next `run_frame` call will use
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Dispatcher this loop fires
    pub fn dispatcher(&self) -> &Arc<BeforeRenderDispatcher> {
        &self.dispatcher
    }

    /// Active configuration
    pub fn config(&self) -> &FrameLoopConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "frame_loop_tests.rs"]
mod tests;
