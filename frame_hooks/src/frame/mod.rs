//! Frame loop module
//!
//! Provides the component that triggers the before-render dispatcher
//! once per frame, and its configuration.

mod config;
mod frame_loop;

pub use config::FrameLoopConfig;
pub use frame_loop::FrameLoop;
