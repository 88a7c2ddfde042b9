/*!
# Frame Hooks

Ordered before-render callbacks for a frame-driven engine.

Independent systems (texture streaming, LOD selection, trail and line
renderers, GPU readback bookkeeping, ...) register zero-argument callbacks
tagged with an integer order. Once per frame the frame loop fires the
dispatcher, which runs every callback ascending by order; callbacks that
share an order run in the order they were registered.

## Architecture

- **BeforeRenderDispatcher**: mutex-guarded callback table, shared via `Arc`
- **OrderTable**: the priority-bucketed table itself (one block per order)
- **BeforeRenderHook**: callback object declaring its own order
- **Registration**: guard that unregisters its callback on drop
- **FrameLoop**: per-frame trigger that owns a dispatcher
*/

// Internal modules
mod error;
pub mod log;
pub mod dispatch;
pub mod frame;

// Main hooks namespace module
pub mod hooks {
    // Error types
    pub use crate::error::{Error, Result};

    // Dispatch types
    pub use crate::dispatch::{
        BeforeRenderCallback, BeforeRenderDispatcher, BeforeRenderHook,
        CallbackHandle, OrderBlock, OrderTable, Registration, DEFAULT_ORDER,
    };

    // Frame loop
    pub use crate::frame::{FrameLoop, FrameLoopConfig};

    // Logging sub-module (types and logger slot, NOT macros)
    pub mod log {
        pub use crate::log::{
            format_entry, reset_logger, set_logger,
            DefaultLogger, LogEntry, LogSeverity, Logger,
        };
    }
}
