//! Before-render callback dispatch
//!
//! Provides the priority-bucketed callback table, the mutex-guarded
//! dispatcher built on it, and scoped registration guards.

mod callback;
mod order_table;
mod dispatcher;
mod registration;

pub use callback::{BeforeRenderCallback, BeforeRenderHook, CallbackHandle, DEFAULT_ORDER};
pub use order_table::{OrderBlock, OrderTable};
pub use dispatcher::BeforeRenderDispatcher;
pub use registration::Registration;
