/// Callback types for the before-render dispatcher.
///
/// A callback is either a boxed closure registered with an explicit order,
/// or a `BeforeRenderHook` object that declares its own order.

use slotmap::new_key_type;
use crate::error::Result;

new_key_type! {
    /// Slot key of a callback inside one table
    pub(crate) struct CallbackKey;
}

/// Stable handle for a registered before-render callback.
///
/// Returned by every registration and used to unregister. A handle is
/// bound to the table that issued it and never matches a callback in
/// another table. Handles are versioned: a handle whose callback was
/// removed never matches a callback registered later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle {
    /// Id of the issuing table
    table: u64,
    key: CallbackKey,
}

impl CallbackHandle {
    pub(crate) fn new(table: u64, key: CallbackKey) -> Self {
        Self { table, key }
    }

    pub(crate) fn table(&self) -> u64 {
        self.table
    }

    pub(crate) fn key(&self) -> CallbackKey {
        self.key
    }
}

/// Order used when a callback does not declare one
pub const DEFAULT_ORDER: i32 = 0;

/// Boxed zero-argument callback run once per invoke pass.
///
/// Returning `Err` aborts the remainder of the pass.
pub type BeforeRenderCallback = Box<dyn FnMut() -> Result<()> + Send + 'static>;

/// A before-render callback that carries its own order.
///
/// Implementors that do not override `ORDER` run at `DEFAULT_ORDER`.
///
/// # Example
///
/// ```no_run
/// use frame_hooks::hooks::{BeforeRenderHook, Result};
///
/// struct FlushTrails;
///
/// impl BeforeRenderHook for FlushTrails {
///     const ORDER: i32 = -10;
///
///     fn before_render(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait BeforeRenderHook: Send + 'static {
    /// Priority of this hook; lower runs first
    const ORDER: i32 = DEFAULT_ORDER;

    /// Called once per invoke pass
    fn before_render(&mut self) -> Result<()>;
}

/// Box a hook into a plain callback
pub(crate) fn boxed_hook<H: BeforeRenderHook>(mut hook: H) -> BeforeRenderCallback {
    Box::new(move || hook.before_render())
}
