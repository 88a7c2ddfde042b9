/// Before-render dispatcher — a mutex-guarded `OrderTable`.
///
/// Independent systems register callbacks with an integer order; the frame
/// loop calls `invoke()` once per frame to run them, ascending by order.
/// Every operation holds the lock for its full duration, so registration
/// from other threads waits until an in-flight pass completes.

use std::sync::{Arc, Mutex, MutexGuard};
use crate::error::Result;
use crate::{hooks_trace, hooks_warn};
use super::callback::{boxed_hook, BeforeRenderHook, CallbackHandle};
use super::order_table::OrderTable;
use super::registration::Registration;

const SOURCE: &str = "frame_hooks::Dispatcher";

/// Shared before-render callback dispatcher
///
/// Constructed explicitly and handed (usually as `Arc`) to whatever
/// drives the frame.
///
/// Callbacks must not call back into the dispatcher that is running them:
/// the lock is not re-entrant and doing so deadlocks.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use frame_hooks::hooks::BeforeRenderDispatcher;
///
/// let dispatcher = Arc::new(BeforeRenderDispatcher::new());
/// let handle = dispatcher.register(|| Ok(()), 10);
/// dispatcher.invoke()?;
/// dispatcher.unregister(handle, 10);
/// # Ok::<(), frame_hooks::hooks::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct BeforeRenderDispatcher {
    table: Mutex<OrderTable>,
}

impl BeforeRenderDispatcher {
    /// Create a dispatcher with no callbacks
    pub fn new() -> Self {
        Self {
            table: Mutex::new(OrderTable::new()),
        }
    }

    /// Lock the table, recovering it if a callback panicked mid-pass
    ///
    /// A panic inside `invoke` cannot leave the table structurally
    /// half-modified, so the poisoned guard is safe to reuse.
    fn table(&self) -> MutexGuard<'_, OrderTable> {
        self.table.lock().unwrap_or_else(|poisoned| {
            hooks_warn!(SOURCE, "Callback table lock poisoned by a panicking callback, recovering");
            self.table.clear_poison();
            poisoned.into_inner()
        })
    }

    /// Register a callback at `order`
    ///
    /// Lower orders run first. Callbacks sharing an order run in the order
    /// they were registered.
    pub fn register<F>(&self, callback: F, order: i32) -> CallbackHandle
    where
        F: FnMut() -> Result<()> + Send + 'static,
    {
        let handle = self.table().insert(Box::new(callback), order);
        hooks_trace!(SOURCE, "Registered callback {:?} at order {}", handle, order);
        handle
    }

    /// Register a hook at its declared `BeforeRenderHook::ORDER`
    pub fn register_hook<H: BeforeRenderHook>(&self, hook: H) -> CallbackHandle {
        let handle = self.table().insert(boxed_hook(hook), H::ORDER);
        hooks_trace!(SOURCE, "Registered hook {:?} at order {}", handle, H::ORDER);
        handle
    }

    /// Register a callback that is unregistered when the returned guard drops
    pub fn register_scoped<F>(self: &Arc<Self>, callback: F, order: i32) -> Registration
    where
        F: FnMut() -> Result<()> + Send + 'static,
    {
        let handle = self.register(callback, order);
        Registration::new(Arc::clone(self), handle, order)
    }

    /// Unregister the callback `handle` registered at `order`
    ///
    /// Returns false, and changes nothing, when that pair is not registered.
    pub fn unregister(&self, handle: CallbackHandle, order: i32) -> bool {
        let removed = self.table().remove(handle, order);
        if removed {
            hooks_trace!(SOURCE, "Unregistered callback {:?} at order {}", handle, order);
        }
        removed
    }

    /// Unregister `handle` at whatever order it was registered with
    pub fn unregister_handle(&self, handle: CallbackHandle) -> bool {
        let mut table = self.table();
        let order = match table.order_of(handle) {
            Some(order) => order,
            None => return false,
        };
        table.remove(handle, order)
    }

    /// Run one invoke pass
    ///
    /// Calls every callback ascending by order. The first error returned by
    /// a callback is propagated unchanged and the remaining callbacks are
    /// skipped for this pass.
    pub fn invoke(&self) -> Result<()> {
        self.table().invoke()
    }

    /// Run one invoke pass and report how many callbacks it covered
    ///
    /// The count is read under the same lock as the pass, so it matches
    /// the table the pass ran over.
    pub fn invoke_counted(&self) -> (usize, Result<()>) {
        let mut table = self.table();
        let count = table.len();
        (count, table.invoke())
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.table().len()
    }

    /// Whether no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// Number of priority slots
    pub fn block_count(&self) -> usize {
        self.table().block_count()
    }

    /// Orders of all priority slots, ascending
    pub fn orders(&self) -> Vec<i32> {
        self.table().orders().collect()
    }

    /// Snapshot of the chain at `order`, if that slot exists
    pub fn chain(&self, order: i32) -> Option<Vec<CallbackHandle>> {
        self.table().chain(order).map(<[CallbackHandle]>::to_vec)
    }

    /// Whether `handle` is currently registered
    pub fn contains(&self, handle: CallbackHandle) -> bool {
        self.table().contains(handle)
    }

    /// Order `handle` was registered at
    pub fn order_of(&self, handle: CallbackHandle) -> Option<i32> {
        self.table().order_of(handle)
    }

    /// Unregister everything
    pub fn clear(&self) {
        self.table().clear();
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
