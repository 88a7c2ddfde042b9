/// Scoped registration guard.
///
/// Keeps a callback registered for as long as the guard lives.

use std::sync::Arc;
use super::callback::CallbackHandle;
use super::dispatcher::BeforeRenderDispatcher;

/// Unregisters its callback from the dispatcher when dropped
///
/// Created by `BeforeRenderDispatcher::register_scoped`.
#[must_use = "dropping a Registration immediately unregisters its callback"]
pub struct Registration {
    dispatcher: Arc<BeforeRenderDispatcher>,
    handle: CallbackHandle,
    order: i32,
    /// Cleared by `release()` so drop leaves the callback in place
    active: bool,
}

impl Registration {
    pub(crate) fn new(
        dispatcher: Arc<BeforeRenderDispatcher>,
        handle: CallbackHandle,
        order: i32,
    ) -> Self {
        Self {
            dispatcher,
            handle,
            order,
            active: true,
        }
    }

    /// Handle of the guarded callback
    pub fn handle(&self) -> CallbackHandle {
        self.handle
    }

    /// Order the callback was registered at
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Detach the guard, leaving the callback registered
    ///
    /// Returns the handle so the caller can unregister it manually later.
    pub fn release(mut self) -> CallbackHandle {
        self.active = false;
        self.handle
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if self.active {
            self.dispatcher.unregister(self.handle, self.order);
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("handle", &self.handle)
            .field("order", &self.order)
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
