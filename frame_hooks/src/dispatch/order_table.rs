/// Priority-bucketed callback table.
///
/// Callbacks are grouped into blocks by order. Blocks are kept sorted
/// ascending by order, no two blocks share an order, and no block is
/// left with an empty chain. Within a block, callbacks keep the order
/// in which they were registered.
///
/// The table is single-threaded; `BeforeRenderDispatcher` wraps it in a
/// mutex for shared use.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use slotmap::SlotMap;
use crate::error::Result;
use super::callback::{BeforeRenderCallback, CallbackHandle, CallbackKey};

/// Source of per-table ids carried by every handle
static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// One priority slot: an order value and the chain of callbacks at it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBlock {
    order: i32,
    chain: Vec<CallbackHandle>,
}

impl OrderBlock {
    /// Priority shared by every callback in this block
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Callbacks in this block, in registration order
    pub fn chain(&self) -> &[CallbackHandle] {
        &self.chain
    }
}

struct CallbackEntry {
    /// Order the callback was registered at
    order: i32,
    callback: BeforeRenderCallback,
}

/// Ordered table of before-render callbacks
pub struct OrderTable {
    /// Process-unique id stamped into the handles this table issues
    id: u64,
    /// Blocks sorted ascending by order
    blocks: Vec<OrderBlock>,
    /// Callback storage keyed by handle
    callbacks: SlotMap<CallbackKey, CallbackEntry>,
}

impl OrderTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            blocks: Vec::new(),
            callbacks: SlotMap::with_key(),
        }
    }

    /// Register a callback at `order`
    ///
    /// Appends to the chain of an existing block with the same order,
    /// otherwise inserts a new block before the first block with a
    /// greater order.
    pub fn insert(&mut self, callback: BeforeRenderCallback, order: i32) -> CallbackHandle {
        let key = self.callbacks.insert(CallbackEntry { order, callback });
        let handle = CallbackHandle::new(self.id, key);

        let index = self.blocks
            .iter()
            .position(|block| block.order >= order)
            .unwrap_or(self.blocks.len());

        let slot_exists = self.blocks
            .get(index)
            .is_some_and(|block| block.order == order);

        if slot_exists {
            self.blocks[index].chain.push(handle);
        } else {
            self.blocks.insert(index, OrderBlock {
                order,
                chain: vec![handle],
            });
        }

        handle
    }

    /// Unregister `handle` from the block at `order`
    ///
    /// Removes the block when its chain becomes empty. Returns false and
    /// leaves the table untouched when the pair is not registered.
    pub fn remove(&mut self, handle: CallbackHandle, order: i32) -> bool {
        let key = match self.key_of(handle) {
            Some(key) => key,
            None => return false,
        };

        let index = match self.blocks
            .iter()
            .take_while(|block| block.order <= order)
            .position(|block| block.order == order)
        {
            Some(index) => index,
            None => return false,
        };

        let block = &mut self.blocks[index];
        let position = match block.chain.iter().position(|h| *h == handle) {
            Some(position) => position,
            None => return false,
        };

        block.chain.remove(position);
        if block.chain.is_empty() {
            self.blocks.remove(index);
        }
        self.callbacks.remove(key);
        true
    }

    /// Unregister `handle` at whatever order it was registered with
    pub fn remove_handle(&mut self, handle: CallbackHandle) -> bool {
        match self.order_of(handle) {
            Some(order) => self.remove(handle, order),
            None => false,
        }
    }

    /// Run every callback, ascending by order, chains in registration order
    ///
    /// Stops at the first callback that returns an error and returns that
    /// error unchanged; the callbacks after it do not run in this pass.
    pub fn invoke(&mut self) -> Result<()> {
        for block in &self.blocks {
            for handle in &block.chain {
                if let Some(entry) = self.callbacks.get_mut(handle.key()) {
                    (entry.callback)()?;
                }
            }
        }
        Ok(())
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Number of priority slots
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// All blocks, ascending by order
    pub fn blocks(&self) -> &[OrderBlock] {
        &self.blocks
    }

    /// Orders of all blocks, ascending
    pub fn orders(&self) -> impl Iterator<Item = i32> + '_ {
        self.blocks.iter().map(|block| block.order)
    }

    /// Chain registered at `order`, if that slot exists
    pub fn chain(&self, order: i32) -> Option<&[CallbackHandle]> {
        self.blocks
            .iter()
            .find(|block| block.order == order)
            .map(|block| block.chain.as_slice())
    }

    /// Whether `handle` is currently registered
    pub fn contains(&self, handle: CallbackHandle) -> bool {
        self.key_of(handle)
            .is_some_and(|key| self.callbacks.contains_key(key))
    }

    /// Order `handle` was registered at
    pub fn order_of(&self, handle: CallbackHandle) -> Option<i32> {
        self.key_of(handle)
            .and_then(|key| self.callbacks.get(key))
            .map(|entry| entry.order)
    }

    /// Slot key of `handle`, if this table issued it
    fn key_of(&self, handle: CallbackHandle) -> Option<CallbackKey> {
        (handle.table() == self.id).then(|| handle.key())
    }

    /// Drop every callback and block
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.callbacks.clear();
    }
}

impl Default for OrderTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OrderTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderTable")
            .field("blocks", &self.blocks)
            .finish()
    }
}

#[cfg(test)]
#[path = "order_table_tests.rs"]
mod tests;
