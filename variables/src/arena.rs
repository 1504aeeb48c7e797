//! Node storage for variable trees.
//!
//! DESIGN
//! ======
//! Every variable lives in a slot of a [`VariableArena`]. Parents refer to
//! their children by [`NodeId`], so the arena is the single owner and there
//! are no reference cycles. A `NodeId` carries the generation of the slot it
//! was issued for; once a slot is released and reused, old ids stop
//! resolving and surface as [`VariableError::StaleNode`] instead of reading
//! the new occupant.
//!
//! Inserting a variable into a parent always copies the source subtree into
//! fresh slots. A temporary node built for an insertion is therefore still
//! owned by the caller afterwards and must be released with
//! [`VariableArena::release`].

#[cfg(test)]
#[path = "arena_test.rs"]
mod arena_test;

use std::fmt;

use crate::error::{Result, VariableError};
use crate::variable::VariableValue;

/// Handle to a node inside a [`VariableArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    value: Option<VariableValue>,
}

/// Owning store for variable nodes.
#[derive(Debug, Clone, Default)]
pub struct VariableArena {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
}

impl VariableArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Allocate a node holding `value`. Child ids inside `value` become owned
    /// by the new node.
    pub fn alloc(&mut self, value: VariableValue) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.value = Some(value);
            return NodeId { index, generation: slot.generation };
        }
        self.slots.push(Slot { generation: 0, value: Some(value) });
        NodeId { index: self.slots.len() - 1, generation: 0 }
    }

    /// True when `id` still resolves to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_ok()
    }

    /// Borrow the value stored at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the slot was released.
    pub fn get(&self, id: NodeId) -> Result<&VariableValue> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
            .ok_or(VariableError::StaleNode(id))
    }

    /// Mutably borrow the value stored at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the slot was released.
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut VariableValue> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
            .ok_or(VariableError::StaleNode(id))
    }

    /// Overwrite the value at `id`, releasing every child the old value owned.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the slot was released.
    pub fn replace(&mut self, id: NodeId, value: VariableValue) -> Result<()> {
        let old = std::mem::replace(self.get_mut(id)?, value);
        for child in old.child_ids() {
            self.release(child)?;
        }
        Ok(())
    }

    /// Release `id` and its whole subtree. The slots become reusable and all
    /// ids pointing into the subtree go stale.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if `id` was already released.
    pub fn release(&mut self, id: NodeId) -> Result<()> {
        self.get(id)?;
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let Some(slot) = self
                .slots
                .get_mut(next.index)
                .filter(|slot| slot.generation == next.generation)
            else {
                continue;
            };
            let Some(value) = slot.value.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(next.index);
            self.live -= 1;
            pending.extend(value.child_ids());
        }
        Ok(())
    }

    /// Copy the subtree rooted at `id` into fresh slots and return the new root.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if any node of the subtree is stale.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId> {
        let value = match self.get(id)?.clone() {
            VariableValue::Structure(children) => {
                let mut copied = std::collections::BTreeMap::new();
                for (name, child) in children {
                    copied.insert(name, self.deep_clone(child)?);
                }
                VariableValue::Structure(copied)
            }
            VariableValue::Array(children) => {
                let mut copied = Vec::with_capacity(children.len());
                for child in children {
                    copied.push(self.deep_clone(child)?);
                }
                VariableValue::Array(copied)
            }
            primitive => primitive,
        };
        Ok(self.alloc(value))
    }

    /// Copy the subtree rooted at `id` in `source` into this arena.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if any node of the subtree is stale
    /// in `source`.
    pub fn import(&mut self, source: &VariableArena, id: NodeId) -> Result<NodeId> {
        let value = match source.get(id)? {
            VariableValue::Structure(children) => {
                let mut copied = std::collections::BTreeMap::new();
                for (name, child) in children {
                    copied.insert(name.clone(), self.import(source, *child)?);
                }
                VariableValue::Structure(copied)
            }
            VariableValue::Array(children) => {
                let mut copied = Vec::with_capacity(children.len());
                for child in children {
                    copied.push(self.import(source, *child)?);
                }
                VariableValue::Array(copied)
            }
            primitive => primitive.clone(),
        };
        Ok(self.alloc(value))
    }
}
