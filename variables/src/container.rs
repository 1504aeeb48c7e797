//! Root-level variable scope (global, scene, or object variables).
//!
//! A [`VariablesContainer`] owns one [`VariableArena`] and an ordered list of
//! named roots pointing into it. Root names are unique; order is the order
//! shown in the editor.

#[cfg(test)]
#[path = "container_test.rs"]
mod container_test;

use crate::arena::{NodeId, VariableArena};
use crate::error::Result;

/// Ordered, name-indexed collection of root variables.
#[derive(Debug, Clone, Default)]
pub struct VariablesContainer {
    arena: VariableArena,
    roots: Vec<(String, NodeId)>,
}

impl VariablesContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arena holding every node of this container, including temporaries.
    #[must_use]
    pub fn arena(&self) -> &VariableArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut VariableArena {
        &mut self.arena
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.roots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Root variable called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.position(name).map(|index| self.roots[index].1)
    }

    /// Root variable and its name at `index`.
    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<(&str, NodeId)> {
        self.roots.get(index).map(|(name, id)| (name.as_str(), *id))
    }

    /// Position of the root called `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.roots.iter().position(|(existing, _)| existing == name)
    }

    /// Names of all roots, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.roots.iter().map(|(name, _)| name.as_str())
    }

    /// Copy `source` (a node of this container's arena) into a new root
    /// called `name` at `index`, clamped to the end. If `name` already exists
    /// nothing is inserted and the existing root is returned. `source` stays
    /// owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VariableError::StaleNode`] if `source` was released.
    pub fn insert(&mut self, name: &str, source: NodeId, index: usize) -> Result<NodeId> {
        if let Some(existing) = self.get(name) {
            return Ok(existing);
        }
        let copy = self.arena.deep_clone(source)?;
        let at = index.min(self.roots.len());
        self.roots.insert(at, (name.to_owned(), copy));
        Ok(copy)
    }

    /// Remove and release the root called `name`. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VariableError::StaleNode`] if the root's node was
    /// already released out from under the container.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        let Some(index) = self.position(name) else {
            return Ok(false);
        };
        let (_, id) = self.roots.remove(index);
        self.arena.release(id)?;
        Ok(true)
    }

    /// Rename a root in place. Fails (returns false) if `old` is missing or
    /// `new` is already taken.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.has(old);
        }
        if self.has(new) {
            return false;
        }
        match self.position(old) {
            Some(index) => {
                self.roots[index].0 = new.to_owned();
                true
            }
            None => false,
        }
    }
}
