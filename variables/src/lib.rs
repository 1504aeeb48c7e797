//! Variable trees for game projects.
//!
//! A project stores its global, scene, and object variables as trees of
//! tagged values. This crate owns those trees in an arena of nodes addressed
//! by [`arena::NodeId`], plus the editor-side helpers that search them and
//! insert copies without clobbering sibling names.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`arena`] | Node storage, subtree copy and release |
//! | [`variable`] | Variant types and the per-node accessors |
//! | [`container`] | Ordered, name-indexed root scope |
//! | [`serializer`] | JSON variable format in and out |
//! | [`naming`] | Collision-free name generation |
//! | [`search`] | Case- and diacritic-insensitive text search |
//! | [`utils`] | Editor operations: insert-with-rename, collection checks |
//! | [`error`] | Crate error type |

pub mod arena;
pub mod container;
pub mod error;
pub mod naming;
pub mod search;
pub mod serializer;
pub mod utils;
pub mod variable;

pub use arena::{NodeId, VariableArena};
pub use container::VariablesContainer;
pub use error::{Result, VariableError};
pub use variable::{VariableType, VariableValue};
