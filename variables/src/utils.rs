//! Editor operations on variable trees: paste/insert with rename, and the
//! collection checks that drive tree expanders.
//!
//! Each insert builds a temporary node in the target arena, copies it into
//! its new parent, then releases the temporary, so after a call the arena
//! holds exactly the inserted subtree and nothing else.

#[cfg(test)]
#[path = "utils_test.rs"]
mod utils_test;

use serde_json::Value;
use tracing::debug;

use crate::arena::{NodeId, VariableArena};
use crate::container::VariablesContainer;
use crate::error::Result;
use crate::naming::{COPY_PREFIX, new_name_generator};
use crate::serializer::unserialize_from_value;
use crate::variable::VariableValue;

/// Owner of the arena a temporary lives in: a bare arena, or a container
/// whose roots the temporary is copied into.
trait ArenaHost {
    fn host_arena(&mut self) -> &mut VariableArena;
}

impl ArenaHost for VariableArena {
    fn host_arena(&mut self) -> &mut VariableArena {
        self
    }
}

impl ArenaHost for VariablesContainer {
    fn host_arena(&mut self) -> &mut VariableArena {
        self.arena_mut()
    }
}

/// Build a temporary node from `serialized`, hand it to `attach`, then
/// release it whether or not `attach` succeeded.
fn with_temporary<H: ArenaHost, T>(
    host: &mut H,
    serialized: Option<&Value>,
    attach: impl FnOnce(&mut H, NodeId) -> Result<T>,
) -> Result<T> {
    let temporary = host.host_arena().alloc(VariableValue::String(String::new()));
    let outcome = match serialized {
        Some(serialized) => unserialize_from_value(host.host_arena(), temporary, serialized),
        None => Ok(()),
    }
    .and_then(|()| attach(host, temporary));
    host.host_arena().release(temporary)?;
    outcome
}

/// Insert a root variable into `container` and return the name it got.
///
/// With `serialized` (a pasted variable), the name avoids collisions using
/// the `CopyOf` prefix; without it, a new empty string variable is created
/// and only a numeric suffix is used. `index` defaults to the end.
///
/// # Errors
///
/// Propagates [`crate::VariableError::Malformed`] from deserialization.
pub fn insert_in_variables_container(
    container: &mut VariablesContainer,
    name: &str,
    serialized: Option<&Value>,
    index: Option<usize>,
) -> Result<String> {
    let prefix = serialized.map(|_| COPY_PREFIX);
    let new_name = new_name_generator(name, |candidate| container.has(candidate), prefix);
    let at = index.unwrap_or_else(|| container.count());

    with_temporary(container, serialized, |container, temporary| {
        container.insert(&new_name, temporary, at)
    })?;

    debug!(name = %new_name, index = at, "variable inserted in container");
    Ok(new_name)
}

/// Insert a copy of `serialized` among the array children of `parent` at
/// `index`. Array children are positional, so nothing is renamed.
///
/// # Errors
///
/// Propagates [`crate::VariableError::Malformed`] from deserialization.
pub fn insert_in_variable_children_array(
    arena: &mut VariableArena,
    parent: NodeId,
    serialized: &Value,
    index: usize,
) -> Result<()> {
    with_temporary(arena, Some(serialized), |arena, temporary| {
        arena.insert_at_index(parent, temporary, index)
    })?;
    debug!(%parent, index, "variable inserted in array");
    Ok(())
}

/// Insert a copy of `serialized` among the structure children of `parent`
/// and return the name it got, using the `CopyOf` convention on collision.
///
/// # Errors
///
/// Propagates [`crate::VariableError::Malformed`] from deserialization.
pub fn insert_in_variable_children(
    arena: &mut VariableArena,
    parent: NodeId,
    name: &str,
    serialized: &Value,
) -> Result<String> {
    let taken = arena.all_children_names(parent)?;
    let new_name = new_name_generator(
        name,
        |candidate| taken.iter().any(|existing| existing == candidate),
        Some(COPY_PREFIX),
    );
    with_temporary(arena, Some(serialized), |arena, temporary| {
        arena.insert_child(parent, &new_name, temporary)
    })?;
    debug!(%parent, name = %new_name, "variable inserted in structure");
    Ok(new_name)
}

/// True when at least one root of `container` is a collection with children.
#[must_use]
pub fn has_variables_container_sub_children(container: &VariablesContainer) -> bool {
    (0..container.count())
        .filter_map(|index| container.get_at(index))
        .any(|(_, id)| match container.arena().get(id) {
            Ok(VariableValue::Structure(children)) => !children.is_empty(),
            Ok(VariableValue::Array(children)) => !children.is_empty(),
            _ => false,
        })
}

/// True when `id` is an array or a structure.
///
/// # Errors
///
/// Returns [`crate::VariableError::StaleNode`] if the node was released.
pub fn is_collection_variable(arena: &VariableArena, id: NodeId) -> Result<bool> {
    Ok(!arena.variable_type(id)?.is_primitive())
}
