//! Text search over variable trees, used by the variables editor filter.
//!
//! Matching is substring-based on normalized text: canonical decomposition
//! (NFD) then lowercase, so "É" and "é" both match a search for "e\u{301}".
//! Callers normalize the search text once with [`normalize_search_text`].

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use unicode_normalization::UnicodeNormalization;

use crate::arena::{NodeId, VariableArena};
use crate::error::Result;
use crate::variable::{VariableValue, format_number};

/// Normalize text for matching: NFD, then lowercase.
#[must_use]
pub fn normalize_search_text(text: &str) -> String {
    text.nfd().collect::<String>().to_lowercase()
}

/// True when `search` (already normalized) occurs in the value of `id`, or
/// anywhere below it: descendant string and number values, and the names of
/// structure children. Booleans never match; the variable's own name is not
/// part of the search.
///
/// # Errors
///
/// Returns [`crate::VariableError::StaleNode`] if a node of the subtree was
/// released.
pub fn has_child_that_contains_string_in_name_or_value(
    arena: &VariableArena,
    id: NodeId,
    search: &str,
) -> Result<bool> {
    let mut pending = vec![id];
    while let Some(next) = pending.pop() {
        match arena.get(next)? {
            VariableValue::String(text) => {
                if normalize_search_text(text).contains(search) {
                    return Ok(true);
                }
            }
            VariableValue::Number(number) => {
                if format_number(*number).contains(search) {
                    return Ok(true);
                }
            }
            VariableValue::Boolean(_) => {}
            VariableValue::Array(children) => pending.extend(children.iter().rev()),
            VariableValue::Structure(children) => {
                if children.keys().any(|name| normalize_search_text(name).contains(search)) {
                    return Ok(true);
                }
                pending.extend(children.values().rev());
            }
        }
    }
    Ok(false)
}
