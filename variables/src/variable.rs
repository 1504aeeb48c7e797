//! Variable variants and the per-node accessors.
//!
//! [`VariableValue`] is the tagged union stored in each arena slot: one case
//! per variant, each carrying only what that case needs. The accessors on
//! [`VariableArena`] follow the engine's reading rules (numbers read as text,
//! strings parsed as numbers) so callers never match on the value just to
//! display it.

#[cfg(test)]
#[path = "variable_test.rs"]
mod variable_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::arena::{NodeId, VariableArena};
use crate::error::{Result, VariableError};

/// Kind of a variable, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    String,
    Number,
    Boolean,
    Structure,
    Array,
}

impl VariableType {
    /// True for the scalar kinds: string, number, boolean.
    #[must_use]
    pub fn is_primitive(self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Boolean)
    }

    /// Name used in the serialized format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Structure => "structure",
            Self::Array => "array",
        }
    }

    /// Parse a serialized type name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "structure" => Some(Self::Structure),
            "array" => Some(Self::Array),
            _ => None,
        }
    }
}

/// Payload of one variable node.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableValue {
    String(String),
    Number(f64),
    Boolean(bool),
    /// Name-keyed children, iterated in name order.
    Structure(BTreeMap<String, NodeId>),
    /// Positional children.
    Array(Vec<NodeId>),
}

impl Default for VariableValue {
    fn default() -> Self {
        Self::String(String::new())
    }
}

impl VariableValue {
    #[must_use]
    pub fn variable_type(&self) -> VariableType {
        match self {
            Self::String(_) => VariableType::String,
            Self::Number(_) => VariableType::Number,
            Self::Boolean(_) => VariableType::Boolean,
            Self::Structure(_) => VariableType::Structure,
            Self::Array(_) => VariableType::Array,
        }
    }

    /// Ids of the direct children, in iteration order.
    #[must_use]
    pub fn child_ids(&self) -> Vec<NodeId> {
        match self {
            Self::Structure(children) => children.values().copied().collect(),
            Self::Array(children) => children.clone(),
            _ => Vec::new(),
        }
    }
}

/// Text form of a number as the editor shows it: shortest round-trip
/// decimal, no trailing `.0`, no negative zero. Magnitudes from `1e21` up
/// and below `1e-6` use exponent form with an explicit sign (`1e+21`, `1e-7`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exponent_form = format!("{value:e}");
        return match exponent_form.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
            _ => exponent_form,
        };
    }
    value.to_string()
}

impl VariableArena {
    /// Kind of the variable at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the node was released.
    pub fn variable_type(&self, id: NodeId) -> Result<VariableType> {
        Ok(self.get(id)?.variable_type())
    }

    /// Text value. Numbers and booleans are rendered, collections read as empty.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the node was released.
    pub fn string(&self, id: NodeId) -> Result<String> {
        Ok(match self.get(id)? {
            VariableValue::String(text) => text.clone(),
            VariableValue::Number(number) => format_number(*number),
            VariableValue::Boolean(flag) => flag.to_string(),
            VariableValue::Structure(_) | VariableValue::Array(_) => String::new(),
        })
    }

    /// Numeric value. Strings are parsed (0 when not a number), booleans read
    /// as 1 or 0, collections as 0.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the node was released.
    pub fn value(&self, id: NodeId) -> Result<f64> {
        Ok(match self.get(id)? {
            VariableValue::Number(number) => *number,
            VariableValue::String(text) => text.trim().parse().unwrap_or(0.0),
            VariableValue::Boolean(flag) => f64::from(u8::from(*flag)),
            VariableValue::Structure(_) | VariableValue::Array(_) => 0.0,
        })
    }

    /// Boolean value. Only `Boolean(true)` reads as true.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the node was released.
    pub fn boolean(&self, id: NodeId) -> Result<bool> {
        Ok(matches!(self.get(id)?, VariableValue::Boolean(true)))
    }

    /// Turn the node into a string variable.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the node was released.
    pub fn set_string(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        self.replace(id, VariableValue::String(text.into()))
    }

    /// Turn the node into a number variable.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the node was released.
    pub fn set_value(&mut self, id: NodeId, number: f64) -> Result<()> {
        self.replace(id, VariableValue::Number(number))
    }

    /// Turn the node into a boolean variable.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the node was released.
    pub fn set_bool(&mut self, id: NodeId, flag: bool) -> Result<()> {
        self.replace(id, VariableValue::Boolean(flag))
    }

    /// Number of direct children (0 for primitives).
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the node was released.
    pub fn children_count(&self, id: NodeId) -> Result<usize> {
        Ok(match self.get(id)? {
            VariableValue::Structure(children) => children.len(),
            VariableValue::Array(children) => children.len(),
            _ => 0,
        })
    }

    /// Child of an array at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::NotACollection`] for non-arrays and
    /// [`VariableError::IndexOutOfRange`] past the end.
    pub fn at_index(&self, id: NodeId, index: usize) -> Result<NodeId> {
        let VariableValue::Array(children) = self.get(id)? else {
            return Err(VariableError::NotACollection(id));
        };
        children
            .get(index)
            .copied()
            .ok_or(VariableError::IndexOutOfRange { index, len: children.len() })
    }

    /// Names of a structure's children in name order (empty for other kinds).
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the node was released.
    pub fn all_children_names(&self, id: NodeId) -> Result<Vec<String>> {
        Ok(match self.get(id)? {
            VariableValue::Structure(children) => children.keys().cloned().collect(),
            _ => Vec::new(),
        })
    }

    /// Named child of a structure, if present.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the node was released.
    pub fn child(&self, id: NodeId, name: &str) -> Result<Option<NodeId>> {
        Ok(match self.get(id)? {
            VariableValue::Structure(children) => children.get(name).copied(),
            _ => None,
        })
    }

    /// True when a structure has a child called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the node was released.
    pub fn has_child(&self, id: NodeId, name: &str) -> Result<bool> {
        Ok(self.child(id, name)?.is_some())
    }

    /// Copy `source` into the array children of `parent` at `index` (clamped
    /// to the end). A non-array parent becomes an empty array first.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if either node was released.
    pub fn insert_at_index(&mut self, parent: NodeId, source: NodeId, index: usize) -> Result<NodeId> {
        self.get(parent)?;
        let copy = self.deep_clone(source)?;
        if !matches!(self.get(parent)?, VariableValue::Array(_)) {
            self.replace(parent, VariableValue::Array(Vec::new()))?;
        }
        if let VariableValue::Array(children) = self.get_mut(parent)? {
            let at = index.min(children.len());
            children.insert(at, copy);
        }
        Ok(copy)
    }

    /// Copy `source` into the structure children of `parent` under `name`.
    /// A non-structure parent becomes an empty structure first; an existing
    /// child with that name is replaced and released.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if either node was released.
    pub fn insert_child(&mut self, parent: NodeId, name: &str, source: NodeId) -> Result<NodeId> {
        self.get(parent)?;
        let copy = self.deep_clone(source)?;
        if !matches!(self.get(parent)?, VariableValue::Structure(_)) {
            self.replace(parent, VariableValue::Structure(BTreeMap::new()))?;
        }
        let previous = match self.get_mut(parent)? {
            VariableValue::Structure(children) => children.insert(name.to_owned(), copy),
            _ => None,
        };
        if let Some(previous) = previous {
            self.release(previous)?;
        }
        Ok(copy)
    }

    /// Remove and release a structure child. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::StaleNode`] if the node was released.
    pub fn remove_child(&mut self, parent: NodeId, name: &str) -> Result<bool> {
        let removed = match self.get_mut(parent)? {
            VariableValue::Structure(children) => children.remove(name),
            _ => None,
        };
        match removed {
            Some(child) => {
                self.release(child)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove and release an array child.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::NotACollection`] for non-arrays and
    /// [`VariableError::IndexOutOfRange`] past the end.
    pub fn remove_at_index(&mut self, parent: NodeId, index: usize) -> Result<()> {
        let VariableValue::Array(children) = self.get_mut(parent)? else {
            return Err(VariableError::NotACollection(parent));
        };
        if index >= children.len() {
            return Err(VariableError::IndexOutOfRange { index, len: children.len() });
        }
        let child = children.remove(index);
        self.release(child)
    }
}
