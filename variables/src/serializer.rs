//! JSON variable format.
//!
//! Variables are exchanged (clipboard, project files) as objects of the form
//! `{"type": "...", "value": ..., "children": [...]}`. Structure children
//! carry their `"name"` inline; array children are positional. Objects
//! written by older editors may omit `"type"`: those with `"children"` are
//! structures, everything else is a string.

#[cfg(test)]
#[path = "serializer_test.rs"]
mod serializer_test;

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use crate::arena::{NodeId, VariableArena};
use crate::error::{Result, VariableError};
use crate::variable::{VariableType, VariableValue, format_number};

/// Fill `target` in place from a serialized variable. On error `target` is
/// left untouched and nothing is leaked into the arena.
///
/// # Errors
///
/// Returns [`VariableError::Malformed`] when the input does not follow the
/// format, or [`VariableError::StaleNode`] if `target` was released.
pub fn unserialize_from_value(arena: &mut VariableArena, target: NodeId, serialized: &Value) -> Result<()> {
    arena.get(target)?;
    let value = build_value(arena, serialized)?;
    arena.replace(target, value)
}

/// Allocate a new node from a serialized variable.
///
/// # Errors
///
/// Returns [`VariableError::Malformed`] when the input does not follow the format.
pub fn alloc_from_value(arena: &mut VariableArena, serialized: &Value) -> Result<NodeId> {
    let value = build_value(arena, serialized)?;
    Ok(arena.alloc(value))
}

fn build_value(arena: &mut VariableArena, serialized: &Value) -> Result<VariableValue> {
    let object = serialized
        .as_object()
        .ok_or_else(|| VariableError::malformed("variable must be a JSON object"))?;

    let kind = match object.get("type") {
        Some(Value::String(raw)) => VariableType::parse(raw)
            .ok_or_else(|| VariableError::malformed(format!("unknown variable type `{raw}`")))?,
        Some(other) => return Err(VariableError::malformed(format!("type must be a string, got {other}"))),
        None if object.contains_key("children") => VariableType::Structure,
        None => VariableType::String,
    };

    match kind {
        VariableType::String => Ok(VariableValue::String(read_string(object.get("value"))?)),
        VariableType::Number => Ok(VariableValue::Number(read_number(object.get("value"))?)),
        VariableType::Boolean => Ok(VariableValue::Boolean(read_bool(object.get("value"))?)),
        VariableType::Structure => build_structure(arena, object),
        VariableType::Array => build_array(arena, object),
    }
}

fn read_string(raw: Option<&Value>) -> Result<String> {
    match raw {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(Value::Bool(flag)) => Ok(flag.to_string()),
        Some(other) => Err(VariableError::malformed(format!("string value expected, got {other}"))),
    }
}

fn read_number(raw: Option<&Value>) -> Result<f64> {
    match raw {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| VariableError::malformed(format!("number out of range: {number}"))),
        Some(Value::String(text)) => text
            .trim()
            .parse()
            .map_err(|_| VariableError::malformed(format!("number value expected, got `{text}`"))),
        Some(other) => Err(VariableError::malformed(format!("number value expected, got {other}"))),
    }
}

fn read_bool(raw: Option<&Value>) -> Result<bool> {
    match raw {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(Value::String(text)) if text == "true" => Ok(true),
        Some(Value::String(text)) if text == "false" => Ok(false),
        Some(other) => Err(VariableError::malformed(format!("boolean value expected, got {other}"))),
    }
}

fn children_of(object: &Map<String, Value>) -> Result<&[Value]> {
    match object.get("children") {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(children)) => Ok(children),
        Some(other) => Err(VariableError::malformed(format!("children must be an array, got {other}"))),
    }
}

fn build_structure(arena: &mut VariableArena, object: &Map<String, Value>) -> Result<VariableValue> {
    let mut built = BTreeMap::new();
    if let Err(err) = fill_structure(arena, object, &mut built) {
        release_all(arena, built.into_values());
        return Err(err);
    }
    Ok(VariableValue::Structure(built))
}

fn fill_structure(
    arena: &mut VariableArena,
    object: &Map<String, Value>,
    built: &mut BTreeMap<String, NodeId>,
) -> Result<()> {
    for child in children_of(object)? {
        let name = child
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| VariableError::malformed("structure child without a name"))?;
        let id = alloc_from_value(arena, child)?;
        if let Some(duplicate) = built.insert(name.to_owned(), id) {
            arena.release(duplicate)?;
        }
    }
    Ok(())
}

fn build_array(arena: &mut VariableArena, object: &Map<String, Value>) -> Result<VariableValue> {
    let mut built = Vec::new();
    if let Err(err) = fill_array(arena, object, &mut built) {
        release_all(arena, built);
        return Err(err);
    }
    Ok(VariableValue::Array(built))
}

fn fill_array(arena: &mut VariableArena, object: &Map<String, Value>, built: &mut Vec<NodeId>) -> Result<()> {
    for child in children_of(object)? {
        built.push(alloc_from_value(arena, child)?);
    }
    Ok(())
}

fn release_all(arena: &mut VariableArena, ids: impl IntoIterator<Item = NodeId>) {
    for id in ids {
        if let Err(err) = arena.release(id) {
            tracing::warn!(error = %err, "partial variable already released");
        }
    }
}

/// Serialize the subtree at `id` into the JSON variable format.
///
/// # Errors
///
/// Returns [`VariableError::StaleNode`] if any node of the subtree was released.
pub fn serialize_to_value(arena: &VariableArena, id: NodeId) -> Result<Value> {
    Ok(match arena.get(id)? {
        VariableValue::String(text) => json!({ "type": "string", "value": text }),
        VariableValue::Number(number) => match serde_json::Number::from_f64(*number) {
            Some(number) => json!({ "type": "number", "value": number }),
            None => json!({ "type": "number", "value": format_number(*number) }),
        },
        VariableValue::Boolean(flag) => json!({ "type": "boolean", "value": flag }),
        VariableValue::Structure(children) => {
            let mut serialized = Vec::with_capacity(children.len());
            for (name, child) in children {
                let mut entry = serialize_to_value(arena, *child)?;
                if let Value::Object(fields) = &mut entry {
                    fields.insert("name".to_owned(), Value::String(name.clone()));
                }
                serialized.push(entry);
            }
            json!({ "type": "structure", "children": serialized })
        }
        VariableValue::Array(children) => {
            let mut serialized = Vec::with_capacity(children.len());
            for child in children {
                serialized.push(serialize_to_value(arena, *child)?);
            }
            json!({ "type": "array", "children": serialized })
        }
    })
}
