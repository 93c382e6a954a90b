//! Folding payload descriptions into [`DescriptionDictionary`] values.
//!
//! Webhook payloads arrive as parameter records; custom events as plain
//! JSON. Both end up in the same dictionary shape. In both paths the first
//! entry added under a name is kept and later same-named entries are
//! ignored.

use serde_json::Value;
use wh_core::{DescriptionDictionary, DescriptionValue, Param};

/// Add `param` to `target`.
///
/// A composite parameter becomes a nested dictionary built from its children
/// in stored order; any other parameter becomes a leaf. The parameter's
/// description is attached either way, with an empty string stored as `None`.
pub fn merge_param(target: &mut DescriptionDictionary, param: &Param) {
    if target.get(&param.name).is_some() {
        return;
    }

    let value = if param.is_composite() {
        let mut nested = DescriptionDictionary::new();
        for child in param.child_params() {
            merge_param(&mut nested, child);
        }
        DescriptionValue::Nested(nested)
    } else {
        DescriptionValue::Leaf
    };

    let description = (!param.description.is_empty()).then(|| param.description.clone());
    target.add(param.name.clone(), value, description);
}

/// Add the visible structure of a plain JSON value to `target`.
///
/// Object members and array elements (keyed `"0"`, `"1"`, ...) become
/// entries: scalars and empty objects are leaves, non-empty objects and all
/// arrays are nested. A scalar root adds nothing. No descriptions are
/// available on this path.
pub fn merge_object(target: &mut DescriptionDictionary, value: &Value) {
    match value {
        Value::Object(members) => {
            for (key, member) in members {
                merge_entry(target, key, member);
            }
        }
        Value::Array(elements) => {
            for (position, element) in elements.iter().enumerate() {
                merge_entry(target, &position.to_string(), element);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

/// Build a fresh dictionary from a plain JSON value.
#[must_use]
pub fn object_dictionary(value: &Value) -> DescriptionDictionary {
    let mut dictionary = DescriptionDictionary::new();
    merge_object(&mut dictionary, value);
    dictionary
}

fn merge_entry(target: &mut DescriptionDictionary, key: &str, value: &Value) {
    if target.get(key).is_some() {
        return;
    }

    let shape = match value {
        // An empty object accepts any value.
        Value::Object(members) if members.is_empty() => DescriptionValue::Leaf,
        Value::Object(_) | Value::Array(_) => DescriptionValue::Nested(object_dictionary(value)),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            DescriptionValue::Leaf
        }
    };
    target.add(key, shape, None);
}
