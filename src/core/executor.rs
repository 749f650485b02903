//! Executor: run studied actions against the material document.
//!
//! Actions run strictly in the order study produced them. The material is
//! only read; the result is only written. A shape mismatch between recipe and
//! material aborts the run with [`ApplyError`].

use super::error::ApplyError;
use super::template;
use super::tree::{get_path, kind_name, set_path, stringify};
use super::types::{Action, Operation};
use serde_json::{Map, Value};
use tracing::debug;

/// Sub-rule key holding a literal for swapmap.
pub const SUB_RULE_REPLACE: &str = "replace";
/// Sub-rule key naming an element field for swapmap.
pub const SUB_RULE_VALUE: &str = "value";

/// Execute every action, writing into `result`.
pub fn apply(actions: &[Action], material: &Value, result: &mut Value) -> Result<(), ApplyError> {
    for action in actions {
        debug!(context = %action.context, operation = %action.operation, "applying action");
        match action.operation {
            Operation::Swap => swap(action, material, result)?,
            Operation::Concat => concat(action, material, result)?,
            Operation::SwapMap => swap_map(action, material, result)?,
        }
    }
    Ok(())
}

/// Format template of an action; an empty template counts as none.
fn format_of(action: &Action) -> Option<&str> {
    action.format.as_deref().filter(|f| !f.is_empty())
}

/// A recipe value used as a material path must be a string.
fn source_path<'v>(
    operation: Operation,
    action: &Action,
    value: &'v Value,
) -> Result<&'v str, ApplyError> {
    value.as_str().ok_or_else(|| {
        ApplyError::type_mismatch(
            operation.as_str(),
            &action.context,
            value.to_string(),
            "string path",
            kind_name(value),
        )
    })
}

fn swap(action: &Action, material: &Value, result: &mut Value) -> Result<(), ApplyError> {
    if action.values.is_empty() {
        return swap_single(action, material, result);
    }
    swap_multiple(action, material, result)
}

/// Bare swap: the material path lives in `replaces[0]`.
fn swap_single(action: &Action, material: &Value, result: &mut Value) -> Result<(), ApplyError> {
    let source = action
        .replaces
        .first()
        .ok_or_else(|| ApplyError::MissingSource {
            context: action.context.clone(),
        })?;
    let path = source_path(Operation::Swap, action, source)?;
    let gathered = get_path(material, path);

    let written = match format_of(action) {
        Some(format) => Value::String(template::render(format, &gathered)),
        None => gathered,
    };
    set_path(result, &action.context, written);
    Ok(())
}

/// Every value writes the same context, so the last one wins.
fn swap_multiple(action: &Action, material: &Value, result: &mut Value) -> Result<(), ApplyError> {
    let format = format_of(action);
    let has_replaces = !action.replaces.is_empty();

    for (index, value) in action.values.iter().enumerate() {
        let path = source_path(Operation::Swap, action, value)?;
        let gathered = get_path(material, path);

        let written = match (format, has_replaces) {
            (Some(format), true) => {
                Value::String(template::render(format, replace_at(action, index)?))
            }
            (Some(format), false) => Value::String(template::render(format, &gathered)),
            (None, true) => replace_at(action, index)?.clone(),
            (None, false) => gathered,
        };
        set_path(result, &action.context, written);
    }
    Ok(())
}

fn replace_at(action: &Action, index: usize) -> Result<&Value, ApplyError> {
    action
        .replaces
        .get(index)
        .ok_or_else(|| ApplyError::ReplaceIndex {
            context: action.context.clone(),
            index,
            len: action.replaces.len(),
        })
}

fn concat(action: &Action, material: &Value, result: &mut Value) -> Result<(), ApplyError> {
    let mut joined = String::new();
    for (index, value) in action.values.iter().enumerate() {
        let path = source_path(Operation::Concat, action, value)?;
        joined.push_str(&stringify(&get_path(material, path)));
        if index + 1 < action.values.len() {
            joined.push_str(&action.separator);
        }
    }
    set_path(result, &action.context, Value::String(joined));
    Ok(())
}

/// Build one object per element of every material array named in `values`.
fn swap_map(action: &Action, material: &Value, result: &mut Value) -> Result<(), ApplyError> {
    let mut objects = Vec::new();

    for value in &action.values {
        let path = source_path(Operation::SwapMap, action, value)?;
        let gathered = get_path(material, path);
        let Value::Array(elements) = &gathered else {
            return Err(ApplyError::type_mismatch(
                Operation::SwapMap.as_str(),
                &action.context,
                path,
                "array",
                kind_name(&gathered),
            ));
        };
        for element in elements {
            objects.push(build_object(action, path, element)?);
        }
    }

    set_path(result, &action.context, Value::Array(objects));
    Ok(())
}

/// Apply every sub-rule to one element. A non-null `replace` wins over `value`.
fn build_object(action: &Action, path: &str, element: &Value) -> Result<Value, ApplyError> {
    let mut object = Map::new();

    for rule in &action.map {
        let Value::Object(fields) = rule else {
            return Err(ApplyError::type_mismatch(
                Operation::SwapMap.as_str(),
                &action.context,
                "map",
                "object",
                kind_name(rule),
            ));
        };

        for (target, sub_rule) in fields {
            let Value::Object(sub_rule) = sub_rule else {
                return Err(ApplyError::type_mismatch(
                    Operation::SwapMap.as_str(),
                    &action.context,
                    format!("map.{}", target),
                    "object",
                    kind_name(sub_rule),
                ));
            };

            if let Some(literal) = sub_rule.get(SUB_RULE_REPLACE).filter(|v| !v.is_null()) {
                object.insert(target.clone(), literal.clone());
                continue;
            }

            let Some(field) = sub_rule.get(SUB_RULE_VALUE).filter(|v| !v.is_null()) else {
                continue;
            };
            let field = field.as_str().ok_or_else(|| {
                ApplyError::type_mismatch(
                    Operation::SwapMap.as_str(),
                    &action.context,
                    format!("map.{}.value", target),
                    "string",
                    kind_name(field),
                )
            })?;
            if !element.is_object() {
                return Err(ApplyError::type_mismatch(
                    Operation::SwapMap.as_str(),
                    &action.context,
                    path,
                    "array of objects",
                    kind_name(element),
                ));
            }
            let found = element.get(field).cloned().unwrap_or(Value::Null);
            object.insert(target.clone(), found);
        }
    }

    Ok(Value::Object(object))
}
