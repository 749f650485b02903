//! Recipe study: turn a recipe document into an ordered list of actions.
//!
//! The recipe holds a top-level `"recipe"` object. Each entry is studied by
//! the kind of its value:
//! - string: shorthand swap, copy material `value` to result `key`
//! - object: control keys build one action for `key`; every other key names a
//!   sub-block that builds its own action for `key.sub`
//! - anything else: ignored
//!
//! Study only reads the recipe. Material is touched by the executor alone.

use super::error::StudyError;
use super::tree::kind_name;
use super::types::{Action, ControlKey, Operation};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Reserved top-level key holding the recipe entries.
pub const RECIPE_KEY: &str = "recipe";

/// Study a recipe document into actions, in recipe document order.
pub fn study(recipe: &Value) -> Result<Vec<Action>, StudyError> {
    let entries = match recipe.get(RECIPE_KEY) {
        Some(Value::Object(entries)) => entries,
        _ => return Err(StudyError::RecipeStructure),
    };

    let mut actions = Vec::new();
    for (key, entry) in entries {
        match entry {
            Value::String(path) => actions.push(Action::shorthand(key, path)),
            Value::Object(block) => actions.extend(study_block(key, block)?),
            Value::Number(_) => debug!(key = %key, "numeric recipe entry, no action"),
            other => warn!(key = %key, kind = kind_name(other), "recipe entry ignored"),
        }
    }

    for action in &actions {
        debug!(context = %action.context, operation = %action.operation, "studied action");
    }
    Ok(actions)
}

/// Study an object entry. Nested sub-block actions come first, then the
/// action built from the entry's own control keys.
fn study_block(key: &str, block: &Map<String, Value>) -> Result<Vec<Action>, StudyError> {
    let mut actions = Vec::new();
    let mut control = ActionBuilder::new(key);

    for (name, value) in block {
        match ControlKey::lookup(name) {
            Some(field) => control.set_outer(field, value)?,
            None => {
                if let Some(action) = study_sub_block(key, name, value)? {
                    actions.push(action);
                }
            }
        }
    }

    if let Some(action) = control.finish() {
        actions.push(action);
    }
    Ok(actions)
}

/// Study `recipe.outer.inner`. List-valued fields contribute every element.
fn study_sub_block(outer: &str, inner: &str, value: &Value) -> Result<Option<Action>, StudyError> {
    let Value::Object(block) = value else {
        debug!(outer = %outer, inner = %inner, "non-object sub-block, no action");
        return Ok(None);
    };

    let mut builder = ActionBuilder::new(format!("{}.{}", outer, inner));
    for (name, field_value) in block {
        let Some(field) = ControlKey::lookup(name) else {
            continue;
        };
        match field_value {
            Value::Array(items) => {
                for item in items {
                    builder.set(field, item)?;
                }
            }
            other => builder.set(field, other)?,
        }
    }

    Ok(builder.finish())
}

/// Accumulates control fields for one context until it is finished.
#[derive(Debug)]
struct ActionBuilder {
    context: String,
    operation: Option<Operation>,
    values: Vec<Value>,
    replaces: Vec<Value>,
    format: Option<String>,
    separator: String,
    map: Vec<Value>,
}

impl ActionBuilder {
    fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            operation: None,
            values: Vec::new(),
            replaces: Vec::new(),
            format: None,
            separator: String::new(),
            map: Vec::new(),
        }
    }

    /// Set a field from an entry's own control key. A list under
    /// `values`/`value` contributes only its first element.
    fn set_outer(&mut self, field: ControlKey, value: &Value) -> Result<(), StudyError> {
        match (field, value) {
            (ControlKey::Values, Value::Array(items)) => {
                if let Some(first) = items.first() {
                    self.values.push(first.clone());
                }
                Ok(())
            }
            _ => self.set(field, value),
        }
    }

    fn set(&mut self, field: ControlKey, value: &Value) -> Result<(), StudyError> {
        match field {
            ControlKey::Operation => {
                let name = self.expect_str(field, value)?;
                match name.parse::<Operation>() {
                    Ok(operation) => self.operation = Some(operation),
                    Err(_) => {
                        warn!(context = %self.context, operation = %name, "unknown operation, no action");
                        self.operation = None;
                    }
                }
            }
            ControlKey::Format => {
                self.format = Some(self.expect_str(field, value)?.to_string());
            }
            ControlKey::Separator => {
                self.separator = self.expect_str(field, value)?.to_string();
            }
            ControlKey::Values => self.values.push(value.clone()),
            ControlKey::Replaces => self.replaces.push(value.clone()),
            ControlKey::Map => self.map.push(value.clone()),
        }
        Ok(())
    }

    fn expect_str<'v>(&self, field: ControlKey, value: &'v Value) -> Result<&'v str, StudyError> {
        value.as_str().ok_or_else(|| StudyError::InvalidControl {
            context: self.context.clone(),
            key: field.to_string(),
            found: kind_name(value),
        })
    }

    /// Finalize into an action. Without an operation there is nothing to run.
    fn finish(self) -> Option<Action> {
        let Some(operation) = self.operation else {
            if !self.values.is_empty() || !self.replaces.is_empty() || !self.map.is_empty() {
                warn!(context = %self.context, "control fields without an operation, no action");
            }
            return None;
        };
        Some(Action {
            context: self.context,
            operation,
            values: self.values,
            replaces: self.replaces,
            format: self.format,
            separator: self.separator,
            map: self.map,
        })
    }
}
