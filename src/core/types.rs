//! Action types: the intermediate representation between study and apply.
//!
//! A recipe is studied into a flat list of [`Action`]s. Each action is one
//! planned write into the result document. All types derive Serialize so the
//! `study` command can print a plan.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Operations
// ============================================================================

/// Which executor routine runs an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Copy (optionally formatted or replaced) material values to the context.
    Swap,
    /// Join several material values into one string.
    Concat,
    /// Build a list of objects from material arrays via sub-rules.
    SwapMap,
}

impl Operation {
    /// Recipe name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swap => "swap",
            Self::Concat => "concat",
            Self::SwapMap => "swapmap",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swap" => Ok(Self::Swap),
            "concat" => Ok(Self::Concat),
            "swapmap" => Ok(Self::SwapMap),
            other => Err(format!("unknown operation '{}'", other)),
        }
    }
}

// ============================================================================
// Control keys
// ============================================================================

/// A recipe key that configures an action instead of naming a sub-block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    Operation,
    Map,
    Values,
    Replaces,
    Separator,
    Format,
}

/// Recognized control key names and the field each one routes to.
const CONTROL_KEYS: &[(&str, ControlKey)] = &[
    ("operation", ControlKey::Operation),
    ("*", ControlKey::Map),
    ("map", ControlKey::Map),
    ("values", ControlKey::Values),
    ("value", ControlKey::Values),
    ("replace", ControlKey::Replaces),
    ("replaces", ControlKey::Replaces),
    ("separator", ControlKey::Separator),
    ("format", ControlKey::Format),
];

impl ControlKey {
    /// Look up a recipe key. Returns None for nested (non-control) keys.
    pub fn lookup(name: &str) -> Option<Self> {
        CONTROL_KEYS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, control)| *control)
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operation => write!(f, "operation"),
            Self::Map => write!(f, "map"),
            Self::Values => write!(f, "values"),
            Self::Replaces => write!(f, "replaces"),
            Self::Separator => write!(f, "separator"),
            Self::Format => write!(f, "format"),
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

/// A single planned write into the result document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    /// Dotted path in the result document
    pub context: String,

    /// Executor routine
    pub operation: Operation,

    /// Material paths (or literals) to read, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,

    /// Literal overrides, parallel-indexed to `values`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replaces: Vec<Value>,

    /// Single-placeholder template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Joining string for concat (empty = none)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub separator: String,

    /// Sub-rule objects for swapmap
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub map: Vec<Value>,
}

impl Action {
    /// The shorthand form: copy material `path` into the result under `context`.
    pub fn shorthand(context: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            operation: Operation::Swap,
            values: Vec::new(),
            replaces: vec![Value::String(path.into())],
            format: None,
            separator: String::new(),
            map: Vec::new(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.operation, self.context)?;
        if !self.values.is_empty() {
            write!(f, " ({} values)", self.values.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_roundtrip_names() {
        for op in [Operation::Swap, Operation::Concat, Operation::SwapMap] {
            assert_eq!(op.to_string().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_operation_unknown() {
        let err = "merge".parse::<Operation>().unwrap_err();
        assert!(err.contains("merge"));
    }

    #[test]
    fn test_operation_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Operation::SwapMap).unwrap(), json!("swapmap"));
        assert_eq!(serde_json::to_value(Operation::Concat).unwrap(), json!("concat"));
    }

    #[test]
    fn test_control_key_aliases() {
        assert_eq!(ControlKey::lookup("*"), Some(ControlKey::Map));
        assert_eq!(ControlKey::lookup("map"), Some(ControlKey::Map));
        assert_eq!(ControlKey::lookup("value"), Some(ControlKey::Values));
        assert_eq!(ControlKey::lookup("values"), Some(ControlKey::Values));
        assert_eq!(ControlKey::lookup("replace"), Some(ControlKey::Replaces));
        assert_eq!(ControlKey::lookup("replaces"), Some(ControlKey::Replaces));
        assert_eq!(ControlKey::lookup("separator"), Some(ControlKey::Separator));
        assert_eq!(ControlKey::lookup("format"), Some(ControlKey::Format));
        assert_eq!(ControlKey::lookup("operation"), Some(ControlKey::Operation));
    }

    #[test]
    fn test_control_key_rejects_nested_names() {
        assert_eq!(ControlKey::lookup("all"), None);
        assert_eq!(ControlKey::lookup("context"), None);
        assert_eq!(ControlKey::lookup("Operation"), None);
        assert_eq!(ControlKey::lookup(""), None);
    }

    #[test]
    fn test_shorthand_action() {
        let action = Action::shorthand("fullName", "name");
        assert_eq!(action.operation, Operation::Swap);
        assert!(action.values.is_empty());
        assert_eq!(action.replaces, vec![json!("name")]);
        assert_eq!(action.to_string(), "swap -> fullName");
    }

    #[test]
    fn test_action_serialize_skips_empty() {
        let action = Action::shorthand("a", "b");
        let v = serde_json::to_value(&action).unwrap();
        assert_eq!(v, json!({"context": "a", "operation": "swap", "replaces": ["b"]}));
    }
}
