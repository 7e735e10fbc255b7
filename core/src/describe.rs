//! Serializable description of a schema.
//!
//! [`Schema::describe`](crate::Schema::describe) flattens a schema into plain
//! data that help rendering consumes and that tooling (shell completion
//! generators, documentation builds) can read as JSON.

use serde::{Deserialize, Serialize};

use crate::convert::ValueKind;

/// Description of a named option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Primary name (e.g. "-v")
    pub name: String,
    /// Alternate name (e.g. "--verbose")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value_kind: ValueKind,
    /// Whether a value token (or `=value`) must follow the name
    pub takes_value: bool,
    /// Whether the field is an `Option<_>`
    pub optional: bool,
}

/// Description of a positional argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgDescriptor {
    pub name: String,
    /// 0-based position among positional arguments
    pub position: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value_kind: ValueKind,
    pub required: bool,
}

/// Description of the variadic collector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarArgsDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Flattened view of a whole schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub options: Vec<OptionDescriptor>,
    pub arguments: Vec<ArgDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var_args: Option<VarArgsDescriptor>,
}

impl SchemaDescriptor {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a descriptor previously produced by [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if the input is not a
    /// valid descriptor.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Whether any positional argument must be supplied.
    pub fn has_required_arguments(&self) -> bool {
        self.arguments.iter().any(|arg| arg.required)
    }
}
