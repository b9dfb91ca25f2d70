//! Data models for stack definitions and their member configurations.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input variable declared by a stack definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StackInput {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Default value; may be a literal, a list or a `ref:` path.
    #[serde(default)]
    pub default: Value,
}

impl StackInput {
    pub fn new(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            var_type: None,
            description: None,
            required: false,
            default: default.into(),
        }
    }

    pub fn with_type(mut self, var_type: impl Into<String>) -> Self {
        self.var_type = Some(var_type.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A named output value, as declared by a stack or reported by a member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputValue {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

impl OutputValue {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Top-level stack definition.
///
/// `name`, `id` and `configuration_ref` are optional at the serde level so a
/// partially written fixture still loads; graph construction rejects a
/// definition missing any of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StackDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Configuration the stack is deployed from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_ref: Option<String>,
    #[serde(default)]
    pub inputs: Vec<StackInput>,
    #[serde(default)]
    pub outputs: Vec<OutputValue>,
}

impl StackDefinition {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        configuration_ref: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            id: Some(id.into()),
            configuration_ref: Some(configuration_ref.into()),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Add an input declaration.
    pub fn with_input(mut self, input: StackInput) -> Self {
        self.inputs.push(input);
        self
    }

    /// Add an output declaration.
    pub fn with_output(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.outputs.push(OutputValue::new(name, value));
        self
    }

    /// Input defaults keyed by name. Later declarations win on duplicates.
    pub fn input_defaults(&self) -> HashMap<String, Value> {
        self.inputs
            .iter()
            .map(|input| (input.name.clone(), input.default.clone()))
            .collect()
    }
}

/// One member configuration of a stack.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MemberConfig {
    pub id: String,
    pub name: String,
    /// Input values keyed by name. Iteration order is unspecified.
    #[serde(default)]
    pub inputs: HashMap<String, Value>,
    #[serde(default)]
    pub outputs: Vec<OutputValue>,
}

impl MemberConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            inputs: HashMap::new(),
            outputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.outputs.push(OutputValue::new(name, value));
        self
    }
}

/// A stack definition together with its members, as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StackFixture {
    pub definition: StackDefinition,
    #[serde(default)]
    pub members: Vec<MemberConfig>,
}

impl StackFixture {
    pub fn new(definition: StackDefinition) -> Self {
        Self {
            definition,
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: MemberConfig) -> Self {
        self.members.push(member);
        self
    }

    /// Find a member by name.
    pub fn member(&self, name: &str) -> Option<&MemberConfig> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// On-disk fixture formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFormat {
    Json,
    Yaml,
}

impl FixtureFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(FixtureFormat::Json),
            "yaml" | "yml" => Some(FixtureFormat::Yaml),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FixtureFormat::Json => "json",
            FixtureFormat::Yaml => "yaml",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_defaults() {
        let definition = StackDefinition::new("stack", "stack-id", "config-ref")
            .with_input(StackInput::new("region", "us-south"))
            .with_input(StackInput::new("prefix", json!(null)));

        let defaults = definition.input_defaults();
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults["region"], json!("us-south"));
        assert_eq!(defaults["prefix"], Value::Null);
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FixtureFormat::from_path(Path::new("stack.json")), Some(FixtureFormat::Json));
        assert_eq!(FixtureFormat::from_path(Path::new("stack.YML")), Some(FixtureFormat::Yaml));
        assert_eq!(FixtureFormat::from_path(Path::new("stack.toml")), None);
        assert_eq!(FixtureFormat::from_path(Path::new("stack")), None);
    }

    #[test]
    fn test_stack_input_deserialize_type_field() {
        let input: StackInput = serde_json::from_value(json!({
            "name": "zones",
            "type": "list(string)",
            "default": ["a", "b"]
        }))
        .unwrap();

        assert_eq!(input.var_type.as_deref(), Some("list(string)"));
        assert!(!input.required);
        assert_eq!(input.default, json!(["a", "b"]));
    }
}
