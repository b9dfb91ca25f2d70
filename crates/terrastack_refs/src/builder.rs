//! Builds the reference graph from raw stack and member data.
//!
//! Raw values are JSON values. Strings starting with `ref:` become
//! references, other strings and lists become literals, `null` becomes an
//! absent entry. Numbers, booleans and objects are not representable as a
//! ref value; they are skipped and reported as construction warnings.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use terrastack_config::{MemberConfig, OutputValue, StackDefinition, StackFixture};

use crate::error::{RefError, RefResult};
use crate::model::{ConfigRefs, Direction, Ref, StackRef, REFERENCE_PREFIX};

/// Classification of a raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// `null`: declared but without a value.
    Absent,
    /// A `ref:` string, kept verbatim.
    Reference(String),
    /// A plain string, or a stringified list.
    Literal(String),
    /// A value of a kind refs cannot hold.
    Unsupported(&'static str),
}

impl ValueKind {
    pub fn is_reference(&self) -> bool {
        matches!(self, ValueKind::Reference(_))
    }

    /// Turn the classification into a ref. Unsupported values yield `None`.
    pub fn into_ref(self, name: impl Into<String>) -> Option<Ref> {
        match self {
            ValueKind::Absent => Some(Ref::absent(name)),
            ValueKind::Reference(raw) => Some(Ref::reference(name, raw)),
            ValueKind::Literal(value) => Some(Ref::literal(name, value)),
            ValueKind::Unsupported(_) => None,
        }
    }
}

/// Classify a raw value.
pub fn classify(value: &Value) -> ValueKind {
    match value {
        Value::Null => ValueKind::Absent,
        Value::String(s) if s.starts_with(REFERENCE_PREFIX) => ValueKind::Reference(s.clone()),
        Value::String(s) => ValueKind::Literal(s.clone()),
        Value::Array(items) => ValueKind::Literal(stringify_list(items)),
        Value::Number(_) => ValueKind::Unsupported("number"),
        Value::Bool(_) => ValueKind::Unsupported("bool"),
        Value::Object(_) => ValueKind::Unsupported("object"),
    }
}

/// Render a list as `["a","b"]`. Nested lists are rendered the same way
/// without surrounding quotes; `[]` for an empty list.
pub fn stringify_list(items: &[Value]) -> String {
    let parts: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::Array(nested) => stringify_list(nested),
            Value::String(s) => format!("\"{}\"", s),
            other => format!("\"{}\"", other),
        })
        .collect();
    format!("[{}]", parts.join(","))
}

/// Refs built from raw values, plus the entries that had to be skipped.
#[derive(Debug, Default)]
pub struct BuiltRefs {
    pub refs: Vec<Ref>,
    pub warnings: Vec<String>,
}

impl BuiltRefs {
    fn push(&mut self, direction: Direction, name: &str, value: &Value) {
        match classify(value) {
            ValueKind::Unsupported(kind) => {
                let message = format!(
                    "{} '{}' has an unsupported {} value and was skipped",
                    direction, name, kind
                );
                warn!("{}", message);
                self.warnings.push(message);
            }
            kind => {
                if let Some(r) = kind.into_ref(name) {
                    self.refs.push(r);
                }
            }
        }
    }

    fn all_resolved(&self) -> bool {
        self.refs.iter().all(|r| r.resolved)
    }
}

/// Build input refs from a name to value map.
///
/// The order of the returned refs is unspecified.
pub fn build_input_refs(inputs: &HashMap<String, Value>) -> BuiltRefs {
    let mut built = BuiltRefs::default();
    for (name, value) in inputs {
        built.push(Direction::Input, name, value);
    }
    built
}

/// Build output refs, keeping declaration order.
pub fn build_output_refs(outputs: &[OutputValue]) -> BuiltRefs {
    let mut built = BuiltRefs::default();
    for output in outputs {
        built.push(Direction::Output, &output.name, &output.value);
    }
    built
}

/// Build the refs of one member configuration.
///
/// `resolved` is set when the member has no reference at all to follow.
pub fn build_config_refs(member: &MemberConfig) -> ConfigRefs {
    build_member(member).0
}

fn build_member(member: &MemberConfig) -> (ConfigRefs, Vec<String>) {
    let inputs = build_input_refs(&member.inputs);
    let outputs = build_output_refs(&member.outputs);

    let warnings = inputs
        .warnings
        .iter()
        .chain(&outputs.warnings)
        .map(|w| format!("member '{}': {}", member.name, w))
        .collect();

    let config = ConfigRefs {
        name: member.name.clone(),
        id: member.id.clone(),
        resolved: inputs.all_resolved() && outputs.all_resolved(),
        inputs: inputs.refs,
        outputs: outputs.refs,
    };
    (config, warnings)
}

/// Build the reference graph of a stack and its members.
///
/// Fails when the definition lacks a name, an id or a configuration
/// reference. Stack inputs take the declared defaults.
pub fn build_stack_ref(definition: &StackDefinition, members: &[MemberConfig]) -> RefResult<StackRef> {
    let name = required(&definition.name, "name")?;
    let id = required(&definition.id, "id")?;
    let configuration_ref = required(&definition.configuration_ref, "configuration_ref")?;

    debug!(
        "Building reference graph for stack '{}' ({}) with {} members",
        name,
        configuration_ref,
        members.len()
    );

    let inputs = build_input_refs(&definition.input_defaults());
    let outputs = build_output_refs(&definition.outputs);

    let mut warnings: Vec<String> = inputs
        .warnings
        .iter()
        .chain(&outputs.warnings)
        .map(|w| format!("stack '{}': {}", name, w))
        .collect();

    let mut configs = Vec::with_capacity(members.len());
    for member in members {
        let (config, member_warnings) = build_member(member);
        warnings.extend(member_warnings);
        configs.push(config);
    }

    let mut stack = StackRef {
        name: name.to_string(),
        id: id.to_string(),
        inputs: inputs.refs,
        outputs: outputs.refs,
        members: configs,
        resolved: false,
        warnings,
    };

    // Absent entries count against the flag but are not pending references.
    let pending = stack.unresolved_refs().len();
    stack.refresh_resolved();
    debug!(
        "Stack '{}' built with {} refs, {} references pending",
        stack.name,
        stack.all_refs().len(),
        pending
    );

    Ok(stack)
}

fn required<'a>(value: &'a Option<String>, field: &str) -> RefResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RefError::MissingField(field.to_string()))
}

impl StackRef {
    /// Build the graph of a loaded fixture.
    pub fn from_fixture(fixture: &StackFixture) -> RefResult<Self> {
        build_stack_ref(&fixture.definition, &fixture.members)
    }

    /// Load a fixture file and build its graph.
    pub fn from_file(path: impl AsRef<Path>) -> RefResult<Self> {
        let fixture = StackFixture::from_file(path)?;
        Self::from_fixture(&fixture)
    }
}
