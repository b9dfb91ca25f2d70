//! Structural validation of stack fixtures.

use std::collections::HashSet;

use serde_json::Value;

use crate::models::{MemberConfig, OutputValue, StackDefinition, StackFixture};

const REFERENCE_PREFIX: &str = "ref:";

/// Validation result with details.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Validator for stack fixtures.
pub struct FixtureValidator;

impl FixtureValidator {
    /// Validate a whole fixture: definition, members and member naming.
    pub fn validate(fixture: &StackFixture) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.merge(Self::validate_definition(&fixture.definition));

        let mut seen = HashSet::new();
        for member in &fixture.members {
            result.merge(Self::validate_member(member));
            if !member.name.is_empty() && !seen.insert(member.name.as_str()) {
                result.add_error(format!("Duplicate member name: {}", member.name));
            }
        }

        if fixture.members.is_empty() {
            result.add_warning("Stack has no members");
        }

        result
    }

    /// Validate the stack definition on its own.
    pub fn validate_definition(definition: &StackDefinition) -> ValidationResult {
        let mut result = ValidationResult::new();

        let required = [
            ("name", &definition.name),
            ("id", &definition.id),
            ("configuration_ref", &definition.configuration_ref),
        ];
        for (field, value) in required {
            if value.as_deref().map_or(true, str::is_empty) {
                result.add_error(format!("Stack definition is missing required field: {}", field));
            }
        }

        let mut seen = HashSet::new();
        for input in &definition.inputs {
            if !seen.insert(input.name.as_str()) {
                result.add_error(format!("Duplicate stack input: {}", input.name));
            }
            if input.required && input.default.is_null() {
                result.add_warning(format!("Required stack input '{}' has no default", input.name));
            }
            check_reference(&mut result, "stack input", &input.name, &input.default);
        }

        check_outputs(&mut result, "stack", &definition.outputs);

        result
    }

    /// Validate one member configuration.
    pub fn validate_member(member: &MemberConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        if member.name.is_empty() {
            result.add_error(format!("Member {} has empty name", member.id));
        }
        if member.id.is_empty() {
            result.add_error(format!("Member '{}' has empty id", member.name));
        }

        for (name, value) in &member.inputs {
            check_reference(&mut result, &format!("member '{}' input", member.name), name, value);
        }

        check_outputs(&mut result, &format!("member '{}'", member.name), &member.outputs);

        result
    }
}

fn check_outputs(result: &mut ValidationResult, owner: &str, outputs: &[OutputValue]) {
    let mut seen = HashSet::new();
    for output in outputs {
        if !seen.insert(output.name.as_str()) {
            result.add_error(format!("Duplicate {} output: {}", owner, output.name));
        }
        check_reference(result, &format!("{} output", owner), &output.name, &output.value);
    }
}

fn check_reference(result: &mut ValidationResult, owner: &str, name: &str, value: &Value) {
    if let Some(path) = value.as_str().and_then(|s| s.strip_prefix(REFERENCE_PREFIX)) {
        if path.trim().trim_matches('/').is_empty() {
            result.add_warning(format!("{} '{}' has an empty reference path", owner, name));
        }
    }
}
