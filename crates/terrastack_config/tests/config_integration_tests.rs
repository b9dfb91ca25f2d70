//! Integration tests for stack fixtures.

use std::fs;

use serde_json::json;
use tempfile::tempdir;

use terrastack_config::{
    ConfigError, FixtureFormat, FixtureValidator, FixtureWriter, MemberConfig, StackDefinition,
    StackFixture, StackInput,
};

fn sample_fixture() -> StackFixture {
    let definition = StackDefinition::new("landing-zone", "stack-42", "catalog/landing-zone@2.1.0")
        .with_input(
            StackInput::new("region", "eu-de")
                .with_type("string")
                .with_description("Region to deploy into")
                .required(),
        )
        .with_input(StackInput::new("zones", json!(["eu-de-1", "eu-de-2"])))
        .with_output("cluster_id", "ref:../members/cluster/outputs/cluster_id");

    StackFixture::new(definition)
        .with_member(
            MemberConfig::new("cfg-vpc", "vpc")
                .with_input("region", "ref:../inputs/region")
                .with_output("vpc_id", "r010-abc"),
        )
        .with_member(
            MemberConfig::new("cfg-cluster", "cluster")
                .with_input("vpc_id", "ref:../members/vpc/outputs/vpc_id")
                .with_output("cluster_id", "ref:../inputs/cluster_name"),
        )
}

/// A fixture saved as JSON loads back unchanged.
#[test]
fn test_json_fixture_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stack.json");
    let fixture = sample_fixture();

    fixture.to_file(&path).unwrap();
    let loaded = StackFixture::from_file(&path).unwrap();

    assert_eq!(loaded, fixture);
}

/// YAML output is readable and keeps the `type` key of input declarations.
#[test]
fn test_yaml_fixture_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stack.yml");

    sample_fixture().to_file(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("type: string"));
    assert!(content.contains("ref:../members/vpc/outputs/vpc_id"));

    let loaded = StackFixture::from_file(&path).unwrap();
    assert_eq!(loaded.members.len(), 2);
    assert_eq!(
        loaded.member("cluster").unwrap().inputs["vpc_id"],
        json!("ref:../members/vpc/outputs/vpc_id")
    );
}

/// Missing optional sections default to empty.
#[test]
fn test_minimal_json_fixture() {
    let fixture = StackFixture::from_json_str(
        r#"{ "definition": { "name": "s", "id": "1", "configuration_ref": "c" } }"#,
    )
    .unwrap();

    assert!(fixture.definition.inputs.is_empty());
    assert!(fixture.definition.outputs.is_empty());
    assert!(fixture.members.is_empty());
}

#[test]
fn test_render_formats() {
    let fixture = sample_fixture();

    let json = FixtureWriter::render(&fixture, FixtureFormat::Json).unwrap();
    assert!(json.trim_start().starts_with('{'));

    let yaml = FixtureWriter::render(&fixture, FixtureFormat::Yaml).unwrap();
    assert!(yaml.contains("definition:"));
}

#[test]
fn test_validate_loaded_fixture() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stack.yaml");
    sample_fixture().to_file(&path).unwrap();

    let fixture = StackFixture::from_file(&path).unwrap();
    let result = FixtureValidator::validate(&fixture);

    assert!(result.valid, "Validation failed: {:?}", result.errors);
}

#[test]
fn test_validate_reports_every_problem() {
    let mut fixture = sample_fixture();
    fixture.definition.id = None;
    fixture.members.push(MemberConfig::new("", "vpc"));
    let duplicate = fixture.members[0].outputs[0].clone();
    fixture.members[0].outputs.push(duplicate);

    let result = FixtureValidator::validate(&fixture);

    assert!(!result.valid);
    assert!(result.errors.iter().any(|e| e.contains("field: id")));
    assert!(result.errors.iter().any(|e| e.contains("empty id")));
    assert!(result.errors.iter().any(|e| e.contains("Duplicate member name: vpc")));
    assert!(result.errors.iter().any(|e| e.contains("Duplicate member 'vpc' output: vpc_id")));
}

#[test]
fn test_load_invalid_yaml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "definition: [unclosed").unwrap();

    let err = StackFixture::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}
