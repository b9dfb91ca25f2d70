//! Fixture writing utilities.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::models::{FixtureFormat, StackFixture};

/// Writer for stack fixture files.
pub struct FixtureWriter;

impl FixtureWriter {
    /// Write a fixture, picking the format from the file extension.
    pub fn write_fixture(path: impl AsRef<Path>, fixture: &StackFixture) -> ConfigResult<()> {
        let path = path.as_ref();
        let format = FixtureFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

        debug!("Writing {} stack fixture to {:?}", format.as_str(), path);
        let content = Self::render(fixture, format)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Render a fixture in the given format.
    pub fn render(fixture: &StackFixture, format: FixtureFormat) -> ConfigResult<String> {
        let content = match format {
            FixtureFormat::Json => serde_json::to_string_pretty(fixture)?,
            FixtureFormat::Yaml => serde_yaml::to_string(fixture)?,
        };
        Ok(content)
    }
}

impl StackFixture {
    /// Save the fixture to a `.json`, `.yaml` or `.yml` file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        FixtureWriter::write_fixture(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MemberConfig, StackDefinition};
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fixtures/nested/stack.yaml");
        let fixture = StackFixture::new(StackDefinition::new("s", "id", "cfg"))
            .with_member(MemberConfig::new("m-1", "member1").with_output("out", "v"));

        fixture.to_file(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("member1"));
    }

    #[test]
    fn test_write_rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        let fixture = StackFixture::default();
        let err = fixture.to_file(dir.path().join("stack.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
