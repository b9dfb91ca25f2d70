//! Fixture reading utilities.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::models::{FixtureFormat, StackFixture};

/// Reader for stack fixture files.
pub struct FixtureReader;

impl FixtureReader {
    /// Read a fixture, picking the format from the file extension.
    pub fn read_fixture(path: impl AsRef<Path>) -> ConfigResult<StackFixture> {
        let path = path.as_ref();
        let format = FixtureFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        debug!("Reading {} stack fixture from {:?}", format.as_str(), path);
        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse fixture content in the given format.
    pub fn parse(content: &str, format: FixtureFormat) -> ConfigResult<StackFixture> {
        let fixture = match format {
            FixtureFormat::Json => serde_json::from_str(content)?,
            FixtureFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(fixture)
    }
}

impl StackFixture {
    /// Load a fixture from a `.json`, `.yaml` or `.yml` file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        FixtureReader::read_fixture(path)
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        FixtureReader::parse(content, FixtureFormat::Json)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        FixtureReader::parse(content, FixtureFormat::Yaml)
    }
}
