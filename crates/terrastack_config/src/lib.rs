//! # terrastack_config
//!
//! Stack definitions and member configurations for terrastack.
//!
//! A stack is a top-level configuration made of member configurations, each
//! with its own inputs and outputs. Values are kept as raw JSON values and
//! may be literals, lists or `ref:` paths pointing at other values of the
//! same stack; `terrastack_refs` turns them into a resolvable graph.
//!
//! ## Features
//!
//! - **Models**: stack definition, member configs and output values
//! - **Fixtures**: load and save stacks as JSON or YAML files
//! - **Validation**: structural checks with readable errors and warnings
//!
//! ## Example
//!
//! ```rust,no_run
//! use terrastack_config::{FixtureValidator, StackFixture};
//!
//! let fixture = StackFixture::from_file("tests/fixtures/stack.yaml").unwrap();
//!
//! let result = FixtureValidator::validate(&fixture);
//! if !result.valid {
//!     for error in &result.errors {
//!         eprintln!("Error: {}", error);
//!     }
//! }
//! ```

pub mod error;
pub mod models;
pub mod reader;
pub mod validator;
pub mod writer;

pub use error::{ConfigError, ConfigResult};
pub use models::*;
pub use reader::FixtureReader;
pub use validator::{FixtureValidator, ValidationResult};
pub use writer::FixtureWriter;
