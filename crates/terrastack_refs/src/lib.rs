//! # terrastack_refs
//!
//! Reference resolution for stack configurations.
//!
//! A stack has its own inputs and outputs plus a list of member
//! configurations with theirs. Any of these values may be a `ref:` path to
//! another value of the same stack. This crate builds the graph of those
//! values, follows the paths and reports what is left unresolved.
//!
//! ## Features
//!
//! - Graph construction from stack definitions and member configs
//! - Single-pass resolution of `ref:` paths from the stack root
//! - Flat queries, diagnostic strings and a structured report
//! - Re-resolution after replacing member outputs with live values
//!
//! ## Example
//!
//! ```rust
//! use terrastack_config::{MemberConfig, StackDefinition, StackInput};
//! use terrastack_refs::build_stack_ref;
//!
//! let definition = StackDefinition::new("dev", "stack-1", "catalog/dev")
//!     .with_input(StackInput::new("region", "us-south"));
//! let members = vec![
//!     MemberConfig::new("cfg-1", "vpc").with_input("region", "ref:../inputs/region"),
//! ];
//!
//! let mut stack = build_stack_ref(&definition, &members).unwrap();
//! stack.resolve_references();
//!
//! assert!(stack.resolved);
//! assert_eq!(stack.member("vpc").unwrap().input("region").unwrap().value(), Some("us-south"));
//! ```

pub mod builder;
pub mod error;
pub mod logging;
pub mod model;
pub mod report;
pub mod resolver;

pub use builder::{
    build_config_refs, build_input_refs, build_output_refs, build_stack_ref, classify,
    stringify_list, BuiltRefs, ValueKind,
};
pub use error::{RefError, RefResult};
pub use model::{ConfigRefs, Direction, Ref, StackRef, REFERENCE_PREFIX};
pub use report::{ResolutionReport, UnresolvedEntry};
pub use resolver::{resolve_path, resolve_references, ResolveSummary};
