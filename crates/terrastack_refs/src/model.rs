//! Reference graph types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix marking a value as a reference to another value of the stack.
pub const REFERENCE_PREFIX: &str = "ref:";

/// Which side of a configuration a ref belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Input => "Input",
            Direction::Output => "Output",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named value that is either a literal or a `ref:` pointer.
///
/// `resolved` implies `resolved_value.is_some()`. Literals are resolved
/// from the start; references only once the resolver finds their target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_value: Option<String>,
    pub is_reference: bool,
    pub resolved: bool,
}

impl Ref {
    /// A resolved literal value.
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_reference: None,
            resolved_value: Some(value.into()),
            is_reference: false,
            resolved: true,
        }
    }

    /// An unresolved `ref:` pointer.
    pub fn reference(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_reference: Some(raw.into()),
            resolved_value: None,
            is_reference: true,
            resolved: false,
        }
    }

    /// A declared entry without any value.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_reference: None,
            resolved_value: None,
            is_reference: false,
            resolved: false,
        }
    }

    /// Record the value a reference points at.
    pub fn resolve_to(&mut self, value: impl Into<String>) {
        self.resolved_value = Some(value.into());
        self.resolved = true;
    }

    /// Drop a previously resolved value.
    pub fn mark_unresolved(&mut self) {
        self.resolved_value = None;
        self.resolved = false;
    }

    /// The resolved value, if any.
    pub fn value(&self) -> Option<&str> {
        self.resolved_value.as_deref()
    }
}

/// Inputs and outputs of one member configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRefs {
    pub name: String,
    pub id: String,
    pub inputs: Vec<Ref>,
    pub outputs: Vec<Ref>,
    pub resolved: bool,
}

impl ConfigRefs {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            resolved: true,
        }
    }

    pub fn with_input(mut self, input: Ref) -> Self {
        self.inputs.push(input);
        self.refresh_resolved();
        self
    }

    pub fn with_output(mut self, output: Ref) -> Self {
        self.outputs.push(output);
        self.refresh_resolved();
        self
    }

    pub fn input(&self, name: &str) -> Option<&Ref> {
        self.inputs.iter().find(|r| r.name == name)
    }

    pub fn output(&self, name: &str) -> Option<&Ref> {
        self.outputs.iter().find(|r| r.name == name)
    }

    /// Inputs then outputs, each tagged with its direction.
    pub fn refs(&self) -> impl Iterator<Item = (Direction, &Ref)> {
        tagged(&self.inputs, &self.outputs)
    }

    /// True when every input and output is resolved.
    pub fn all_resolved(&self) -> bool {
        self.inputs.iter().chain(&self.outputs).all(|r| r.resolved)
    }

    /// Recompute `resolved` from the refs.
    pub fn refresh_resolved(&mut self) -> bool {
        self.resolved = self.all_resolved();
        self.resolved
    }
}

/// Root of the reference graph: a stack's own inputs and outputs plus its
/// members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackRef {
    pub name: String,
    pub id: String,
    pub inputs: Vec<Ref>,
    pub outputs: Vec<Ref>,
    pub members: Vec<ConfigRefs>,
    pub resolved: bool,
    /// Values skipped while building the graph.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl StackRef {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            members: Vec::new(),
            resolved: true,
            warnings: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: Ref) -> Self {
        self.inputs.push(input);
        self.refresh_resolved();
        self
    }

    pub fn with_output(mut self, output: Ref) -> Self {
        self.outputs.push(output);
        self.refresh_resolved();
        self
    }

    pub fn with_member(mut self, member: ConfigRefs) -> Self {
        self.members.push(member);
        self.refresh_resolved();
        self
    }

    pub fn member(&self, name: &str) -> Option<&ConfigRefs> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn member_mut(&mut self, name: &str) -> Option<&mut ConfigRefs> {
        self.members.iter_mut().find(|m| m.name == name)
    }

    pub fn input(&self, name: &str) -> Option<&Ref> {
        self.inputs.iter().find(|r| r.name == name)
    }

    pub fn output(&self, name: &str) -> Option<&Ref> {
        self.outputs.iter().find(|r| r.name == name)
    }

    /// The stack's own inputs then outputs, each tagged with its direction.
    pub fn own_refs(&self) -> impl Iterator<Item = (Direction, &Ref)> {
        tagged(&self.inputs, &self.outputs)
    }

    /// Recompute member flags and the stack flag from the refs.
    pub fn refresh_resolved(&mut self) -> bool {
        let own = self.inputs.iter().chain(&self.outputs).all(|r| r.resolved);
        let mut members = true;
        for member in &mut self.members {
            members &= member.refresh_resolved();
        }
        self.resolved = own && members;
        self.resolved
    }
}

fn tagged<'a>(
    inputs: &'a [Ref],
    outputs: &'a [Ref],
) -> impl Iterator<Item = (Direction, &'a Ref)> {
    inputs
        .iter()
        .map(|r| (Direction::Input, r))
        .chain(outputs.iter().map(|r| (Direction::Output, r)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_constructors() {
        let literal = Ref::literal("a", "1");
        assert!(literal.resolved && !literal.is_reference);
        assert_eq!(literal.value(), Some("1"));

        let reference = Ref::reference("b", "ref:../inputs/a");
        assert!(!reference.resolved && reference.is_reference);
        assert_eq!(reference.value(), None);

        let absent = Ref::absent("c");
        assert!(!absent.resolved && !absent.is_reference);
        assert!(absent.raw_reference.is_none());
    }

    #[test]
    fn test_resolve_and_unresolve() {
        let mut r = Ref::reference("b", "ref:../inputs/a");
        r.resolve_to("1");
        assert!(r.resolved);
        assert_eq!(r.value(), Some("1"));

        r.mark_unresolved();
        assert!(!r.resolved);
        assert_eq!(r.value(), None);
        assert!(r.is_reference);
    }

    #[test]
    fn test_member_flag_follows_refs() {
        let member = ConfigRefs::new("m", "id").with_input(Ref::literal("a", "1"));
        assert!(member.resolved);

        let member = member.with_output(Ref::reference("b", "ref:../inputs/x"));
        assert!(!member.resolved);
    }

    #[test]
    fn test_stack_flag_follows_members() {
        let stack = StackRef::new("s", "id")
            .with_input(Ref::literal("a", "1"))
            .with_member(ConfigRefs::new("m", "id").with_input(Ref::absent("x")));

        assert!(!stack.resolved);
        assert!(!stack.member("m").unwrap().resolved);
    }

    #[test]
    fn test_refs_are_tagged_in_order() {
        let member = ConfigRefs::new("m", "id")
            .with_output(Ref::literal("o", "1"))
            .with_input(Ref::literal("i", "2"));

        let tags: Vec<_> = member.refs().map(|(d, r)| (d, r.name.as_str())).collect();
        assert_eq!(tags, vec![(Direction::Input, "i"), (Direction::Output, "o")]);
    }
}
