//! Reference resolution.
//!
//! A reference has the form `ref:<path>` where `<path>` is a `/` separated
//! list of segments walked from the root stack:
//!
//! - `inputs`, `outputs` select the inputs or outputs of the current stack
//!   or member; `members` selects the stack's members;
//! - any other segment names a member (on the stack or its members list) or
//!   a ref (on an inputs/outputs list);
//! - `..` segments are skipped. Every path starts at the root, so
//!   `ref:../members/vpc/outputs/id` and `ref:members/vpc/outputs/id` are
//!   the same path.
//!
//! Keywords are matched before names. The path must end on a resolved ref.
//!
//! Resolution is a single pass in a fixed order: stack inputs, stack
//! outputs, then each member's inputs and outputs in declaration order.
//! A lookup sees values resolved earlier in the same pass, nothing later;
//! chains that point "forward" in that order need another pass.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use terrastack_config::OutputValue;

use crate::builder::build_output_refs;
use crate::error::{RefError, RefResult};
use crate::model::{ConfigRefs, Direction, Ref, StackRef, REFERENCE_PREFIX};

const PARENT_SEGMENT: &str = "..";

/// Counts from one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveSummary {
    /// References looked up during the pass.
    pub attempted: usize,
    /// References that found a value.
    pub resolved: usize,
    /// References left without a value.
    pub unresolved: usize,
}

/// Where the walk currently stands.
enum Node<'a> {
    Stack(&'a StackRef),
    Members(&'a [ConfigRefs]),
    Member(&'a ConfigRefs),
    Refs(&'a [Ref]),
    Value(&'a str),
}

/// Follow a reference path from the root of the graph.
///
/// Returns `None` when `raw` lacks the `ref:` prefix, the path is empty, a
/// segment does not match or the target ref has no value yet.
pub fn resolve_path(stack: &StackRef, raw: &str) -> Option<String> {
    let path = raw
        .strip_prefix(REFERENCE_PREFIX)?
        .trim()
        .trim_matches('/');
    if path.is_empty() {
        return None;
    }

    let mut node = Node::Stack(stack);
    for segment in path.split('/') {
        if segment == PARENT_SEGMENT {
            continue;
        }
        node = step(node, segment)?;
    }

    match node {
        Node::Value(value) => Some(value.to_string()),
        _ => None,
    }
}

fn step<'a>(node: Node<'a>, segment: &str) -> Option<Node<'a>> {
    match node {
        Node::Stack(stack) => match segment {
            "inputs" => Some(Node::Refs(&stack.inputs)),
            "outputs" => Some(Node::Refs(&stack.outputs)),
            "members" => Some(Node::Members(&stack.members)),
            name => find_member(&stack.members, name),
        },
        Node::Members(members) => find_member(members, segment),
        Node::Member(member) => match segment {
            "inputs" => Some(Node::Refs(&member.inputs)),
            "outputs" => Some(Node::Refs(&member.outputs)),
            _ => None,
        },
        Node::Refs(refs) => refs
            .iter()
            .find(|r| r.name == segment)
            .filter(|r| r.resolved)
            .and_then(Ref::value)
            .map(Node::Value),
        Node::Value(_) => None,
    }
}

fn find_member<'a>(members: &'a [ConfigRefs], name: &str) -> Option<Node<'a>> {
    members.iter().find(|m| m.name == name).map(Node::Member)
}

/// Position of one ref inside the graph.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Stack(Direction, usize),
    Member(usize, Direction, usize),
}

fn slots(stack: &StackRef) -> Vec<Slot> {
    let mut slots: Vec<Slot> = (0..stack.inputs.len())
        .map(|i| Slot::Stack(Direction::Input, i))
        .chain((0..stack.outputs.len()).map(|i| Slot::Stack(Direction::Output, i)))
        .collect();

    for (m, member) in stack.members.iter().enumerate() {
        slots.extend((0..member.inputs.len()).map(|i| Slot::Member(m, Direction::Input, i)));
        slots.extend((0..member.outputs.len()).map(|i| Slot::Member(m, Direction::Output, i)));
    }
    slots
}

fn ref_at(stack: &StackRef, slot: Slot) -> &Ref {
    match slot {
        Slot::Stack(Direction::Input, i) => &stack.inputs[i],
        Slot::Stack(Direction::Output, i) => &stack.outputs[i],
        Slot::Member(m, Direction::Input, i) => &stack.members[m].inputs[i],
        Slot::Member(m, Direction::Output, i) => &stack.members[m].outputs[i],
    }
}

fn ref_at_mut(stack: &mut StackRef, slot: Slot) -> &mut Ref {
    match slot {
        Slot::Stack(Direction::Input, i) => &mut stack.inputs[i],
        Slot::Stack(Direction::Output, i) => &mut stack.outputs[i],
        Slot::Member(m, Direction::Input, i) => &mut stack.members[m].inputs[i],
        Slot::Member(m, Direction::Output, i) => &mut stack.members[m].outputs[i],
    }
}

/// Resolve every reference of the graph in place, then recompute the
/// member and stack `resolved` flags.
///
/// References that already carry a value are looked up again; one whose
/// target has disappeared goes back to unresolved.
pub fn resolve_references(stack: &mut StackRef) -> ResolveSummary {
    let mut summary = ResolveSummary::default();

    for slot in slots(stack) {
        let current = ref_at(stack, slot);
        let raw = match (&current.raw_reference, current.is_reference) {
            (Some(raw), true) => raw.clone(),
            _ => continue,
        };

        summary.attempted += 1;
        let value = resolve_path(stack, &raw);
        let target = ref_at_mut(stack, slot);
        match value {
            Some(value) => {
                debug!("Resolved {} '{}' -> {}", raw, target.name, value);
                target.resolve_to(value);
                summary.resolved += 1;
            }
            None => {
                debug!("Could not resolve {} for '{}'", raw, target.name);
                target.mark_unresolved();
                summary.unresolved += 1;
            }
        }
    }

    stack.refresh_resolved();
    info!(
        "Stack '{}': resolved {} of {} references ({} unresolved)",
        stack.name, summary.resolved, summary.attempted, summary.unresolved
    );
    summary
}

impl StackRef {
    /// Resolve references in place. See [`resolve_references`].
    pub fn resolve_references(&mut self) -> ResolveSummary {
        resolve_references(self)
    }

    /// Follow one reference path from this stack. See [`resolve_path`].
    pub fn lookup(&self, raw: &str) -> Option<String> {
        resolve_path(self, raw)
    }

    /// Replace a member's outputs with fresh values, typically live outputs
    /// read after a deployment. Call [`StackRef::resolve_references`]
    /// afterwards to propagate them.
    pub fn set_member_outputs(&mut self, member: &str, outputs: &[OutputValue]) -> RefResult<()> {
        let built = build_output_refs(outputs);
        let config = self
            .member_mut(member)
            .ok_or_else(|| RefError::MemberNotFound(member.to_string()))?;

        config.outputs = built.refs;
        debug!("Replaced {} outputs of member '{}'", config.outputs.len(), member);

        self.warnings.extend(
            built
                .warnings
                .into_iter()
                .map(|w| format!("member '{}': {}", member, w)),
        );
        self.refresh_resolved();
        Ok(())
    }
}
