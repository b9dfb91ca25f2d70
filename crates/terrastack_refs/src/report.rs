//! Queries over a reference graph and diagnostic reports.

use serde::{Deserialize, Serialize};

use crate::model::{Direction, Ref, StackRef};

/// A reference that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedEntry {
    /// Stack or member the ref belongs to.
    pub owner: String,
    pub name: String,
    pub direction: Direction,
    pub raw_reference: String,
}

/// Resolution state of a whole stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub stack: String,
    pub total_refs: usize,
    pub references: usize,
    pub resolved_references: usize,
    pub unresolved: Vec<UnresolvedEntry>,
    pub passed: bool,
}

impl ResolutionReport {
    pub fn new(stack: impl Into<String>) -> Self {
        Self {
            stack: stack.into(),
            total_refs: 0,
            references: 0,
            resolved_references: 0,
            unresolved: Vec::new(),
            passed: true,
        }
    }

    fn record(&mut self, owner: &str, direction: Direction, r: &Ref) {
        self.total_refs += 1;
        let Some(raw) = &r.raw_reference else {
            return;
        };

        self.references += 1;
        if r.resolved {
            self.resolved_references += 1;
        } else {
            self.passed = false;
            self.unresolved.push(UnresolvedEntry {
                owner: owner.to_string(),
                name: r.name.clone(),
                direction,
                raw_reference: raw.clone(),
            });
        }
    }
}

impl StackRef {
    /// Every ref with its owner name: stack inputs, stack outputs, then each
    /// member's inputs and outputs.
    pub fn owned_refs(&self) -> impl Iterator<Item = (&str, Direction, &Ref)> {
        let stack = self.name.as_str();
        self.own_refs()
            .map(move |(direction, r)| (stack, direction, r))
            .chain(self.members.iter().flat_map(|member| {
                member
                    .refs()
                    .map(move |(direction, r)| (member.name.as_str(), direction, r))
            }))
    }

    /// All refs of the graph, in report order.
    pub fn all_refs(&self) -> Vec<&Ref> {
        self.owned_refs().map(|(_, _, r)| r).collect()
    }

    /// References that have not been resolved. Entries without a raw
    /// reference are never included.
    pub fn unresolved_refs(&self) -> Vec<&Ref> {
        self.owned_refs()
            .map(|(_, _, r)| r)
            .filter(|r| !r.resolved && r.raw_reference.is_some())
            .collect()
    }

    /// One line per reference, resolved or not.
    pub fn all_refs_as_string(&self) -> String {
        self.render(|_| true)
    }

    /// One line per unresolved reference.
    pub fn unresolved_refs_as_string(&self) -> String {
        self.render(|r| !r.resolved)
    }

    fn render(&self, include: impl Fn(&Ref) -> bool) -> String {
        let mut out = String::new();
        for (owner, direction, r) in self.owned_refs() {
            let Some(raw) = &r.raw_reference else {
                continue;
            };
            if !include(r) {
                continue;
            }

            out.push_str(&format!("{} - {}({}): {}", owner, r.name, direction, raw));
            match r.value() {
                Some(value) if r.resolved => out.push_str(&format!(" Value: {}\n", value)),
                _ => out.push_str(" (Unresolved)\n"),
            }
        }
        out
    }

    /// Summarise the resolution state.
    pub fn report(&self) -> ResolutionReport {
        let mut report = ResolutionReport::new(&self.name);
        for (owner, direction, r) in self.owned_refs() {
            report.record(owner, direction, r);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConfigRefs;

    fn sample_stack() -> StackRef {
        StackRef::new("stack", "id")
            .with_input(Ref::literal("region", "us-south"))
            .with_input(Ref::reference("prefix", "ref:../outputs/name"))
            .with_output(Ref::absent("name"))
            .with_member(
                ConfigRefs::new("vpc", "m-1")
                    .with_input(Ref::reference("region", "ref:../inputs/region"))
                    .with_output(Ref::literal("vpc_id", "r006")),
            )
    }

    #[test]
    fn test_all_refs_order() {
        let stack = sample_stack();
        let names: Vec<_> = stack.all_refs().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["region", "prefix", "name", "region", "vpc_id"]);
    }

    #[test]
    fn test_unresolved_excludes_non_references() {
        let stack = sample_stack();
        let unresolved = stack.unresolved_refs();

        assert_eq!(unresolved.len(), 2);
        assert!(unresolved.iter().all(|r| r.raw_reference.is_some()));
        assert!(!unresolved.iter().any(|r| r.name == "name"));
    }

    #[test]
    fn test_render_lines() {
        let mut stack = sample_stack();
        stack.resolve_references();

        assert_eq!(
            stack.all_refs_as_string(),
            "stack - prefix(Input): ref:../outputs/name (Unresolved)\n\
             vpc - region(Input): ref:../inputs/region Value: us-south\n"
        );
        assert_eq!(
            stack.unresolved_refs_as_string(),
            "stack - prefix(Input): ref:../outputs/name (Unresolved)\n"
        );
    }

    #[test]
    fn test_report_counts() {
        let mut stack = sample_stack();
        stack.resolve_references();

        let report = stack.report();

        assert_eq!(report.stack, "stack");
        assert_eq!(report.total_refs, 5);
        assert_eq!(report.references, 2);
        assert_eq!(report.resolved_references, 1);
        assert!(!report.passed);
        assert_eq!(
            report.unresolved,
            vec![UnresolvedEntry {
                owner: "stack".to_string(),
                name: "prefix".to_string(),
                direction: Direction::Input,
                raw_reference: "ref:../outputs/name".to_string(),
            }]
        );
    }

    #[test]
    fn test_report_passes_without_references() {
        let stack = StackRef::new("s", "id").with_output(Ref::literal("a", "b"));
        let report = stack.report();
        assert!(report.passed);
        assert_eq!(report.references, 0);
        assert_eq!(stack.all_refs_as_string(), "");
    }
}
