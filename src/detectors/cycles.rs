//! Circular dependency detection over the type graph
//!
//! Iterative depth-first search with an explicit stack and three colours. The
//! search is restarted from every known type in name order with fresh colours;
//! a back-edge to an in-progress type closes a cycle headed by that type. Each
//! head is reported at most once per run, so a cycle of N types is reported up
//! to N times unless rotations are deduplicated.

use super::{ProjectContext, ProjectDetector};
use crate::models::issue::{IssueCode, ProjectIssue, Severity};
use crate::models::source_file::simple_name_of;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Colour {
    InProgress,
    Done,
}

struct Frame<'g> {
    node: &'g str,
    successors: Vec<&'g str>,
    next: usize,
}

/// Reports dependency cycles between project types
pub struct CircularDependencyDetector {
    dedupe_rotations: bool,
}

impl CircularDependencyDetector {
    pub fn new(dedupe_rotations: bool) -> Self {
        Self { dedupe_rotations }
    }

    /// Find cycles as paths `[head, .., last]` where `last` depends on `head`
    pub fn find_cycles(&self, ctx: &ProjectContext<'_>) -> Vec<Vec<String>> {
        let mut reported_heads: BTreeSet<String> = BTreeSet::new();
        let mut seen_rotations: BTreeSet<Vec<String>> = BTreeSet::new();
        let mut cycles = Vec::new();

        for root in ctx.symbols.fqns() {
            let mut colours: BTreeMap<&str, Colour> = BTreeMap::new();
            let mut path: Vec<&str> = Vec::new();
            let mut stack: Vec<Frame<'_>> = Vec::new();

            colours.insert(root.as_str(), Colour::InProgress);
            path.push(root.as_str());
            stack.push(self.frame(ctx, root.as_str()));

            while let Some(frame) = stack.last_mut() {
                let Some(&next) = frame.successors.get(frame.next) else {
                    colours.insert(frame.node, Colour::Done);
                    stack.pop();
                    path.pop();
                    continue;
                };
                frame.next += 1;
                let current = frame.node;

                match colours.get(next) {
                    None => {
                        colours.insert(next, Colour::InProgress);
                        path.push(next);
                        stack.push(self.frame(ctx, next));
                    }
                    Some(Colour::InProgress) => {
                        // Self-loops are legal and not reported
                        if next == current || reported_heads.contains(next) {
                            continue;
                        }
                        let Some(start) = path.iter().position(|n| *n == next) else {
                            continue;
                        };
                        let cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();

                        if self.dedupe_rotations && !seen_rotations.insert(canonical_rotation(&cycle)) {
                            continue;
                        }
                        reported_heads.insert(next.to_string());
                        cycles.push(cycle);
                    }
                    Some(Colour::Done) => {}
                }
            }
        }

        cycles
    }

    /// Successors restricted to known types, in name order
    fn frame<'g>(&self, ctx: &ProjectContext<'g>, node: &'g str) -> Frame<'g> {
        let successors = ctx
            .graph
            .dependencies_of(node)
            .map(String::as_str)
            .filter(|target| ctx.symbols.contains(target))
            .collect();
        Frame {
            node,
            successors,
            next: 0,
        }
    }
}

/// Render a cycle as `A -> B -> C -> A` using simple names
pub fn render_cycle(cycle: &[String]) -> String {
    let mut names: Vec<&str> = cycle.iter().map(|fqn| simple_name_of(fqn)).collect();
    if let Some(first) = names.first().copied() {
        names.push(first);
    }
    names.join(" -> ")
}

/// Rotate so the smallest name comes first
fn canonical_rotation(cycle: &[String]) -> Vec<String> {
    let min_idx = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, name)| *name)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut rotated = Vec::with_capacity(cycle.len());
    rotated.extend_from_slice(&cycle[min_idx..]);
    rotated.extend_from_slice(&cycle[..min_idx]);
    rotated
}

impl ProjectDetector for CircularDependencyDetector {
    fn name(&self) -> &'static str {
        "circular-dependency"
    }

    fn detect(&self, ctx: &ProjectContext<'_>) -> Vec<ProjectIssue> {
        self.find_cycles(ctx)
            .into_iter()
            .map(|cycle| {
                let chain = render_cycle(&cycle);
                tracing::debug!(head = %cycle[0], %chain, "cycle found");
                ProjectIssue::new(
                    Severity::Warning,
                    IssueCode::CircularDependency,
                    format!("Circular dependency: {}", chain),
                    "Break the cycle by introducing an interface or moving the shared code into a separate type",
                    cycle[0].clone(),
                )
            })
            .collect()
    }
}
