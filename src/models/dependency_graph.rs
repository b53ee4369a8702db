//! Type-level dependency graph

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Directed graph of type usages, keyed by fully-qualified name.
///
/// Edge targets may name types outside the project; detectors only follow
/// targets that are present in the symbol table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// Source type to the types it uses
    pub dependencies: BTreeMap<String, BTreeSet<String>>,

    /// Target type to the types that use it
    pub used_by: BTreeMap<String, BTreeSet<String>>,
}

/// An edge in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type as a node even if it has no edges yet
    pub fn add_node(&mut self, fqn: &str) {
        self.dependencies.entry(fqn.to_string()).or_default();
    }

    /// Add an edge and its inverse usage. Self-loops are kept.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        let added = self
            .dependencies
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
        self.used_by
            .entry(to.to_string())
            .or_default()
            .insert(from.to_string());
        added
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.dependencies
            .get(from)
            .map(|targets| targets.contains(to))
            .unwrap_or(false)
    }

    /// Types used by `fqn`, in sorted order
    pub fn dependencies_of(&self, fqn: &str) -> impl Iterator<Item = &String> {
        self.dependencies
            .get(fqn)
            .into_iter()
            .flat_map(|set| set.iter())
    }

    /// Types that use `fqn`, excluding `fqn` itself
    pub fn users_of<'a>(&'a self, fqn: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.used_by
            .get(fqn)
            .into_iter()
            .flat_map(|set| set.iter())
            .filter(move |user| user.as_str() != fqn)
    }

    pub fn edges(&self) -> impl Iterator<Item = DependencyEdge> + '_ {
        self.dependencies.iter().flat_map(|(from, targets)| {
            targets.iter().map(move |to| DependencyEdge {
                from: from.clone(),
                to: to.clone(),
            })
        })
    }

    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(|targets| targets.len()).sum()
    }

    /// Get statistics about the dependency graph
    pub fn statistics(&self) -> GraphStatistics {
        let mut nodes: BTreeSet<&str> = self.dependencies.keys().map(String::as_str).collect();
        nodes.extend(self.used_by.keys().map(String::as_str));

        let self_loops = self
            .dependencies
            .iter()
            .filter(|(from, targets)| targets.contains(*from))
            .count();

        // Ties go to the first node in name order
        let mut max_fan_in = 0;
        let mut max_fan_in_type = None;
        for (fqn, users) in &self.used_by {
            if users.len() > max_fan_in {
                max_fan_in = users.len();
                max_fan_in_type = Some(fqn.clone());
            }
        }

        let mut max_fan_out = 0;
        let mut max_fan_out_type = None;
        for (fqn, targets) in &self.dependencies {
            if targets.len() > max_fan_out {
                max_fan_out = targets.len();
                max_fan_out_type = Some(fqn.clone());
            }
        }

        GraphStatistics {
            total_nodes: nodes.len(),
            total_edges: self.edge_count(),
            self_loops,
            max_fan_in,
            max_fan_in_type,
            max_fan_out,
            max_fan_out_type,
        }
    }

    /// Export to DOT format for visualization.
    ///
    /// `is_known` decides whether a node is drawn as a project type (solid) or
    /// an external one (dashed).
    pub fn to_dot<F>(&self, is_known: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        let mut dot = String::from("digraph dependencies {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box];\n\n");

        let mut nodes: BTreeSet<&String> = self.dependencies.keys().collect();
        nodes.extend(self.used_by.keys());

        for fqn in nodes {
            let label = fqn.rsplit('.').next().unwrap_or(fqn);
            let style = if is_known(fqn) { "solid" } else { "dashed" };
            dot.push_str(&format!(
                "  \"{}\" [label=\"{}\", style={}];\n",
                fqn, label, style
            ));
        }

        dot.push('\n');

        for edge in self.edges() {
            let color = if edge.from == edge.to { "gray" } else { "black" };
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\" [color={}];\n",
                edge.from, edge.to, color
            ));
        }

        dot.push_str("}\n");
        dot
    }
}

/// Statistics about the dependency graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub self_loops: usize,
    pub max_fan_in: usize,
    pub max_fan_in_type: Option<String>,
    pub max_fan_out: usize,
    pub max_fan_out_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_maintains_inverse() {
        let mut graph = DependencyGraph::new();
        assert!(graph.add_edge("a.A", "a.B"));
        assert!(!graph.add_edge("a.A", "a.B"));
        graph.add_edge("a.C", "a.B");

        assert!(graph.has_edge("a.A", "a.B"));
        let users: Vec<_> = graph.users_of("a.B").cloned().collect();
        assert_eq!(users, vec!["a.A".to_string(), "a.C".to_string()]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_self_loop_kept_but_not_a_user() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a.Node", "a.Node");

        assert!(graph.has_edge("a.Node", "a.Node"));
        assert_eq!(graph.users_of("a.Node").count(), 0);
        assert_eq!(graph.statistics().self_loops, 1);
    }

    #[test]
    fn test_statistics_fan_in_out() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a.A", "a.B");
        graph.add_edge("a.A", "a.C");
        graph.add_edge("a.D", "a.C");
        graph.add_node("a.E");

        let stats = graph.statistics();
        assert_eq!(stats.total_nodes, 5);
        assert_eq!(stats.total_edges, 3);
        assert_eq!(stats.max_fan_out, 2);
        assert_eq!(stats.max_fan_out_type.as_deref(), Some("a.A"));
        assert_eq!(stats.max_fan_in, 2);
        assert_eq!(stats.max_fan_in_type.as_deref(), Some("a.C"));
    }

    #[test]
    fn test_to_dot() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a.A", "java.util.List");

        let dot = graph.to_dot(|fqn| fqn.starts_with("a."));
        assert!(dot.starts_with("digraph dependencies {"));
        assert!(dot.contains("\"a.A\" [label=\"A\", style=solid]"));
        assert!(dot.contains("\"java.util.List\" [label=\"List\", style=dashed]"));
        assert!(dot.contains("\"a.A\" -> \"java.util.List\""));
    }
}
