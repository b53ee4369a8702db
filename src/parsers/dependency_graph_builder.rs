//! Dependency graph construction from extracted file facts

use crate::models::dependency_graph::DependencyGraph;
use crate::models::source_file::{qualify, SourceFile};
use crate::models::symbol_table::SymbolTable;

/// Configuration for dependency graph building
#[derive(Debug, Clone)]
pub struct GraphBuilderConfig {
    /// Link referenced simple names to known types in the file's own package
    pub same_package_fallback: bool,
}

impl Default for GraphBuilderConfig {
    fn default() -> Self {
        Self {
            same_package_fallback: true,
        }
    }
}

/// Derives type-to-type edges from imports and referenced names.
///
/// This is a heuristic: wildcard imports, shadowing and nested static types are
/// not resolved.
pub struct DependencyGraphBuilder<'a> {
    symbols: &'a SymbolTable,
    config: GraphBuilderConfig,
}

impl<'a> DependencyGraphBuilder<'a> {
    pub fn new(symbols: &'a SymbolTable, config: GraphBuilderConfig) -> Self {
        Self { symbols, config }
    }

    /// Build the graph over every successfully parsed file
    pub fn build<'f, I>(&self, files: I) -> DependencyGraph
    where
        I: IntoIterator<Item = &'f SourceFile>,
    {
        let mut graph = DependencyGraph::new();

        for fqn in self.symbols.fqns() {
            graph.add_node(fqn);
        }

        for file in files {
            self.add_file_edges(file, &mut graph);
        }

        tracing::debug!(
            nodes = graph.dependencies.len(),
            edges = graph.edge_count(),
            "dependency graph built"
        );
        graph
    }

    fn add_file_edges(&self, file: &SourceFile, graph: &mut DependencyGraph) {
        let Some(facts) = &file.facts else {
            return;
        };
        if facts.types.is_empty() {
            return;
        }

        let sources: Vec<&str> = facts.types.iter().map(|t| t.fqn.as_str()).collect();

        for import in &facts.imports {
            if import.is_wildcard {
                continue;
            }
            let known = self.symbols.contains(&import.path);
            if known || facts.used_types.contains(import.simple_name()) {
                for source in &sources {
                    graph.add_edge(source, &import.path);
                }
            }
        }

        if self.config.same_package_fallback {
            for name in &facts.used_types {
                let target = qualify(&facts.package, name);
                if self.symbols.contains(&target) {
                    for source in &sources {
                        graph.add_edge(source, &target);
                    }
                }
            }
        }
    }
}
