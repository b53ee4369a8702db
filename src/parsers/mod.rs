//! Parsing functionality for Java sources
//!
//! This module turns source text into syntax trees, syntax trees into per-file
//! facts, and the facts of a whole project into a type dependency graph.

pub mod dependency_graph_builder;
pub mod fact_extractor;
pub mod java_parser;

pub use dependency_graph_builder::{DependencyGraphBuilder, GraphBuilderConfig};
pub use fact_extractor::extract_facts;
pub use java_parser::{JavaParser, ParseOutcome, SourceParser, SyntaxTree};
