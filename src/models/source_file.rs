//! Per-file data extracted from a parsed source file

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Package name reported for types declared without a `package` statement
pub const DEFAULT_PACKAGE: &str = "(default)";

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl TypeKind {
    pub fn is_interface(&self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Annotation)
    }
}

/// Visibility of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    NonPublic,
}

/// Facts about one declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// `package.Simple` (or `package.Outer.Inner`); just the name in the default package
    pub fqn: String,
    pub simple_name: String,
    pub package: String,
    /// Project-relative path of the declaring file
    pub file: PathBuf,
    pub visibility: Visibility,
    pub kind: TypeKind,
    pub is_abstract: bool,
    /// Declared inside another type
    pub nested: bool,
    /// 1-based declaration line
    pub line: usize,
    pub public_methods: BTreeSet<String>,
    pub public_fields: BTreeSet<String>,
}

impl TypeInfo {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// Build a fully-qualified name from a package and a (possibly dotted) type name
pub fn qualify(package: &str, name: &str) -> String {
    if package == DEFAULT_PACKAGE || package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package, name)
    }
}

/// Last dot-separated segment of a name
pub fn simple_name_of(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// One `import` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRef {
    /// Imported name without `import`, `static`, `.*` or `;`
    pub path: String,
    pub is_static: bool,
    /// `import a.b.*;`
    pub is_wildcard: bool,
}

impl ImportRef {
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.path)
    }
}

/// Facts about one method or constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodFacts {
    pub name: String,
    /// Simple name of the declaring type
    pub owner: String,
    pub is_constructor: bool,
    pub parameter_count: usize,
    pub line_start: usize,
    pub line_end: usize,
    pub complexity: u32,
}

impl MethodFacts {
    pub fn line_count(&self) -> usize {
        self.line_end.saturating_sub(self.line_start) + 1
    }
}

/// Everything extracted from one successfully parsed file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFacts {
    pub package: String,
    pub types: Vec<TypeInfo>,
    pub imports: Vec<ImportRef>,
    /// Simple names of every type referenced in the file
    pub used_types: BTreeSet<String>,
    pub methods: Vec<MethodFacts>,
    /// 1-based lines of `catch` clauses with an empty body
    pub empty_catch_lines: Vec<usize>,
}

impl FileFacts {
    pub fn class_count(&self) -> usize {
        self.types.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn total_complexity(&self) -> u64 {
        self.methods.iter().map(|m| m.complexity as u64).sum()
    }
}

/// Outcome of parsing one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ParseStatus {
    Success,
    Failure { reason: String },
}

impl ParseStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseStatus::Success)
    }
}

/// A discovered source file and what was learned from it
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Project-relative path
    pub path: PathBuf,
    pub text: String,
    pub status: ParseStatus,
    /// Present only when parsing succeeded
    pub facts: Option<FileFacts>,
}

impl SourceFile {
    pub fn declared_types(&self) -> &[TypeInfo] {
        self.facts.as_ref().map(|f| f.types.as_slice()).unwrap_or(&[])
    }
}
