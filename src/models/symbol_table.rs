//! Run-scoped table of every type declared in the project

use super::source_file::TypeInfo;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Record of an FQN declared more than once; the later declaration wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateType {
    pub fqn: String,
    pub replaced_file: PathBuf,
    pub winning_file: PathBuf,
}

/// Map of fully-qualified type name to type facts.
///
/// Iteration is in FQN order so everything downstream is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    types: BTreeMap<String, TypeInfo>,
    duplicates: Vec<DuplicateType>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a type, returning the previous entry when the FQN was already known
    pub fn insert(&mut self, info: TypeInfo) -> Option<TypeInfo> {
        let winning_file = info.file.clone();
        let replaced = self.types.insert(info.fqn.clone(), info);

        if let Some(old) = &replaced {
            tracing::warn!(
                fqn = %old.fqn,
                replaced = %old.file.display(),
                winner = %winning_file.display(),
                "duplicate type declaration, keeping the later one"
            );
            self.duplicates.push(DuplicateType {
                fqn: old.fqn.clone(),
                replaced_file: old.file.clone(),
                winning_file,
            });
        }

        replaced
    }

    pub fn get(&self, fqn: &str) -> Option<&TypeInfo> {
        self.types.get(fqn)
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.types.contains_key(fqn)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeInfo)> {
        self.types.iter()
    }

    pub fn fqns(&self) -> impl Iterator<Item = &String> {
        self.types.keys()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn duplicates(&self) -> &[DuplicateType] {
        &self.duplicates
    }

    /// Types grouped by package, both levels in sorted order
    pub fn by_package(&self) -> BTreeMap<&str, Vec<&TypeInfo>> {
        let mut packages: BTreeMap<&str, Vec<&TypeInfo>> = BTreeMap::new();
        for info in self.types.values() {
            packages.entry(info.package.as_str()).or_default().push(info);
        }
        packages
    }

    pub fn package_count(&self) -> usize {
        self.types
            .values()
            .map(|info| info.package.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}
