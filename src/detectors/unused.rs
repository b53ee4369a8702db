//! Public types that nothing else in the project refers to

use super::{ProjectContext, ProjectDetector};
use crate::models::issue::{IssueCode, ProjectIssue, Severity};
use crate::models::source_file::TypeInfo;

pub struct UnusedPublicTypeDetector {
    entry_point_suffixes: Vec<String>,
}

impl UnusedPublicTypeDetector {
    pub fn new(entry_point_suffixes: Vec<String>) -> Self {
        Self {
            entry_point_suffixes,
        }
    }

    fn is_entry_point(&self, info: &TypeInfo) -> bool {
        self.entry_point_suffixes
            .iter()
            .any(|suffix| !suffix.is_empty() && info.simple_name.ends_with(suffix.as_str()))
    }

    fn is_candidate(&self, info: &TypeInfo) -> bool {
        info.is_public() && !info.kind.is_interface() && !info.nested && !self.is_entry_point(info)
    }
}

impl ProjectDetector for UnusedPublicTypeDetector {
    fn name(&self) -> &'static str {
        "unused-public-type"
    }

    fn detect(&self, ctx: &ProjectContext<'_>) -> Vec<ProjectIssue> {
        ctx.symbols
            .iter()
            .filter(|(_, info)| self.is_candidate(info))
            .filter(|(fqn, _)| ctx.graph.users_of(fqn.as_str()).next().is_none())
            .map(|(_, info)| {
                ProjectIssue::new(
                    Severity::Info,
                    IssueCode::UnusedPublicClass,
                    format!(
                        "Public {} '{}' is not referenced by any other project type",
                        kind_label(info),
                        info.simple_name
                    ),
                    "Remove it, reduce its visibility, or add it to the entry-point suffixes if it is used externally",
                    info.file.display().to_string(),
                )
            })
            .collect()
    }
}

fn kind_label(info: &TypeInfo) -> &'static str {
    use crate::models::source_file::TypeKind;
    match info.kind {
        TypeKind::Class => "class",
        TypeKind::Interface => "interface",
        TypeKind::Enum => "enum",
        TypeKind::Record => "record",
        TypeKind::Annotation => "annotation",
    }
}
