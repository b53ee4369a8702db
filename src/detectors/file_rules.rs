//! Checks that only need a single file's facts

use crate::models::config::Settings;
use crate::models::issue::{FileIssue, IssueCode, Severity};
use crate::models::source_file::FileFacts;

/// Per-method limits
#[derive(Debug, Clone, Copy)]
pub struct FileRuleConfig {
    pub max_method_complexity: u32,
    pub max_method_lines: usize,
    pub max_parameters: usize,
}

impl Default for FileRuleConfig {
    fn default() -> Self {
        FileRuleConfig::from(&Settings::default())
    }
}

impl From<&Settings> for FileRuleConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            max_method_complexity: settings.max_method_complexity,
            max_method_lines: settings.max_method_lines,
            max_parameters: settings.max_parameters,
        }
    }
}

/// Run every file check, returning issues ordered by line
pub fn check_file(facts: &FileFacts, config: &FileRuleConfig) -> Vec<FileIssue> {
    let mut issues = Vec::new();

    for method in &facts.methods {
        let label = if method.is_constructor {
            format!("Constructor of '{}'", method.owner)
        } else {
            format!("Method '{}.{}'", method.owner, method.name)
        };

        if method.complexity > config.max_method_complexity {
            issues.push(FileIssue {
                severity: Severity::Warning,
                code: IssueCode::HighComplexity,
                message: format!(
                    "{} has cyclomatic complexity {} (limit {})",
                    label, method.complexity, config.max_method_complexity
                ),
                suggestion: "Extract branches into smaller methods".to_string(),
                line: method.line_start,
            });
        }

        if method.line_count() > config.max_method_lines {
            issues.push(FileIssue {
                severity: Severity::Info,
                code: IssueCode::LongMethod,
                message: format!(
                    "{} spans {} lines (limit {})",
                    label,
                    method.line_count(),
                    config.max_method_lines
                ),
                suggestion: "Split the method into well-named helpers".to_string(),
                line: method.line_start,
            });
        }

        if method.parameter_count > config.max_parameters {
            issues.push(FileIssue {
                severity: Severity::Info,
                code: IssueCode::TooManyParameters,
                message: format!(
                    "{} takes {} parameters (limit {})",
                    label, method.parameter_count, config.max_parameters
                ),
                suggestion: "Group related parameters into a parameter object".to_string(),
                line: method.line_start,
            });
        }
    }

    for &line in &facts.empty_catch_lines {
        issues.push(FileIssue {
            severity: Severity::Warning,
            code: IssueCode::EmptyCatchBlock,
            message: "Exception is caught and silently ignored".to_string(),
            suggestion: "Handle the exception, log it, or rethrow it".to_string(),
            line,
        });
    }

    for info in &facts.types {
        let starts_upper = info
            .simple_name
            .chars()
            .next()
            .map(char::is_uppercase)
            .unwrap_or(false);
        if !starts_upper {
            issues.push(FileIssue {
                severity: Severity::Info,
                code: IssueCode::TypeNaming,
                message: format!("Type name '{}' does not start with an upper-case letter", info.simple_name),
                suggestion: "Use UpperCamelCase for type names".to_string(),
                line: info.line,
            });
        }
    }

    issues.sort_by_key(|issue| issue.line);
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::source_file::{MethodFacts, TypeInfo, TypeKind, Visibility};
    use std::path::PathBuf;

    fn method(name: &str, params: usize, lines: (usize, usize), complexity: u32) -> MethodFacts {
        MethodFacts {
            name: name.to_string(),
            owner: "Svc".to_string(),
            is_constructor: false,
            parameter_count: params,
            line_start: lines.0,
            line_end: lines.1,
            complexity,
        }
    }

    fn type_named(name: &str, line: usize) -> TypeInfo {
        TypeInfo {
            fqn: name.to_string(),
            simple_name: name.to_string(),
            package: "(default)".to_string(),
            file: PathBuf::from("Svc.java"),
            visibility: Visibility::Public,
            kind: TypeKind::Class,
            is_abstract: false,
            nested: false,
            line,
            public_methods: Default::default(),
            public_fields: Default::default(),
        }
    }

    #[test]
    fn test_limits_are_exclusive() {
        let facts = FileFacts {
            methods: vec![method("ok", 5, (10, 59), 10)],
            ..Default::default()
        };
        assert!(check_file(&facts, &FileRuleConfig::default()).is_empty());
    }

    #[test]
    fn test_method_rules_fire() {
        let facts = FileFacts {
            methods: vec![method("big", 6, (10, 60), 11)],
            ..Default::default()
        };
        let issues = check_file(&facts, &FileRuleConfig::default());
        let codes: Vec<_> = issues.iter().map(|i| i.code).collect();

        assert_eq!(
            codes,
            vec![
                IssueCode::HighComplexity,
                IssueCode::LongMethod,
                IssueCode::TooManyParameters
            ]
        );
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].message.contains("Svc.big"));
        assert!(issues.iter().all(|i| i.line == 10));
    }

    #[test]
    fn test_empty_catch_and_naming() {
        let facts = FileFacts {
            types: vec![type_named("helper", 1), type_named("Good", 20)],
            empty_catch_lines: vec![7],
            ..Default::default()
        };
        let issues = check_file(&facts, &FileRuleConfig::default());

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].code, IssueCode::TypeNaming);
        assert_eq!(issues[0].line, 1);
        assert_eq!(issues[1].code, IssueCode::EmptyCatchBlock);
        assert_eq!(issues[1].line, 7);
    }
}
