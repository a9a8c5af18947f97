use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("schema has {count} error(s)", count = .diagnostics.len())]
    Invalid { diagnostics: Vec<SchemaDiagnostic> },

    #[error("type `{name}` referenced by `{referenced_by}` is not defined")]
    UnknownType { name: String, referenced_by: String },
}

/// A single build or validation problem reported by apollo-compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDiagnostic {
    /// Path of the source the problem was found in, when known
    pub path: Option<String>,
    /// 1-indexed line and column
    pub line_column: Option<(usize, usize)>,
    pub message: String,
}

impl fmt::Display for SchemaDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, self.line_column) {
            (Some(path), Some((line, column))) => {
                write!(f, "{path}:{line}:{column}: {}", self.message)
            }
            (Some(path), None) => write!(f, "{path}: {}", self.message),
            _ => f.write_str(&self.message),
        }
    }
}
