use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config at {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("no GraphQL config found in {} or any parent directory", .0.display())]
    NotFound(PathBuf),

    #[error("project '{name}' not found (available: {})", available.join(", "))]
    UnknownProject { name: String, available: Vec<String> },

    #[error("config has {} projects and none was selected (available: {})", available.len(), available.join(", "))]
    ProjectRequired { available: Vec<String> },
}
