use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Name given to the project of a single-project config.
pub const DEFAULT_PROJECT: &str = "default";

/// Top-level GraphQL configuration.
/// Either a single project or multiple named projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphQLConfig {
    /// Multi-project configuration
    Multi {
        projects: BTreeMap<String, ProjectConfig>,
    },
    /// Single project configuration (boxed to reduce enum size)
    Single(Box<ProjectConfig>),
}

impl GraphQLConfig {
    /// Get all projects as an iterator, ordered by name.
    /// For single project configs, yields a single item with name "default".
    #[must_use]
    pub fn projects(&self) -> Box<dyn Iterator<Item = (&str, &ProjectConfig)> + '_> {
        match self {
            Self::Single(config) => Box::new(std::iter::once((DEFAULT_PROJECT, config.as_ref()))),
            Self::Multi { projects } => Box::new(
                projects
                    .iter()
                    .map(|(name, config)| (name.as_str(), config)),
            ),
        }
    }

    /// Get a specific project by name.
    /// For single project configs, returns the project if name is "default".
    #[must_use]
    pub fn get_project(&self, name: &str) -> Option<&ProjectConfig> {
        match self {
            Self::Single(config) if name == DEFAULT_PROJECT => Some(config.as_ref()),
            Self::Single(_) => None,
            Self::Multi { projects } => projects.get(name),
        }
    }

    /// Check if this is a multi-project configuration
    #[must_use]
    pub const fn is_multi_project(&self) -> bool {
        matches!(self, Self::Multi { .. })
    }

    /// Get the number of projects
    #[must_use]
    pub fn project_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi { projects } => projects.len(),
        }
    }

    /// Pick the project to generate for.
    ///
    /// Without a name, a config holding exactly one project selects it and
    /// a multi-project config falls back to its `default` project; anything
    /// else needs an explicit name.
    pub fn select_project(&self, name: Option<&str>) -> Result<(&str, &ProjectConfig)> {
        let available = || self.projects().map(|(n, _)| n.to_string()).collect();
        let find = |wanted: &str| self.projects().find(|(candidate, _)| *candidate == wanted);

        match name {
            Some(name) => find(name).ok_or_else(|| ConfigError::UnknownProject {
                name: name.to_string(),
                available: available(),
            }),
            None if self.project_count() == 1 => {
                self.projects()
                    .next()
                    .ok_or_else(|| ConfigError::ProjectRequired {
                        available: Vec::new(),
                    })
            }
            None => find(DEFAULT_PROJECT).ok_or_else(|| ConfigError::ProjectRequired {
                available: available(),
            }),
        }
    }
}

/// Configuration for a single GraphQL project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Schema source(s)
    pub schema: SchemaConfig,

    /// Tool-specific extensions (includes resolver generation settings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<HashMap<String, serde_json::Value>>,
}

impl ProjectConfig {
    /// Get the resolver generation settings from extensions.
    ///
    /// Settings are specified under `extensions.resolvers`:
    /// ```yaml
    /// extensions:
    ///   resolvers:
    ///     output: src/generated/resolvers.ts
    ///     context: Context
    ///     contextModule: ./context
    ///     models:
    ///       User: UserModel
    ///     modelsModule: ./models
    /// ```
    ///
    /// Returns `Ok(None)` when the extension is absent and an error when it
    /// is present but malformed.
    pub fn resolvers(&self) -> std::result::Result<Option<ResolversConfig>, serde_json::Error> {
        let Some(value) = self.extensions.as_ref().and_then(|ext| ext.get("resolvers")) else {
            return Ok(None);
        };
        serde_json::from_value(value.clone()).map(Some)
    }

    /// Schema paths or globs, resolved against `base_dir` when relative.
    #[must_use]
    pub fn schema_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.schema
            .paths()
            .into_iter()
            .map(|path| base_dir.join(path))
            .collect()
    }
}

/// Schema source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaConfig {
    /// Single file path or glob pattern
    Path(String),
    /// Multiple file paths or glob patterns
    Paths(Vec<String>),
}

impl SchemaConfig {
    /// Get all schema paths/patterns
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::Path(path) => vec![path.as_str()],
            Self::Paths(paths) => paths.iter().map(String::as_str).collect(),
        }
    }
}

/// Settings for resolver type generation, read from `extensions.resolvers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolversConfig {
    /// Generated TypeScript file, relative to the config file
    pub output: String,

    /// Context type name used in every resolver signature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Module the context type is imported from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_module: Option<String>,

    /// Schema type name to backing model name
    #[serde(default)]
    pub models: BTreeMap<String, String>,

    /// Module the model names are imported from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models_module: Option<String>,

    /// Emit pass-through resolvers for bound objects
    #[serde(default)]
    pub default_resolvers: bool,

    /// Custom scalar name to TypeScript type
    #[serde(default)]
    pub scalars: BTreeMap<String, String>,

    /// Format the generated file (default: true)
    #[serde(default = "default_format")]
    pub format: bool,
}

const fn default_format() -> bool {
    true
}

impl ResolversConfig {
    /// Output path, resolved against `base_dir` when relative.
    #[must_use]
    pub fn output_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.output)
    }
}
