use crate::{ConfigError, GraphQLConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Recognised config file names, most preferred first.
const CONFIG_FILES: [&str; 7] = [
    ".graphqlrc.yml",
    ".graphqlrc.yaml",
    ".graphqlrc.json",
    ".graphqlrc",
    "graphql.config.yml",
    "graphql.config.yaml",
    "graphql.config.json",
];

enum Format {
    Yaml,
    Json,
    /// Extensionless `.graphqlrc`: YAML, else JSON
    Either,
}

impl Format {
    fn detect(path: &Path) -> Option<Self> {
        let extension = path.extension().and_then(|ext| ext.to_str());
        let file_name = path.file_name().and_then(|name| name.to_str());
        match (extension, file_name) {
            (Some("yml" | "yaml"), _) => Some(Self::Yaml),
            (Some("json"), _) => Some(Self::Json),
            (None, Some(".graphqlrc")) => Some(Self::Either),
            _ => None,
        }
    }
}

/// The nearest config file in `start_dir` or one of its ancestors.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let found = start_dir.ancestors().find_map(|dir| {
        tracing::trace!(dir = %dir.display(), "Looking for config");
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    });

    match &found {
        Some(path) => tracing::debug!(path = %path.display(), "Found config file"),
        None => tracing::debug!("No config file found"),
    }
    Ok(found)
}

/// Read and validate the config at `path`; the format follows the file name.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<GraphQLConfig> {
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::debug!(projects = config.project_count(), "Config loaded");
    Ok(config)
}

/// Parse and validate config text. `path` picks the format and labels
/// errors; it is never read.
#[tracing::instrument(skip(contents), fields(path = %path.display()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    let config = match Format::detect(path) {
        Some(Format::Yaml) => parse_yaml(contents, path)?,
        Some(Format::Json) => parse_json(contents, path)?,
        Some(Format::Either) => {
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        None => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;
    Ok(config)
}

/// Locate and load the config: `explicit` when given, otherwise the first
/// config found walking up from `start_dir`.
pub fn resolve_config(explicit: Option<&Path>, start_dir: &Path) -> Result<(PathBuf, GraphQLConfig)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => find_config(start_dir)?.ok_or_else(|| ConfigError::NotFound(start_dir.to_path_buf()))?,
    };
    let config = load_config(&path)?;
    Ok((path, config))
}

fn parse_yaml(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

#[tracing::instrument(skip(config, path), fields(path = %path.display(), projects = config.project_count()))]
fn validate_config(config: &GraphQLConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    for (project_name, project_config) in config.projects() {
        tracing::trace!(project = project_name, "Validating project config");

        let schema_paths = project_config.schema.paths();
        if schema_paths.is_empty() {
            return Err(invalid(format!(
                "Project '{project_name}' has empty schema configuration"
            )));
        }
        if schema_paths.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid(format!(
                "Project '{project_name}' has empty schema path"
            )));
        }

        let resolvers = project_config
            .resolvers()
            .map_err(|e| invalid(format!("Project '{project_name}' has invalid resolvers settings: {e}")))?
            .ok_or_else(|| {
                invalid(format!(
                    "Project '{project_name}' is missing extensions.resolvers"
                ))
            })?;

        if resolvers.output.trim().is_empty() {
            return Err(invalid(format!(
                "Project '{project_name}' has empty resolvers output path"
            )));
        }
        if let Some((type_name, _)) = resolvers
            .models
            .iter()
            .find(|(_, model)| model.trim().is_empty())
        {
            return Err(invalid(format!(
                "Project '{project_name}' binds '{type_name}' to an empty model name"
            )));
        }
    }

    tracing::debug!("Config validation passed");
    Ok(())
}
