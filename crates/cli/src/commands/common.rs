use crate::project::{Generation, ResolverProject};
use crate::ExitCode;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_config::{ConfigError, GraphQLConfig};
use std::path::{Path, PathBuf};

/// Config loaded for one command invocation.
pub struct CommandContext {
    pub config: GraphQLConfig,
    pub config_path: PathBuf,
    /// Directory relative paths in the config are resolved against
    pub base_dir: PathBuf,
}

impl CommandContext {
    /// Load the config at `config_path`, or search upward from the current
    /// directory.
    #[tracing::instrument(skip_all)]
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let (config_path, config) = graphql_config::resolve_config(config_path, &cwd)?;

        let base_dir = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| cwd.clone(), Path::to_path_buf);

        tracing::debug!(
            config = %config_path.display(),
            base_dir = %base_dir.display(),
            "Loaded config"
        );

        Ok(Self {
            config,
            config_path,
            base_dir,
        })
    }

    /// The project selected by `--project`, or the only project.
    pub fn project(&self, name: Option<&str>) -> Result<ResolverProject> {
        let (name, project) = self.config.select_project(name).map_err(|error| {
            let hint = if matches!(error, ConfigError::ProjectRequired { .. }) {
                "; pass --project <NAME>"
            } else {
                ""
            };
            anyhow::anyhow!("{error}{hint}")
        })?;
        ResolverProject::from_config(name, project, &self.base_dir)
    }

    /// Load config and project, exiting with a config error on failure.
    pub fn load_project(
        config_path: Option<&Path>,
        project_name: Option<&str>,
    ) -> (Self, ResolverProject) {
        let ctx = Self::load(config_path).unwrap_or_else(|e| fail(ExitCode::ConfigError, &e));
        let project = ctx
            .project(project_name)
            .unwrap_or_else(|e| fail(ExitCode::ConfigError, &e));
        (ctx, project)
    }
}

/// Print `err` and exit with `code`.
pub fn fail(code: ExitCode, err: &anyhow::Error) -> ! {
    eprintln!("{} {:#}", format!("✗ {}:", capitalize(&code.to_string())).red(), err);
    code.exit()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// Print binding and formatting warnings to stderr.
///
/// Warnings never change the exit code.
pub fn report_warnings(generation: &Generation) {
    for warning in &generation.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    for diagnostic in &generation.output.diagnostics {
        eprintln!(
            "{} output left unformatted: {}",
            "warning:".yellow().bold(),
            diagnostic
        );
    }
}
