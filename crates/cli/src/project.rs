//! One configured project: where its schema lives, how to generate, where
//! to write.

use anyhow::{bail, Context, Result};
use graphql_codegen::{GenerateOptions, GeneratedOutput};
use graphql_config::{binding_warnings, BindingWarning, ProjectConfig, ResolversConfig};
use graphql_hir::{GraphError, SchemaGraph};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ResolverProject {
    pub name: String,
    pub schema_patterns: Vec<PathBuf>,
    pub resolvers: ResolversConfig,
    pub base_dir: PathBuf,
}

/// Generated text plus everything worth telling the user about it.
#[derive(Debug)]
pub struct Generation {
    pub output: GeneratedOutput,
    pub warnings: Vec<BindingWarning>,
}

impl ResolverProject {
    pub fn from_config(name: &str, project: &ProjectConfig, base_dir: &Path) -> Result<Self> {
        let resolvers = project
            .resolvers()
            .with_context(|| format!("Project '{name}' has invalid extensions.resolvers"))?
            .with_context(|| format!("Project '{name}' is missing extensions.resolvers"))?;

        Ok(Self {
            name: name.to_string(),
            schema_patterns: project.schema_paths(base_dir),
            resolvers,
            base_dir: base_dir.to_path_buf(),
        })
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.resolvers.output_path(&self.base_dir)
    }

    #[must_use]
    pub fn options(&self) -> GenerateOptions {
        let resolvers = &self.resolvers;
        GenerateOptions {
            models: resolvers.models.clone().into_iter().collect(),
            models_module: resolvers.models_module.clone(),
            context_type: resolvers.context.clone(),
            context_module: resolvers.context_module.clone(),
            default_resolvers: resolvers.default_resolvers,
            scalars: resolvers.scalars.clone(),
            format: resolvers.format,
        }
    }

    /// Expand every schema pattern, keeping first-seen order.
    ///
    /// A pattern matching no file is an error.
    pub fn schema_files(&self) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for pattern in &self.schema_patterns {
            let pattern = pattern.to_string_lossy();
            let matches: Vec<PathBuf> = glob::glob(&pattern)
                .with_context(|| format!("Invalid schema pattern: {pattern}"))?
                .filter_map(std::result::Result::ok)
                .filter(|path| path.is_file())
                .collect();

            if matches.is_empty() {
                bail!("No schema files match {pattern}");
            }
            files.extend(matches.into_iter().filter(|path| seen.insert(path.clone())));
        }

        tracing::debug!(project = %self.name, count = files.len(), "Resolved schema files");
        Ok(files)
    }

    #[tracing::instrument(skip(self), fields(project = %self.name))]
    pub fn load_graph(&self) -> Result<SchemaGraph> {
        let sources = self
            .schema_files()?
            .into_iter()
            .map(|path| {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read schema file: {}", path.display()))?;
                Ok((path, text))
            })
            .collect::<Result<Vec<_>>>()?;

        SchemaGraph::parse(sources).map_err(|error| match error {
            GraphError::Invalid { diagnostics } => {
                let details: Vec<String> = diagnostics.iter().map(|d| format!("  {d}")).collect();
                anyhow::anyhow!(
                    "Schema has {} error(s):\n{}",
                    diagnostics.len(),
                    details.join("\n")
                )
            }
            other => anyhow::Error::new(other),
        })
    }

    /// Load the schema and generate its resolver declarations.
    ///
    /// Model binding mismatches are logged up front and returned alongside
    /// the output; they never stop generation.
    pub fn generate(&self) -> Result<Generation> {
        let graph = self.load_graph()?;
        let roots = graph.roots();
        let warnings = binding_warnings(&self.resolvers, graph.resolvable_type_names(), |name| {
            roots.contains(name)
        });
        let output = graphql_codegen::generate(&graph, &self.options())
            .context("Failed to generate resolver types")?;
        Ok(Generation { output, warnings })
    }
}

/// Write `code` to `path`, creating parent directories.
pub fn write_output(path: &Path, code: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, code).with_context(|| format!("Failed to write {}", path.display()))
}
