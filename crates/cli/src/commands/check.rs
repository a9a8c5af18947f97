use crate::commands::common::{fail, report_warnings, CommandContext};
use crate::commands::generate::display_path;
use crate::{ExitCode, OutputOptions};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// State of the generated file on disk relative to a fresh generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    UpToDate,
    Missing,
    Stale,
}

/// Compare freshly generated code with what is on disk.
#[must_use]
pub fn compare(generated: &str, on_disk: Option<&str>) -> Freshness {
    match on_disk {
        None => Freshness::Missing,
        Some(existing) if existing == generated => Freshness::UpToDate,
        Some(_) => Freshness::Stale,
    }
}

fn read_existing(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

#[tracing::instrument(skip(config_path, output_opts), fields(project = ?project_name))]
pub fn run(
    config_path: Option<&Path>,
    project_name: Option<&str>,
    output_opts: OutputOptions,
) -> Result<ExitCode> {
    let (_ctx, project) = CommandContext::load_project(config_path, project_name);
    let output_path = project.output_path();
    let shown = display_path(&output_path, &project.base_dir);

    let generation = project
        .generate()
        .unwrap_or_else(|e| fail(ExitCode::SchemaError, &e));
    report_warnings(&generation);

    let existing = read_existing(&output_path).unwrap_or_else(|e| fail(ExitCode::IoError, &e));

    match compare(&generation.output.code, existing.as_deref()) {
        Freshness::UpToDate => {
            if output_opts.show_info {
                println!("{} {} is up to date", "✓".green().bold(), shown.cyan());
            }
            Ok(ExitCode::Success)
        }
        Freshness::Missing => {
            eprintln!(
                "{} {} does not exist; run `graphql generate`",
                "✗".red().bold(),
                shown.cyan()
            );
            Ok(ExitCode::StaleOutput)
        }
        Freshness::Stale => {
            eprintln!(
                "{} {} is out of date; run `graphql generate`",
                "✗".red().bold(),
                shown.cyan()
            );
            Ok(ExitCode::StaleOutput)
        }
    }
}
