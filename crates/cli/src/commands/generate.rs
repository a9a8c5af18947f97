use crate::commands::common::{fail, report_warnings, CommandContext};
use crate::project::{write_output, ResolverProject};
use crate::watch::SchemaWatcher;
use crate::{ExitCode, OutputOptions};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Where generated declarations go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Stdout,
    File(PathBuf),
}

impl Target {
    /// `--stdout` wins, then `--output`, then the configured output.
    fn select(project: &ResolverProject, output: Option<PathBuf>, stdout: bool) -> Self {
        if stdout {
            Self::Stdout
        } else {
            Self::File(output.unwrap_or_else(|| project.output_path()))
        }
    }
}

#[tracing::instrument(skip(config_path, output, output_opts), fields(project = ?project_name))]
pub fn run(
    config_path: Option<&Path>,
    project_name: Option<&str>,
    output: Option<PathBuf>,
    stdout: bool,
    watch: bool,
    output_opts: OutputOptions,
) -> Result<ExitCode> {
    let (ctx, project) = CommandContext::load_project(config_path, project_name);
    let target = Target::select(&project, output, stdout);

    if watch {
        let mut watcher = SchemaWatcher::new(&ctx, project, target, output_opts)
            .unwrap_or_else(|e| fail(ExitCode::IoError, &e));
        watcher.start().unwrap_or_else(|e| fail(ExitCode::IoError, &e));
        watcher.run()?;
        return Ok(ExitCode::Success);
    }

    Ok(generate_once(&project, &target, output_opts))
}

/// Generate and write once, printing the outcome.
///
/// Failures are reported rather than propagated so watch mode can keep
/// going after a bad edit.
pub fn generate_once(
    project: &ResolverProject,
    target: &Target,
    output_opts: OutputOptions,
) -> ExitCode {
    let start = Instant::now();

    let generation = match project.generate() {
        Ok(generation) => generation,
        Err(e) => {
            eprintln!("{} {:#}", "✗ Failed to generate resolver types:".red(), e);
            return ExitCode::SchemaError;
        }
    };
    report_warnings(&generation);

    match target {
        Target::Stdout => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(generation.output.code.as_bytes()) {
                eprintln!("{} {}", "✗ Failed to write to stdout:".red(), e);
                return ExitCode::IoError;
            }
        }
        Target::File(path) => {
            if let Err(e) = write_output(path, &generation.output.code) {
                eprintln!("{} {:#}", "✗ Failed to write output:".red(), e);
                return ExitCode::IoError;
            }
            if output_opts.show_info {
                println!(
                    "{} {} {}",
                    "✓ Generated".green().bold(),
                    display_path(path, &project.base_dir).cyan(),
                    format!("({:.2}s)", start.elapsed().as_secs_f64()).dimmed()
                );
            }
        }
    }

    tracing::info!(project = %project.name, "Generation finished");
    ExitCode::Success
}

/// `path` relative to `base_dir` when it lies beneath it.
pub fn display_path(path: &Path, base_dir: &Path) -> String {
    path.strip_prefix(base_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
