mod commands;
mod exit_code;
mod project;
mod watch;

use clap::{Parser, Subcommand};
use exit_code::ExitCode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graphql")]
#[command(about = "Generate TypeScript resolver types from a GraphQL schema", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to GraphQL config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Project name (for multi-project configs)
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors and warnings
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate resolver type declarations
    Generate {
        /// Write to this file instead of the configured output
        #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the generated declarations instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Watch mode - regenerate on schema changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Verify the generated file on disk is up to date
    ///
    /// Generates in memory and compares with the configured output file.
    /// Exits with code 1 when the file is missing or stale. Intended for CI.
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_info: !cli.quiet,
    };

    let code = match cli.command {
        Commands::Generate {
            output,
            stdout,
            watch,
        } => commands::generate::run(
            cli.config.as_deref(),
            cli.project.as_deref(),
            output,
            stdout,
            watch,
            output_opts,
        )?,
        Commands::Check => {
            commands::check::run(cli.config.as_deref(), cli.project.as_deref(), output_opts)?
        }
    };

    if code != ExitCode::Success {
        code.exit();
    }
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (off by default) so stdout stays
/// clean for `generate --stdout`.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Apply `--color`/`--no-color`, then the `NO_COLOR` and `CLICOLOR`
/// conventions (<https://no-color.org/>, <https://bixense.com/clicolors/>).
/// Without any of them `colored` falls back to TTY detection.
fn configure_colors(force_color: bool, no_color: bool) {
    let env = |name: &str| std::env::var_os(name).map(|v| v.to_string_lossy().into_owned());
    if let Some(enabled) = color_override(force_color, no_color, env) {
        colored::control::set_override(enabled);
    }
}

/// Forced color state, highest priority first: flags, `NO_COLOR` (any
/// value), `CLICOLOR_FORCE` (non-empty, non-zero), `CLICOLOR=0`.
fn color_override(
    force_color: bool,
    no_color: bool,
    env: impl Fn(&str) -> Option<String>,
) -> Option<bool> {
    if force_color {
        return Some(true);
    }
    if no_color || env("NO_COLOR").is_some() {
        return Some(false);
    }
    match env("CLICOLOR_FORCE") {
        Some(force) if !force.is_empty() && force != "0" => Some(true),
        Some(_) => None,
        None => (env("CLICOLOR").as_deref() == Some("0")).then_some(false),
    }
}

#[cfg(test)]
mod tests {
    use super::color_override;

    fn with_env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn test_color_override_priority() {
        let cases: &[(bool, bool, &[(&str, &str)], Option<bool>)] = &[
            (false, false, &[], None),
            (true, false, &[], Some(true)),
            (false, true, &[], Some(false)),
            (true, false, &[("NO_COLOR", "1")], Some(true)),
            (false, false, &[("NO_COLOR", "1")], Some(false)),
            (false, false, &[("NO_COLOR", "")], Some(false)),
            (false, false, &[("CLICOLOR_FORCE", "1")], Some(true)),
            (false, false, &[("CLICOLOR_FORCE", "0")], None),
            (false, false, &[("CLICOLOR", "0")], Some(false)),
            (false, false, &[("CLICOLOR", "1")], None),
            (
                false,
                false,
                &[("NO_COLOR", "1"), ("CLICOLOR_FORCE", "1")],
                Some(false),
            ),
        ];

        for (force, no_color, vars, expected) in cases {
            assert_eq!(
                color_override(*force, *no_color, with_env(vars)),
                *expected,
                "force={force} no_color={no_color} env={vars:?}"
            );
        }
    }
}
