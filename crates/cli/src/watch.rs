//! Watch mode for `generate`.
//!
//! Schema directories are watched with `notify`; bursts of events are
//! debounced and each settled burst triggers one regeneration.

use crate::commands::common::CommandContext;
use crate::commands::generate::{display_path, generate_once, Target};
use crate::project::ResolverProject;
use crate::{ExitCode, OutputOptions};
use anyhow::{Context, Result};
use colored::Colorize;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

/// Debounce duration for file changes (milliseconds)
const DEBOUNCE_MS: u64 = 100;

/// Regenerates a project's declarations whenever its schema changes.
pub struct SchemaWatcher {
    project: ResolverProject,
    target: Target,
    output_opts: OutputOptions,
    config_path: PathBuf,
    watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_paths: BTreeSet<PathBuf>,
}

impl SchemaWatcher {
    pub fn new(
        ctx: &CommandContext,
        project: ResolverProject,
        target: Target,
        output_opts: OutputOptions,
    ) -> Result<Self> {
        let watch_paths = collect_watch_paths(&project.schema_patterns, &project.base_dir);

        let (tx, rx) = mpsc::channel();
        let watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .context("Failed to create file watcher")?;

        Ok(Self {
            project,
            target,
            output_opts,
            config_path: ctx.config_path.clone(),
            watcher,
            rx,
            watch_paths,
        })
    }

    /// Start watching for file changes
    pub fn start(&mut self) -> Result<()> {
        for path in &self.watch_paths {
            tracing::debug!(path = %path.display(), "Watching directory");
            self.watcher
                .watch(path, RecursiveMode::Recursive)
                .with_context(|| format!("Failed to watch path: {}", path.display()))?;
        }
        Ok(())
    }

    /// Generate once, then again after every settled burst of schema
    /// changes. Returns when the event channel closes.
    pub fn run(&mut self) -> Result<()> {
        self.print_header();
        self.regenerate(&[]);

        let mut pending_changes: HashSet<PathBuf> = HashSet::new();
        let mut last_change_time: Option<Instant> = None;

        loop {
            let timeout = if last_change_time.is_some() {
                Duration::from_millis(DEBOUNCE_MS)
            } else {
                Duration::from_secs(60)
            };

            match self.rx.recv_timeout(timeout) {
                Ok(Ok(event)) => {
                    for path in event.paths {
                        if is_relevant_file(&path) {
                            pending_changes.insert(path);
                            last_change_time = Some(Instant::now());
                        }
                    }
                }
                Ok(Err(e)) => {
                    eprintln!("{} {}", "Watch error:".red(), e);
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    let settled = last_change_time
                        .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS));
                    if settled && !pending_changes.is_empty() {
                        let mut changed: Vec<PathBuf> = pending_changes.drain().collect();
                        changed.sort();
                        last_change_time = None;
                        self.regenerate(&changed);
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(())
    }

    fn regenerate(&self, changed: &[PathBuf]) {
        let timestamp = format!("[{}]", clock_now()).dimmed();

        if self.output_opts.show_info {
            for file in changed {
                println!(
                    "{} {} changed",
                    timestamp,
                    display_path(file, &self.project.base_dir).cyan()
                );
            }
        }

        let code = generate_once(&self.project, &self.target, self.output_opts);
        if code != ExitCode::Success {
            eprintln!(
                "{} {}",
                timestamp,
                "Waiting for the schema to be fixed...".yellow()
            );
        }
    }

    fn print_header(&self) {
        if !self.output_opts.show_info {
            return;
        }
        println!();
        println!(
            "{} Watching for changes... (press {} to stop)",
            "●".cyan(),
            "Ctrl+C".bold()
        );
        println!(
            "  Project {} from {}",
            self.project.name.cyan(),
            self.config_path.display()
        );
        println!();
    }
}

/// Directories to watch so every schema pattern is covered.
fn collect_watch_paths(patterns: &[PathBuf], base_dir: &Path) -> BTreeSet<PathBuf> {
    let mut paths: BTreeSet<PathBuf> = patterns.iter().filter_map(|p| watch_root(p)).collect();
    if paths.is_empty() {
        paths.insert(base_dir.to_path_buf());
    }
    paths
}

/// The deepest existing directory above the literal prefix of `pattern`.
fn watch_root(pattern: &Path) -> Option<PathBuf> {
    let text = pattern.to_string_lossy();
    let literal = text.split(['*', '?', '[']).next().unwrap_or_default();

    let mut dir = PathBuf::from(literal);
    loop {
        if dir.is_dir() {
            return Some(dir);
        }
        if !dir.pop() {
            return None;
        }
    }
}

fn is_relevant_file(path: &Path) -> bool {
    let extension = path.extension().and_then(|e| e.to_str());
    matches!(extension, Some("graphql" | "gql" | "graphqls"))
}

/// Wall-clock time of day (UTC) as `HH:MM:SS`.
fn clock_now() -> String {
    use std::time::SystemTime;
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        (secs / 3600) % 24,
        (secs / 60) % 60,
        secs % 60
    )
}
