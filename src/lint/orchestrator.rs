use super::{LintOptions, render, worker};
use crate::report::ReportSink;
use crate::shell::ShellExecutor;
use crate::types::Violation;
use crate::util::{ChangedFiles, CurrentPathProvider};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{info, trace, warn};

/// Lint the change and report the result
///
/// This function drives one complete run:
/// - Selects the files to lint, or lets SwiftLint walk the directory in bulk mode
/// - Runs SwiftLint once per unit of work, one at a time
/// - Rewrites violation paths relative to the current path
/// - Posts the violations inline or as a markdown summary
///
/// Returns the normalized violations in the order SwiftLint reported them.
pub fn lint(
    options: &LintOptions,
    changes: &ChangedFiles,
    executor: &dyn ShellExecutor,
    current_path: &dyn CurrentPathProvider,
    sink: &dyn ReportSink,
) -> Vec<Violation> {
    let current_path = current_path.current_path();
    info!("Working directory: {}", current_path);

    let violations = if options.lint_all_files {
        info!("Linting all files");
        worker::run_unit(executor, &options.swiftlint_path, &bulk_arguments(options), sink)
    } else {
        let files = select_files(changes, options);
        info!("Linting {} changed files", files.len());
        files
            .iter()
            .flat_map(|file| {
                worker::run_unit(
                    executor,
                    &options.swiftlint_path,
                    &file_arguments(file, options),
                    sink,
                )
            })
            .collect()
    };

    let violations: Vec<Violation> = violations
        .into_iter()
        .map(|v| v.relative_to(&current_path))
        .collect();
    info!("Found {} violations", violations.len());

    render::report(&violations, options.inline, sink);
    violations
}

/// Arguments for a single SwiftLint run over the whole directory
pub fn bulk_arguments(options: &LintOptions) -> Vec<String> {
    let mut arguments = vec![
        "lint".to_string(),
        "--quiet".to_string(),
        "--reporter json".to_string(),
    ];
    if let Some(directory) = &options.directory {
        arguments.push(format!("--path {}", directory));
    }
    if let Some(config_file) = &options.config_file {
        arguments.push(format!("--config {}", config_file));
    }
    arguments
}

/// Arguments for linting one file
pub fn file_arguments(file: &str, options: &LintOptions) -> Vec<String> {
    let mut arguments = vec![
        "lint".to_string(),
        "--quiet".to_string(),
        format!("--path {}", file),
        "--reporter json".to_string(),
    ];
    if let Some(config_file) = &options.config_file {
        arguments.push(format!("--config {}", config_file));
    }
    arguments
}

/// Changed files to lint, in created-then-modified order
///
/// Keeps files under `directory` (when set) with the target extension,
/// minus anything matching an `exclude` pattern.
pub fn select_files(changes: &ChangedFiles, options: &LintOptions) -> Vec<String> {
    let exclude = build_globset(&options.exclude);

    changes
        .all()
        .filter(|f| match &options.directory {
            Some(directory) => f.starts_with(directory.as_str()),
            None => true,
        })
        .filter(|f| f.ends_with(options.extension.as_str()))
        .filter(|f| {
            let excluded = exclude.as_ref().is_some_and(|gs| gs.is_match(f.as_str()));
            if excluded {
                trace!("Excluded {}", f);
            }
            !excluded
        })
        .cloned()
        .collect()
}

fn build_globset(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => warn!("Invalid exclude pattern '{}': {}", pattern, e),
        }
    }
    match builder.build() {
        Ok(gs) => Some(gs),
        Err(e) => {
            warn!("Failed to build exclude globset: {}", e);
            None
        }
    }
}
