use anyhow::{Context, bail};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Files touched by the change under review, in the order git reports them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangedFiles {
    pub created: Vec<String>,
    pub modified: Vec<String>,
}

impl ChangedFiles {
    /// Created files first, then modified files; duplicates are kept
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.created.iter().chain(self.modified.iter())
    }
}

/// Represents the base reference for git operations
#[derive(Debug, PartialEq)]
pub enum Base {
    /// Every tracked file counts as created
    Root,
    /// Changes against a specific commit
    Commit(String),
}

impl Base {
    /// Parse a base string into a Base enum
    ///
    /// - Empty string: auto-detect HEAD or ^ based on uncommitted changes
    /// - "ROOT": all files
    /// - "^" or "~": relative to HEAD
    /// - Otherwise: commit hash or reference
    pub fn parse(diff_base: &str) -> Self {
        let base = if diff_base.is_empty() {
            debug!("Base is empty, checking for uncommitted changes");
            let has_uncommitted = Command::new("git")
                .args(["diff", "--quiet", "HEAD"])
                .status()
                .map(|s| !s.success())
                .unwrap_or(false);
            let detected = if has_uncommitted { "HEAD" } else { "^" };
            debug!("Auto-detected base: {}", detected);
            detected
        } else {
            diff_base
        };

        Self::from_resolved(base)
    }

    fn from_resolved(base: &str) -> Self {
        if base == "ROOT" {
            Self::Root
        } else if base.starts_with('~') || base.starts_with('^') {
            Self::Commit(format!("HEAD{}", base))
        } else {
            Self::Commit(base.to_string())
        }
    }
}

/// Collect created and modified files for `base` from the git repository at `repo`
///
/// Renames are reported as created files under their new path.
pub fn get_changed_files(repo: &Path, base: &Base) -> anyhow::Result<ChangedFiles> {
    match base {
        Base::Root => Ok(ChangedFiles {
            created: git_paths(repo, &["ls-files", "-z"])?,
            modified: vec![],
        }),
        Base::Commit(commit) => {
            let diff = |filter: &str| {
                git_paths(
                    repo,
                    &["diff", "--name-only", "-z", "--no-renames", filter, commit.as_str()],
                )
            };
            Ok(ChangedFiles {
                created: diff("--diff-filter=A")?,
                modified: diff("--diff-filter=M")?,
            })
        }
    }
}

/// Run git and split its NUL-terminated (`-z`, unquoted) path output
fn git_paths(repo: &Path, args: &[&str]) -> anyhow::Result<Vec<String>> {
    let output = Command::new("git")
        .current_dir(repo)
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;

    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .split('\0')
        .filter(|p| !p.is_empty())
        .map(|s| s.to_string())
        .collect())
}

/// Supplies the absolute path violations are made relative to
pub trait CurrentPathProvider {
    fn current_path(&self) -> String;
}

/// Uses the process working directory
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkingDirectory;

impl CurrentPathProvider for WorkingDirectory {
    fn current_path(&self) -> String {
        path_or_empty(std::env::current_dir())
    }
}

fn path_or_empty(current_dir: std::io::Result<PathBuf>) -> String {
    match current_dir {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(e) => {
            warn!("Failed to read working directory, paths stay absolute: {}", e);
            String::new()
        }
    }
}
