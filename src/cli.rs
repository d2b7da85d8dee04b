use clap::{Parser, Subcommand};

// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser)]
#[command(name = "swiftlint-review", version, about = "Run SwiftLint on changed files and report the violations", long_about = None)]
pub struct Cli {
    /// Log level (see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
    /// [env: SWIFTLINT_REVIEW_LOG=] [default: info]
    #[arg(
        long,
        env = "SWIFTLINT_REVIEW_LOG",
        default_value = "info",
        global = true,
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a default swiftlint-review.toml config file
    Init(InitArgs),
    /// Lint changed files and report violations
    Lint(LintArgs),
    /// Print the JSON schema of the config file
    Schema,
}

/// Arguments for the init command
#[derive(Parser)]
pub struct InitArgs {
    /// Path to config file
    #[arg(long, default_value = "swiftlint-review.toml")]
    pub config: String,

    /// Override existing config file
    #[arg(long)]
    pub r#override: bool,
}

/// Arguments for the lint command
#[derive(Parser, Debug)]
pub struct LintArgs {
    /// Path to config file (initialize with `swiftlint-review init`)
    #[arg(long, default_value = "swiftlint-review.toml")]
    pub config: String,

    /// Base commit to compare against.
    /// Examples: HEAD^ or ^, HEAD~1 or ~1, commit hash.
    /// HEAD for uncommitted changes, ROOT for all tracked files
    /// [default: HEAD if uncommitted changes exist, otherwise ^]
    #[arg(
        long,
        default_value = "",
        hide_default_value = true,
        verbatim_doc_comment
    )]
    pub base: String,

    /// Created files to lint instead of asking git (repeatable)
    #[arg(long)]
    pub created: Vec<String>,

    /// Modified files to lint instead of asking git (repeatable)
    #[arg(long)]
    pub modified: Vec<String>,

    /// Report each violation as an inline annotation instead of a markdown summary
    #[arg(long)]
    pub inline: bool,

    /// Only lint files under this directory
    #[arg(long)]
    pub directory: Option<String>,

    /// SwiftLint configuration file
    #[arg(long)]
    pub swiftlint_config: Option<String>,

    /// Lint every file in the directory instead of only changed files
    #[arg(long)]
    pub lint_all_files: bool,

    /// SwiftLint executable [default: swiftlint]
    #[arg(long, env = "SWIFTLINT_PATH")]
    pub swiftlint_path: Option<String>,

    /// Output file path (.md or .json)
    #[arg(long)]
    pub output: Option<String>,
}

impl LintArgs {
    /// Whether the changed files were given explicitly
    pub fn has_explicit_changes(&self) -> bool {
        !self.created.is_empty() || !self.modified.is_empty()
    }
}
