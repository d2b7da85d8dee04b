pub mod orchestrator;
pub mod render;
pub mod worker;

/// File extension of the linted language
pub const SWIFT_EXTENSION: &str = ".swift";

/// Default SwiftLint executable, resolved through PATH
pub const DEFAULT_SWIFTLINT_PATH: &str = "swiftlint";

/// Parameters of one lint run
#[derive(Debug, Clone, PartialEq)]
pub struct LintOptions {
    /// Report each violation as an inline annotation instead of a markdown summary
    pub inline: bool,
    /// Only lint files under this directory (bulk mode: the directory SwiftLint walks)
    pub directory: Option<String>,
    /// SwiftLint configuration file passed through `--config`
    pub config_file: Option<String>,
    /// Let SwiftLint walk the directory itself instead of linting changed files
    pub lint_all_files: bool,
    /// SwiftLint executable name or path
    pub swiftlint_path: String,
    /// Only files ending with this suffix are linted in incremental mode
    pub extension: String,
    /// Glob patterns excluded from incremental mode
    pub exclude: Vec<String>,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            inline: false,
            directory: None,
            config_file: None,
            lint_all_files: false,
            swiftlint_path: DEFAULT_SWIFTLINT_PATH.to_string(),
            extension: SWIFT_EXTENSION.to_string(),
            exclude: vec![],
        }
    }
}
