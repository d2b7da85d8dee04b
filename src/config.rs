use crate::cli::LintArgs;
use crate::lint::{DEFAULT_SWIFTLINT_PATH, LintOptions, SWIFT_EXTENSION};
use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Serialize, Debug, Default, PartialEq, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// How SwiftLint is run and reported
    pub swiftlint: SwiftLintConfig,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, JsonSchema)]
#[serde(default)]
pub struct SwiftLintConfig {
    /// SwiftLint executable name or path (default: "swiftlint")
    pub path: String,
    /// SwiftLint configuration file passed through --config (optional)
    pub config_file: Option<String>,
    /// Only lint changed files under this directory; with lint_all_files, the directory SwiftLint walks (optional)
    pub directory: Option<String>,
    /// Report violations as inline annotations instead of a markdown summary (default: false)
    pub inline: bool,
    /// Lint every file instead of only created and modified ones (default: false)
    pub lint_all_files: bool,
    /// Extension of the files to lint (default: ".swift")
    pub extension: String,
    /// Glob patterns of changed files to skip (default: [])
    pub exclude: Vec<String>,
}

impl Default for SwiftLintConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_SWIFTLINT_PATH.to_string(),
            config_file: None,
            directory: None,
            inline: false,
            lint_all_files: false,
            extension: SWIFT_EXTENSION.to_string(),
            exclude: vec![],
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it does not exist
    pub fn load(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            debug!("Config file {} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
        let config =
            toml::from_str(&content).with_context(|| format!("Failed to parse {}", path))?;
        Ok(config)
    }

    /// Render the default config file
    pub fn scaffold() -> anyhow::Result<String> {
        let body = toml::to_string_pretty(&Self::default())?;
        Ok(format!(
            "# swiftlint-review configuration. Run `swiftlint-review schema` for every field.\n\n{}",
            body
        ))
    }

    /// Merge command line flags over the file values
    pub fn resolve(self, args: &LintArgs) -> LintOptions {
        let swiftlint = self.swiftlint;
        LintOptions {
            inline: args.inline || swiftlint.inline,
            directory: args.directory.clone().or(swiftlint.directory),
            config_file: args.swiftlint_config.clone().or(swiftlint.config_file),
            lint_all_files: args.lint_all_files || swiftlint.lint_all_files,
            swiftlint_path: args.swiftlint_path.clone().unwrap_or(swiftlint.path),
            extension: swiftlint.extension,
            exclude: swiftlint.exclude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn lint_args(argv: &[&str]) -> LintArgs {
        let cli = Cli::parse_from(["swiftlint-review", "lint"].iter().chain(argv));
        match cli.command {
            Commands::Lint(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.resolve(&lint_args(&[])), LintOptions::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swiftlint-review.toml");
        fs::write(
            &path,
            r#"
[swiftlint]
inline = true
directory = "Sources"
exclude = ["Sources/Generated/**"]
"#,
        )
        .unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert!(config.swiftlint.inline);
        assert_eq!(config.swiftlint.directory.as_deref(), Some("Sources"));
        assert_eq!(config.swiftlint.path, "swiftlint");
        assert_eq!(config.swiftlint.extension, ".swift");
        assert_eq!(config.swiftlint.exclude, vec!["Sources/Generated/**"]);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[swiftlint]\ninline = \"yes\"\n").unwrap();
        let err = Config::load(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config {
            swiftlint: SwiftLintConfig {
                directory: Some("Sources".into()),
                config_file: Some(".swiftlint.yml".into()),
                ..Default::default()
            },
        };
        let args = lint_args(&[
            "--inline",
            "--directory",
            "Tests",
            "--swiftlint-path",
            "Pods/SwiftLint/swiftlint",
        ]);
        let options = config.resolve(&args);
        assert!(options.inline);
        assert!(!options.lint_all_files);
        assert_eq!(options.directory.as_deref(), Some("Tests"));
        assert_eq!(options.config_file.as_deref(), Some(".swiftlint.yml"));
        assert_eq!(options.swiftlint_path, "Pods/SwiftLint/swiftlint");
    }

    #[test]
    fn test_scaffold_round_trips_to_defaults() {
        let scaffold = Config::scaffold().unwrap();
        let parsed: Config = toml::from_str(&scaffold).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
