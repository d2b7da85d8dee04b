use crate::report::ReportSink;
use crate::shell::{ShellError, ShellExecutor};
use crate::types::Violation;
use tracing::{debug, trace};

/// Why a unit of work contributed no violations
#[derive(Debug)]
pub enum LintError {
    /// SwiftLint could not be run
    Execution(ShellError),
    /// SwiftLint ran but its output was not a valid JSON report
    Decode {
        response: String,
        source: serde_json::Error,
    },
}

impl std::fmt::Display for LintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LintError::Execution(e) => write!(f, "Error running SwiftLint: {}", e),
            LintError::Decode { response, source } => write!(
                f,
                "Error deserializing SwiftLint JSON response ({}): {}",
                response, source
            ),
        }
    }
}

impl std::error::Error for LintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LintError::Execution(e) => Some(e),
            LintError::Decode { source, .. } => Some(source),
        }
    }
}

/// Run SwiftLint once and decode its report
pub fn collect(
    executor: &dyn ShellExecutor,
    swiftlint_path: &str,
    arguments: &[String],
) -> Result<Vec<Violation>, LintError> {
    let response = executor
        .execute(swiftlint_path, arguments)
        .map_err(LintError::Execution)?;
    trace!("SwiftLint response: {}", response);

    Violation::decode_all(&response).map_err(|source| LintError::Decode { response, source })
}

/// Run one unit of work, reporting any failure through `sink`.
///
/// A failed unit yields no violations; it never aborts the run.
pub fn run_unit(
    executor: &dyn ShellExecutor,
    swiftlint_path: &str,
    arguments: &[String],
    sink: &dyn ReportSink,
) -> Vec<Violation> {
    debug!("Running {} {}", swiftlint_path, arguments.join(" "));
    match collect(executor, swiftlint_path, arguments) {
        Ok(violations) => {
            debug!("SwiftLint reported {} violations", violations.len());
            violations
        }
        Err(e) => {
            sink.fail(&e.to_string());
            vec![]
        }
    }
}
