use crate::types::Violation;
use anyhow::{Context, bail};
use serde::Serialize;
use std::cell::RefCell;
use tracing::{error, info};

/// Outbound effects of a lint run, one method per effect
pub trait ReportSink {
    /// Mark the check as failed with a message
    fn fail(&self, message: &str);
    /// Post a markdown document
    fn markdown(&self, document: &str);
    /// Attach an error to a file line
    fn fail_inline(&self, reason: &str, file: &str, line: u32);
    /// Attach a warning to a file line
    fn warn_inline(&self, reason: &str, file: &str, line: u32);
}

/// Inline annotation posted to a file line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub level: &'static str,
    pub reason: String,
    pub file: String,
    pub line: u32,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    violations: &'a [Violation],
    failures: &'a [String],
    annotations: &'a [Annotation],
}

/// Sink that prints inline annotations as GitHub Actions workflow commands
/// and keeps the failures and markdown for the final output
#[derive(Default)]
pub struct ConsoleSink {
    failures: RefCell<Vec<String>>,
    markdown: RefCell<Option<String>>,
    annotations: RefCell<Vec<Annotation>>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the run should be reported as failed
    pub fn failed(&self) -> bool {
        !self.failures.borrow().is_empty()
            || self.annotations.borrow().iter().any(|a| a.level == "error")
    }

    /// Write the posted markdown to stdout, or the report to `output` (.md or .json)
    pub fn finish(&self, output: Option<&str>, violations: &[Violation]) -> anyhow::Result<()> {
        let Some(path) = output else {
            if let Some(document) = self.markdown.borrow().as_deref() {
                println!("{}", document);
            }
            return Ok(());
        };

        let content = if path.ends_with(".json") {
            let failures = self.failures.borrow();
            let annotations = self.annotations.borrow();
            let report = JsonReport {
                violations,
                failures: &failures,
                annotations: &annotations,
            };
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        } else if path.ends_with(".md") {
            self.markdown.borrow().clone().unwrap_or_default()
        } else {
            bail!("Output file must end with .md or .json");
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write output file {}", path))?;
        info!("Results written to {}", path);
        Ok(())
    }
}

impl ReportSink for ConsoleSink {
    fn fail(&self, message: &str) {
        error!("{}", message);
        self.failures.borrow_mut().push(message.to_string());
    }

    fn markdown(&self, document: &str) {
        *self.markdown.borrow_mut() = Some(document.to_string());
    }

    fn fail_inline(&self, reason: &str, file: &str, line: u32) {
        self.annotate("error", reason, file, line);
    }

    fn warn_inline(&self, reason: &str, file: &str, line: u32) {
        self.annotate("warning", reason, file, line);
    }
}

impl ConsoleSink {
    fn annotate(&self, level: &'static str, reason: &str, file: &str, line: u32) {
        println!("{}", workflow_command(level, reason, file, line));
        self.annotations.borrow_mut().push(Annotation {
            level,
            reason: reason.to_string(),
            file: file.to_string(),
            line,
        });
    }
}

/// Format a GitHub Actions annotation, escaping `%`, CR and LF in the message
fn workflow_command(level: &str, reason: &str, file: &str, line: u32) -> String {
    let escape = |s: &str| {
        s.replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A")
    };
    let property = |s: &str| escape(s).replace(':', "%3A").replace(',', "%2C");
    format!(
        "::{} file={},line={}::{}",
        level,
        property(file),
        line,
        escape(reason)
    )
}

/// Sink that records every call, used to observe a run in tests
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSink {
    pub failures: RefCell<Vec<String>>,
    pub markdowns: RefCell<Vec<String>>,
    pub errors: RefCell<Vec<(String, String, u32)>>,
    pub warnings: RefCell<Vec<(String, String, u32)>>,
}

#[cfg(test)]
impl ReportSink for RecordingSink {
    fn fail(&self, message: &str) {
        self.failures.borrow_mut().push(message.to_string());
    }

    fn markdown(&self, document: &str) {
        self.markdowns.borrow_mut().push(document.to_string());
    }

    fn fail_inline(&self, reason: &str, file: &str, line: u32) {
        self.errors
            .borrow_mut()
            .push((reason.to_string(), file.to_string(), line));
    }

    fn warn_inline(&self, reason: &str, file: &str, line: u32) {
        self.warnings
            .borrow_mut()
            .push((reason.to_string(), file.to_string(), line));
    }
}
