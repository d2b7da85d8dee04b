use crate::report::ReportSink;
use crate::types::{Severity, Violation};
use tracing::info;

const MARKDOWN_HEADER: &str = "### SwiftLint found issues\n\n\
| Severity | File | Reason |\n\
| -------- | ---- | ------ |\n";

/// Build the summary document: header, table header, one row per violation
pub fn format_markdown(violations: &[Violation]) -> String {
    let rows: Vec<String> = violations.iter().map(Violation::to_markdown).collect();
    format!("{}{}", MARKDOWN_HEADER, rows.join("\n"))
}

/// Post violations through `sink`, inline or as one markdown summary.
///
/// A clean run posts nothing.
pub fn report(violations: &[Violation], inline: bool, sink: &dyn ReportSink) {
    if violations.is_empty() {
        info!("No violations found");
        return;
    }

    if inline {
        info!("Posting {} inline annotations", violations.len());
        for violation in violations {
            match violation.severity {
                Severity::Error => {
                    sink.fail_inline(&violation.reason, &violation.file, violation.line.get())
                }
                Severity::Warning => {
                    sink.warn_inline(&violation.reason, &violation.file, violation.line.get())
                }
            }
        }
    } else {
        info!("Posting summary of {} violations", violations.len());
        sink.markdown(&format_markdown(violations));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingSink;
    use crate::types::tests::violation;

    fn mixed() -> Vec<Violation> {
        vec![
            violation(Severity::Warning, "a.swift", 1),
            violation(Severity::Error, "b.swift", 2),
            violation(Severity::Warning, "c.swift", 3),
        ]
    }

    #[test]
    fn test_format_markdown() {
        let doc = format_markdown(&mixed()[..2]);
        assert_eq!(
            doc,
            "### SwiftLint found issues\n\n\
             | Severity | File | Reason |\n\
             | -------- | ---- | ------ |\n\
             | Warning | a.swift | Force casts should be avoided. |\n\
             | Error | b.swift | Force casts should be avoided. |"
        );
    }

    #[test]
    fn test_report_empty_is_silent() {
        let sink = RecordingSink::default();
        report(&[], false, &sink);
        report(&[], true, &sink);
        assert!(sink.markdowns.borrow().is_empty());
        assert!(sink.errors.borrow().is_empty());
        assert!(sink.warnings.borrow().is_empty());
    }

    #[test]
    fn test_report_summary_posts_once() {
        let sink = RecordingSink::default();
        report(&mixed(), false, &sink);
        let markdowns = sink.markdowns.borrow();
        assert_eq!(markdowns.len(), 1);
        assert!(markdowns[0].contains("SwiftLint found issues"));
        assert_eq!(markdowns[0].lines().filter(|l| l.ends_with(".swift | Force casts should be avoided. |")).count(), 3);
        assert!(sink.errors.borrow().is_empty());
        assert!(sink.warnings.borrow().is_empty());
    }

    #[test]
    fn test_report_inline_splits_by_severity() {
        let sink = RecordingSink::default();
        report(&mixed(), true, &sink);
        assert!(sink.markdowns.borrow().is_empty());
        assert_eq!(
            *sink.errors.borrow(),
            vec![("Force casts should be avoided.".to_string(), "b.swift".to_string(), 2)]
        );
        let warnings = sink.warnings.borrow();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].1, "a.swift");
        assert_eq!(warnings[1].1, "c.swift");
    }
}
