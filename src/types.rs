use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Severity reported by SwiftLint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(alias = "warning")]
    Warning,
    #[serde(alias = "error")]
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
        }
    }
}

/// A single SwiftLint finding, as emitted by `swiftlint lint --reporter json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule identifier (e.g. `opening_brace`)
    pub rule_id: String,
    /// Human-readable explanation
    pub reason: String,
    /// Column of the finding; the key is required but SwiftLint writes null for whole-line rules
    #[serde(deserialize_with = "nullable")]
    pub character: Option<u32>,
    /// File path, absolute until normalized
    pub file: String,
    pub severity: Severity,
    /// Display name of the rule
    #[serde(rename = "type")]
    pub rule_type: String,
    /// Line number (1-indexed); 0 fails the decode
    pub line: NonZeroU32,
}

fn nullable<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer)
}

impl Violation {
    /// Decode a full SwiftLint JSON report.
    ///
    /// The decode is all-or-nothing: one malformed element fails the whole array.
    pub fn decode_all(response: &str) -> Result<Vec<Violation>, serde_json::Error> {
        serde_json::from_str(response)
    }

    /// Render the violation as a markdown table row
    pub fn to_markdown(&self) -> String {
        format!("| {} | {} | {} |", self.severity, self.file, self.reason)
    }

    /// Rewrite `file` relative to `current_path`.
    ///
    /// Strips the `current_path` prefix when present, then one leading `/`.
    pub fn relative_to(mut self, current_path: &str) -> Self {
        let file = self.file.strip_prefix(current_path).unwrap_or(&self.file);
        let file = file.strip_prefix('/').unwrap_or(file);
        self.file = file.to_string();
        self
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const HARVEY_JSON: &str = r#"[
        {
            "rule_id" : "opening_brace",
            "reason" : "Opening braces should be preceded by a single space and on the same line as the declaration.",
            "character" : 39,
            "file" : "/Users/ash/bin/Harvey/Sources/Harvey/Harvey.swift",
            "severity" : "Warning",
            "type" : "Opening Brace Spacing",
            "line" : 8
        }
    ]"#;

    pub(crate) fn violation(severity: Severity, file: &str, line: u32) -> Violation {
        Violation {
            rule_id: "force_cast".into(),
            reason: "Force casts should be avoided.".into(),
            character: Some(1),
            file: file.into(),
            severity,
            rule_type: "Force Cast".into(),
            line: NonZeroU32::new(line).unwrap(),
        }
    }

    #[test]
    fn test_decode_single_violation() {
        let violations = Violation::decode_all(HARVEY_JSON).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(violations[0].line.get(), 8);
        assert_eq!(violations[0].rule_id, "opening_brace");
        assert_eq!(violations[0].rule_type, "Opening Brace Spacing");
        assert_eq!(violations[0].character, Some(39));
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(Violation::decode_all("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_preserves_order() {
        let json = r#"[
            {"rule_id":"a","reason":"r","character":1,"file":"b.swift","severity":"Error","type":"A","line":9},
            {"rule_id":"b","reason":"r","character":null,"file":"a.swift","severity":"warning","type":"B","line":1}
        ]"#;
        let violations = Violation::decode_all(json).unwrap();
        let ids: Vec<_> = violations.iter().map(|v| v.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(violations[0].severity, Severity::Error);
        assert_eq!(violations[1].severity, Severity::Warning);
        assert_eq!(violations[1].character, None);
    }

    #[test]
    fn test_decode_unknown_severity_fails_whole_array() {
        let json = r#"[
            {"rule_id":"a","reason":"r","character":1,"file":"f","severity":"Error","type":"A","line":1},
            {"rule_id":"b","reason":"r","character":1,"file":"f","severity":"Notice","type":"B","line":2}
        ]"#;
        assert!(Violation::decode_all(json).is_err());
    }

    #[test]
    fn test_decode_missing_field_fails() {
        let json = r#"[{"rule_id":"a","reason":"r","file":"f","severity":"Error","type":"A","line":1}]"#;
        let err = Violation::decode_all(json).unwrap_err();
        assert!(err.to_string().contains("character"));
    }

    #[test]
    fn test_decode_zero_line_fails() {
        let json = r#"[{"rule_id":"a","reason":"r","character":1,"file":"f","severity":"Error","type":"A","line":0}]"#;
        assert!(Violation::decode_all(json).is_err());
    }

    #[test]
    fn test_decode_empty_output_fails() {
        assert!(Violation::decode_all("").is_err());
    }

    #[test]
    fn test_to_markdown() {
        let v = violation(Severity::Error, "Sources/App.swift", 3);
        assert_eq!(
            v.to_markdown(),
            "| Error | Sources/App.swift | Force casts should be avoided. |"
        );
    }

    #[test]
    fn test_relative_to_strips_root_and_separator() {
        let v = violation(Severity::Warning, "/repo/Sources/App.swift", 3).relative_to("/repo");
        assert_eq!(v.file, "Sources/App.swift");
        assert_eq!(v.line.get(), 3);
    }

    #[test]
    fn test_relative_to_is_noop_for_relative_path() {
        let v = violation(Severity::Warning, "Sources/App.swift", 3);
        let once = v.clone().relative_to("/repo");
        assert_eq!(once, v);
        assert_eq!(once.clone().relative_to("/repo"), once);
    }

    #[test]
    fn test_relative_to_foreign_absolute_path_only_loses_separator() {
        let v = violation(Severity::Warning, "/other/App.swift", 3).relative_to("/repo");
        assert_eq!(v.file, "other/App.swift");
    }
}
