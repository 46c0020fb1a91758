//! Shared data models for scan/grammar results and the run report.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A stylesheet read from the source directory.
///
/// Read once by the driver and never mutated afterwards. Bytes that are
/// not valid UTF-8 are replaced in `content` and the decode error is kept.
#[derive(Debug, Clone)]
pub struct StylesheetFile {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
    pub encoding_error: Option<String>,
}

impl StylesheetFile {
    /// Decode raw file bytes.
    pub fn from_bytes(name: impl Into<String>, path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let (content, encoding_error) = match String::from_utf8(bytes) {
            Ok(content) => (content, None),
            Err(err) => {
                let message = format!("Invalid UTF-8: {}", err.utf8_error());
                (String::from_utf8_lossy(err.as_bytes()).into_owned(), Some(message))
            }
        };
        Self {
            name: name.into(),
            path: path.into(),
            content,
            encoding_error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// A lexical defect found without parsing CSS grammar.
pub enum StructuralFinding {
    BraceMismatch { open: usize, close: usize },
    UnclosedComment { open: usize, close: usize },
    MissingLayerDeclaration { marker: String },
}

impl fmt::Display for StructuralFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BraceMismatch { open, close } => {
                write!(f, "Mismatched braces ({open} open, {close} close)")
            }
            Self::UnclosedComment { open, close } => {
                write!(f, "Unclosed comments ({open} open, {close} close)")
            }
            Self::MissingLayerDeclaration { marker } => {
                write!(f, "Missing {marker} declaration")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Source position, both 1-based.
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}, Column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Non-fatal message emitted by the grammar engine.
pub struct Warning {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Result of a full grammar parse of one stylesheet.
pub enum GrammarOutcome {
    Ok {
        warnings: Vec<Warning>,
    },
    ParseError {
        message: String,
        location: Option<Location>,
    },
}

impl GrammarOutcome {
    pub fn clean() -> Self {
        Self::Ok {
            warnings: Vec::new(),
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        match self {
            Self::Ok { warnings } => warnings,
            Self::ParseError { .. } => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
/// Per-file verdict, ordered by severity.
pub enum Status {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Findings for one file together with the status derived from them.
pub struct FileVerdict {
    pub file: String,
    pub findings: Vec<StructuralFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar: Option<GrammarOutcome>,
    pub status: Status,
}

impl FileVerdict {
    /// Build a verdict; `grammar` is `None` when the grammar check did not run.
    pub fn new(
        file: impl Into<String>,
        findings: Vec<StructuralFinding>,
        grammar: Option<GrammarOutcome>,
    ) -> Self {
        let status = derive_status(&findings, grammar.as_ref());
        Self {
            file: file.into(),
            findings,
            grammar,
            status,
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        match &self.grammar {
            Some(outcome) => outcome.warnings(),
            None => &[],
        }
    }
}

fn derive_status(findings: &[StructuralFinding], grammar: Option<&GrammarOutcome>) -> Status {
    if !findings.is_empty() || grammar.is_some_and(GrammarOutcome::is_error) {
        Status::Fail
    } else if grammar.is_some_and(|g| !g.warnings().is_empty()) {
        Status::Warn
    } else {
        Status::Pass
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Aggregate status of a run.
pub enum RunStatus {
    Ok,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Aggregated counts used by printers.
pub struct Summary {
    pub files: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
    pub warnings: usize,
    pub status: RunStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Verdicts in enumeration order plus the derived summary.
pub struct RunReport {
    pub files: Vec<FileVerdict>,
    pub summary: Summary,
}

impl RunReport {
    pub fn new(files: Vec<FileVerdict>) -> Self {
        let count = |s: Status| files.iter().filter(|v| v.status == s).count();
        let failed = count(Status::Fail);
        let summary = Summary {
            files: files.len(),
            passed: count(Status::Pass),
            warned: count(Status::Warn),
            failed,
            warnings: files.iter().map(|v| v.warnings().len()).sum(),
            status: if failed > 0 {
                RunStatus::Fail
            } else {
                RunStatus::Ok
            },
        };
        Self { files, summary }
    }

    pub fn status(&self) -> RunStatus {
        self.summary.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_precedence() {
        let warned = FileVerdict::new(
            "a.css",
            vec![],
            Some(GrammarOutcome::Ok {
                warnings: vec![Warning::new("w")],
            }),
        );
        assert_eq!(warned.status, Status::Warn);

        let failed = FileVerdict::new(
            "b.css",
            vec![StructuralFinding::BraceMismatch { open: 2, close: 0 }],
            Some(GrammarOutcome::Ok {
                warnings: vec![Warning::new("w")],
            }),
        );
        assert_eq!(failed.status, Status::Fail);

        let parse_error = FileVerdict::new(
            "c.css",
            vec![],
            Some(GrammarOutcome::ParseError {
                message: "boom".into(),
                location: None,
            }),
        );
        assert_eq!(parse_error.status, Status::Fail);

        assert_eq!(FileVerdict::new("d.css", vec![], None).status, Status::Pass);
    }

    #[test]
    fn test_report_summary_counts() {
        let report = RunReport::new(vec![
            FileVerdict::new("a.css", vec![], Some(GrammarOutcome::clean())),
            FileVerdict::new(
                "b.css",
                vec![],
                Some(GrammarOutcome::Ok {
                    warnings: vec![Warning::new("x"), Warning::new("y")],
                }),
            ),
        ]);
        assert_eq!(report.status(), RunStatus::Ok);
        assert_eq!(report.summary.passed, 1);
        assert_eq!(report.summary.warned, 1);
        assert_eq!(report.summary.warnings, 2);

        let empty = RunReport::new(vec![]);
        assert_eq!(empty.status(), RunStatus::Ok);
        assert_eq!(empty.summary.files, 0);
    }

    #[test]
    fn test_finding_messages() {
        assert_eq!(
            StructuralFinding::BraceMismatch { open: 3, close: 1 }.to_string(),
            "Mismatched braces (3 open, 1 close)"
        );
        assert_eq!(
            StructuralFinding::MissingLayerDeclaration {
                marker: "@layer".into()
            }
            .to_string(),
            "Missing @layer declaration"
        );
        assert_eq!(
            Location { line: 4, column: 7 }.to_string(),
            "Line 4, Column 7"
        );
    }
}
