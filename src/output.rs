//! Output rendering for run reports.
//!
//! Supports `human` (default) and `json` outputs. The JSON form is the
//! serialized report: per-file verdicts and a top-level summary.

use crate::models::{FileVerdict, GrammarOutcome, RunReport, RunStatus, Status};
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;
use std::fmt;

const INDENT: &str = "   ";

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print a report in the requested format.
pub fn print_report(report: &RunReport, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_report_json(report)) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("error: failed to serialize report: {e}"),
        },
        _ => print!("{}", HumanReport::new(report, use_colors(output))),
    }
}

/// Render the human report: one block per file, a blank line, the summary.
pub fn render_human(report: &RunReport, color: bool) -> String {
    HumanReport::new(report, color).to_string()
}

/// Human-readable view of a report.
pub struct HumanReport<'a> {
    report: &'a RunReport,
    color: bool,
}

impl<'a> HumanReport<'a> {
    pub fn new(report: &'a RunReport, color: bool) -> Self {
        Self { report, color }
    }

    fn write_verdict(&self, f: &mut fmt::Formatter<'_>, verdict: &FileVerdict) -> fmt::Result {
        let color = self.color;
        let file = if color {
            verdict.file.bold().to_string()
        } else {
            verdict.file.clone()
        };
        match verdict.status {
            Status::Pass => {
                let icon = if color { "✓".green().to_string() } else { "✓".to_string() };
                writeln!(f, "{icon}  {file}")?;
            }
            Status::Warn => {
                let icon = if color { "⚠️".yellow().to_string() } else { "⚠️".to_string() };
                writeln!(f, "{icon}  {file}:")?;
            }
            Status::Fail => {
                let icon = if color { "❌".red().to_string() } else { "❌".to_string() };
                writeln!(f, "{icon} {file}:")?;
            }
        }

        for finding in &verdict.findings {
            writeln!(f, "{INDENT}{finding}")?;
        }
        match &verdict.grammar {
            Some(GrammarOutcome::ParseError { message, location }) => {
                if let Some(loc) = location {
                    writeln!(f, "{INDENT}{loc}")?;
                }
                writeln!(f, "{INDENT}{message}")?;
            }
            Some(GrammarOutcome::Ok { warnings }) => {
                for w in warnings {
                    match &w.location {
                        Some(loc) => writeln!(f, "{INDENT}{} ({loc})", w.message)?,
                        None => writeln!(f, "{INDENT}{}", w.message)?,
                    }
                }
            }
            None => {}
        }
        Ok(())
    }
}

impl fmt::Display for HumanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for verdict in &self.report.files {
            self.write_verdict(f, verdict)?;
        }
        writeln!(f)?;

        // Counts files with warnings, not individual warnings.
        let summary = &self.report.summary;
        let line = match summary.status {
            RunStatus::Fail => format!(
                "❌ CSS validation failed ({} of {} files failed)",
                summary.failed, summary.files
            ),
            RunStatus::Ok if summary.warned > 0 => format!(
                "✅ All CSS files valid ({} warning{})",
                summary.warned,
                if summary.warned > 1 { "s" } else { "" }
            ),
            RunStatus::Ok => "✅ All CSS files valid".to_string(),
        };
        if self.color {
            writeln!(f, "{}", line.bold())
        } else {
            writeln!(f, "{line}")
        }
    }
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &RunReport) -> JsonVal {
    serde_json::to_value(report).unwrap_or(JsonVal::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, StructuralFinding, Warning};

    fn sample() -> RunReport {
        RunReport::new(vec![
            FileVerdict::new("a.css", vec![], Some(GrammarOutcome::clean())),
            FileVerdict::new(
                "b.css",
                vec![StructuralFinding::BraceMismatch { open: 2, close: 0 }],
                Some(GrammarOutcome::ParseError {
                    message: "Unexpected end of input".into(),
                    location: Some(Location { line: 1, column: 32 }),
                }),
            ),
            FileVerdict::new(
                "d.css",
                vec![],
                Some(GrammarOutcome::Ok {
                    warnings: vec![Warning::new("Unknown at rule: @foo")],
                }),
            ),
        ])
    }

    #[test]
    fn test_render_human_plain() {
        let text = render_human(&sample(), false);
        let expected = "\
✓  a.css
❌ b.css:
   Mismatched braces (2 open, 0 close)
   Line 1, Column 32
   Unexpected end of input
⚠️  d.css:
   Unknown at rule: @foo

❌ CSS validation failed (1 of 3 files failed)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_summary_with_warnings() {
        let report = RunReport::new(vec![FileVerdict::new(
            "d.css",
            vec![],
            Some(GrammarOutcome::Ok {
                warnings: vec![Warning::new("w")],
            }),
        )]);
        let text = render_human(&report, false);
        assert!(text.ends_with("\n✅ All CSS files valid (1 warning)\n"));

        let clean = RunReport::new(vec![FileVerdict::new("a.css", vec![], None)]);
        assert!(render_human(&clean, false).ends_with("\n✅ All CSS files valid\n"));
    }

    #[test]
    fn test_summary_counts_warned_files() {
        let noisy = || {
            Some(GrammarOutcome::Ok {
                warnings: vec![
                    Warning {
                        message: "Unknown at rule: @foo".into(),
                        location: Some(Location { line: 2, column: 5 }),
                    },
                    Warning::new("second"),
                ],
            })
        };
        let one = RunReport::new(vec![FileVerdict::new("d.css", vec![], noisy())]);
        let text = render_human(&one, false);
        assert!(text.contains("   Unknown at rule: @foo (Line 2, Column 5)\n"));
        assert!(text.ends_with("\n✅ All CSS files valid (1 warning)\n"));

        let two = RunReport::new(vec![
            FileVerdict::new("d.css", vec![], noisy()),
            FileVerdict::new("e.css", vec![], noisy()),
        ]);
        assert!(render_human(&two, false).ends_with("\n✅ All CSS files valid (2 warnings)\n"));
    }

    #[test]
    fn test_compose_report_json_shape() {
        let out = compose_report_json(&sample());
        assert_eq!(out["summary"]["status"], "fail");
        assert_eq!(out["summary"]["failed"], 1);
        assert_eq!(out["summary"]["warnings"], 1);
        assert_eq!(out["files"][0]["status"], "pass");
        assert_eq!(out["files"][1]["findings"][0]["kind"], "brace_mismatch");
        assert_eq!(out["files"][1]["grammar"]["kind"], "parse_error");
        assert_eq!(out["files"][1]["grammar"]["location"]["line"], 1);
        assert_eq!(out["files"][2]["grammar"]["warnings"][0]["message"], "Unknown at rule: @foo");
    }
}
