//! Lint runner: enumerate stylesheets, run both checks, fold into a report.
//!
//! Every file is read before any check runs, so an unreadable file aborts
//! the run without a partial report. Checks are pure per file and run in
//! parallel; results keep enumeration order.

use crate::error::{Error, Result};
use crate::grammar::GrammarEngine;
use crate::models::{FileVerdict, GrammarOutcome, RunReport, StylesheetFile};
use crate::scan::{scan, DEFAULT_LAYER_MARKER};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which checks a run performs.
pub struct Checks {
    pub structural: bool,
    pub grammar: bool,
}

impl Checks {
    pub const ALL: Self = Self {
        structural: true,
        grammar: true,
    };
    pub const STRUCTURAL: Self = Self {
        structural: true,
        grammar: false,
    };
    pub const GRAMMAR: Self = Self {
        structural: false,
        grammar: true,
    };
}

#[derive(Debug, Clone)]
/// Per-run lint settings.
pub struct LintOptions {
    /// File extension without the leading dot.
    pub extension: String,
    pub layer_marker: String,
    pub checks: Checks,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            extension: "css".to_string(),
            layer_marker: DEFAULT_LAYER_MARKER.to_string(),
            checks: Checks::ALL,
        }
    }
}

/// List stylesheets in `src_dir` ending in `.<extension>`, sorted by name.
pub fn collect_stylesheets(src_dir: &Path, extension: &str) -> Result<Vec<StylesheetFile>> {
    let suffix = format!(".{extension}");
    let entries = fs::read_dir(src_dir).map_err(|e| Error::read_dir(src_dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::read_dir(src_dir, e))?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.ends_with(&suffix) {
            continue;
        }
        let path = entry.path();
        if !path.is_file() {
            warn!(path = %path.display(), "skipping non-file entry");
            continue;
        }
        paths.push((name, path));
    }
    paths.sort();

    paths
        .into_iter()
        .map(|(name, path)| {
            let bytes = fs::read(&path).map_err(|e| Error::read_file(&path, e))?;
            Ok(StylesheetFile::from_bytes(name, path, bytes))
        })
        .collect()
}

/// Run the selected checks on one stylesheet.
pub fn lint_file(
    file: &StylesheetFile,
    options: &LintOptions,
    engine: &dyn GrammarEngine,
) -> FileVerdict {
    let findings = if options.checks.structural {
        scan(&file.content, &options.layer_marker)
    } else {
        Vec::new()
    };
    let grammar = options.checks.grammar.then(|| match &file.encoding_error {
        // The engine only accepts text, so undecodable files fail here.
        Some(message) => GrammarOutcome::ParseError {
            message: message.clone(),
            location: None,
        },
        None => engine.parse(&file.name, &file.content),
    });
    let verdict = FileVerdict::new(file.name.clone(), findings, grammar);
    debug!(path = %file.path.display(), status = ?verdict.status, "checked stylesheet");
    verdict
}

/// Validate every stylesheet in `src_dir`.
///
/// Fails only when the directory or a file cannot be read; all per-file
/// problems end up in the returned report.
pub fn run_lint(
    src_dir: &Path,
    options: &LintOptions,
    engine: &dyn GrammarEngine,
) -> Result<RunReport> {
    let files = collect_stylesheets(src_dir, &options.extension)?;
    info!(dir = %src_dir.display(), files = files.len(), "validating stylesheets");

    let verdicts: Vec<FileVerdict> = files
        .par_iter()
        .map(|file| lint_file(file, options, engine))
        .collect();

    let report = RunReport::new(verdicts);
    info!(
        failed = report.summary.failed,
        warnings = report.summary.warnings,
        "validation finished"
    );
    Ok(report)
}
