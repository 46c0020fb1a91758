//! Grammar validation through a browser-grade CSS engine.
//!
//! The engine sits behind [`GrammarEngine`] so the parser backend can be
//! swapped without touching the scanner or the driver. [`LightningEngine`]
//! is the default backend and uses `lightningcss`, which tokenizes with
//! Mozilla's `cssparser`.
//!
//! Parse failures are returned as [`GrammarOutcome::ParseError`], never as
//! `Err`. Only an unusable configuration fails, and it does so when the
//! engine is built.

use crate::error::{Error, Result};
use crate::models::{GrammarOutcome, Location, Warning};
use lightningcss::error::{Error as CssError, ErrorLocation};
use lightningcss::stylesheet::{
    MinifyOptions, ParserFlags, ParserOptions, PrinterOptions, StyleSheet,
};
use lightningcss::targets::{Browsers, Targets};
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Browserslist queries used when none are configured.
pub const DEFAULT_TARGETS: [&str; 4] = [
    "last 2 Chrome versions",
    "last 2 Firefox versions",
    "last 2 Safari versions",
    "last 2 Edge versions",
];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Engine options fixed once per run.
pub struct GrammarConfig {
    /// Browserslist queries, e.g. `last 2 Chrome versions`.
    pub targets: Vec<String>,
    /// Printer minification. Output is discarded either way.
    pub minify: bool,
    /// Enable the draft `@custom-media` syntax.
    pub custom_media: bool,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            targets: DEFAULT_TARGETS.iter().map(|s| s.to_string()).collect(),
            minify: false,
            custom_media: true,
        }
    }
}

/// A CSS parser that can judge one stylesheet at a time.
pub trait GrammarEngine: Send + Sync {
    fn parse(&self, filename: &str, content: &str) -> GrammarOutcome;
}

/// `lightningcss`-backed engine.
pub struct LightningEngine {
    targets: Targets,
    flags: ParserFlags,
    minify: bool,
}

impl LightningEngine {
    /// Resolve browser targets and parser flags.
    ///
    /// Fails with [`Error::Targets`] when a query is not understood.
    pub fn new(config: &GrammarConfig) -> Result<Self> {
        let browsers = if config.targets.is_empty() {
            None
        } else {
            Browsers::from_browserslist(config.targets.iter().map(String::as_str))
                .map_err(|e| Error::Targets(e.to_string()))?
        };
        debug!(?browsers, "resolved browser targets");

        let mut flags = ParserFlags::empty();
        if config.custom_media {
            flags |= ParserFlags::CUSTOM_MEDIA;
        }

        Ok(Self {
            targets: Targets {
                browsers,
                ..Targets::default()
            },
            flags,
            minify: config.minify,
        })
    }
}

impl GrammarEngine for LightningEngine {
    fn parse(&self, filename: &str, content: &str) -> GrammarOutcome {
        let collected = Arc::new(RwLock::new(Vec::new()));
        let options = ParserOptions {
            filename: filename.to_string(),
            flags: self.flags.clone(),
            warnings: Some(Arc::clone(&collected)),
            ..ParserOptions::default()
        };

        let mut sheet = match StyleSheet::parse(content, options) {
            Ok(sheet) => sheet,
            Err(err) => return parse_error(&err),
        };
        let minify = MinifyOptions {
            targets: self.targets,
            ..MinifyOptions::default()
        };
        if let Err(err) = sheet.minify(minify) {
            return parse_error(&err);
        }
        let printer = PrinterOptions {
            minify: self.minify,
            targets: self.targets,
            ..PrinterOptions::default()
        };
        if let Err(err) = sheet.to_css(printer) {
            return parse_error(&err);
        }

        let warnings: Vec<Warning> = collected
            .read()
            .map(|list| {
                list.iter()
                    .map(|w| Warning {
                        message: w.kind.to_string(),
                        location: location(w.loc.as_ref()),
                    })
                    .collect()
            })
            .unwrap_or_default();
        debug!(file = filename, warnings = warnings.len(), "parsed stylesheet");
        GrammarOutcome::Ok { warnings }
    }
}

fn parse_error<T: fmt::Display>(err: &CssError<T>) -> GrammarOutcome {
    GrammarOutcome::ParseError {
        message: err.kind.to_string(),
        location: location(err.loc.as_ref()),
    }
}

// lightningcss lines are 0-based, columns 1-based.
fn location(loc: Option<&ErrorLocation>) -> Option<Location> {
    loc.map(|l| Location {
        line: l.line + 1,
        column: l.column,
    })
}
