//! Structural scanner: lexical checks that need no CSS grammar.
//!
//! Three independent checks run on every file and all applicable findings
//! are reported:
//! - `{` and `}` occur equally often.
//! - `/*` and `*/` occur equally often.
//! - The layer marker (default `@layer`) occurs somewhere in the text.
//!
//! Counting is a heuristic, not a nesting check. A file with a swapped pair
//! such as `} {` balances and passes here; the grammar engine is the one that
//! rejects it.

use crate::models::StructuralFinding;

/// Marker a stylesheet must contain unless configured otherwise.
pub const DEFAULT_LAYER_MARKER: &str = "@layer";

/// Scan `content` and return every structural finding.
pub fn scan(content: &str, marker: &str) -> Vec<StructuralFinding> {
    let mut findings = Vec::new();

    let open = content.matches('{').count();
    let close = content.matches('}').count();
    if open != close {
        findings.push(StructuralFinding::BraceMismatch { open, close });
    }

    let open = content.matches("/*").count();
    let close = content.matches("*/").count();
    if open != close {
        findings.push(StructuralFinding::UnclosedComment { open, close });
    }

    if !content.contains(marker) {
        findings.push(StructuralFinding::MissingLayerDeclaration {
            marker: marker.to_string(),
        });
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn missing() -> StructuralFinding {
        StructuralFinding::MissingLayerDeclaration {
            marker: DEFAULT_LAYER_MARKER.into(),
        }
    }

    #[test]
    fn test_clean_layered_sheet() {
        let css = "@layer base { .x { color: red; } }";
        assert!(scan(css, DEFAULT_LAYER_MARKER).is_empty());
    }

    #[test]
    fn test_missing_closing_braces() {
        let css = "@layer base { .x { color: red; ";
        assert_eq!(
            scan(css, DEFAULT_LAYER_MARKER),
            vec![StructuralFinding::BraceMismatch { open: 2, close: 0 }]
        );
    }

    #[test]
    fn test_missing_layer() {
        assert_eq!(scan(".x { color: red; }", DEFAULT_LAYER_MARKER), vec![missing()]);
    }

    #[test]
    fn test_all_findings_reported() {
        let css = "/* open .x { color: red;";
        assert_eq!(
            scan(css, DEFAULT_LAYER_MARKER),
            vec![
                StructuralFinding::BraceMismatch { open: 1, close: 0 },
                StructuralFinding::UnclosedComment { open: 1, close: 0 },
                missing(),
            ]
        );
    }

    #[test]
    fn test_swapped_braces_balance() {
        // Known limitation: counts balance, so nothing is reported.
        assert!(scan("@layer base } .x {", DEFAULT_LAYER_MARKER).is_empty());
    }

    #[test]
    fn test_custom_marker() {
        let css = "@import url(a.css);";
        assert!(scan(css, "@import").is_empty());
        assert_eq!(
            scan(css, "@layer"),
            vec![StructuralFinding::MissingLayerDeclaration {
                marker: "@layer".into()
            }]
        );
    }

    /// Stylesheet text without braces, comment delimiters or the marker.
    fn plain_text() -> impl Strategy<Value = String> {
        "[a-z0-9 .:;#\n-]{0,40}"
    }

    /// A clean layered sheet built from balanced fragments.
    fn clean_sheet() -> impl Strategy<Value = String> {
        proptest::collection::vec((plain_text(), plain_text()), 0..6).prop_map(|parts| {
            let mut css = String::from("@layer base;\n");
            for (sel, body) in parts {
                css.push_str(&format!("/* {sel} */ .{sel} {{ {body} }}\n"));
            }
            css
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Identical input yields identical findings.
        #[test]
        fn scan_is_deterministic(css in ".{0,120}") {
            prop_assert_eq!(scan(&css, DEFAULT_LAYER_MARKER), scan(&css, DEFAULT_LAYER_MARKER));
        }

        /// Balanced, layered text is clean.
        #[test]
        fn clean_sheet_has_no_findings(css in clean_sheet()) {
            prop_assert!(scan(&css, DEFAULT_LAYER_MARKER).is_empty());
        }

        /// One extra `{` yields exactly one brace mismatch.
        #[test]
        fn extra_open_brace_is_reported(css in clean_sheet()) {
            let before = css.matches('{').count();
            let broken = format!("{css}{{");
            prop_assert_eq!(
                scan(&broken, DEFAULT_LAYER_MARKER),
                vec![StructuralFinding::BraceMismatch { open: before + 1, close: before }]
            );
        }

        /// Dropping the marker yields exactly a missing-layer finding.
        #[test]
        fn removed_marker_is_reported(css in clean_sheet()) {
            let stripped = css.replace(DEFAULT_LAYER_MARKER, "");
            prop_assert_eq!(scan(&stripped, DEFAULT_LAYER_MARKER), vec![missing()]);
        }
    }
}
