//! Configuration discovery and effective settings resolution.
//!
//! Layerlint reads `layerlint.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `src_dir`: `src`
//! - `extension`: `css`
//! - `layer_marker`: `@layer`
//! - `output`: `human`
//! - `grammar.targets`: last 2 versions of Chrome, Firefox, Safari, Edge
//! - `grammar.custom_media`: true
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use crate::grammar::GrammarConfig;
use crate::scan::DEFAULT_LAYER_MARKER;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["layerlint.toml", "layerlint.yaml", "layerlint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Grammar engine section under `[grammar]`.
pub struct GrammarCfg {
    pub targets: Option<Vec<String>>,
    pub custom_media: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `layerlint.toml|yaml`.
pub struct LayerlintConfig {
    pub src_dir: Option<String>,
    pub extension: Option<String>,
    pub layer_marker: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub grammar: Option<GrammarCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub src_dir: PathBuf,
    pub extension: String,
    pub layer_marker: String,
    pub output: String,
    pub grammar: GrammarConfig,
    /// Whether a config file was found.
    pub config_found: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `layerlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `LayerlintConfig` from `layerlint.toml` or `layerlint.yaml|yml`.
///
/// Returns `Ok(None)` when no file exists; a file that exists but does not
/// parse is an error.
pub fn load_config(root: &Path) -> Result<Option<LayerlintConfig>> {
    let toml_path = root.join("layerlint.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).map_err(|e| Error::config(&toml_path, e.to_string()))?;
        let cfg: LayerlintConfig =
            toml::from_str(&s).map_err(|e| Error::config(&toml_path, e.to_string()))?;
        return Ok(Some(cfg));
    }
    for yml in ["layerlint.yaml", "layerlint.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).map_err(|e| Error::config(&p, e.to_string()))?;
            let cfg: LayerlintConfig =
                serde_yaml::from_str(&s).map_err(|e| Error::config(&p, e.to_string()))?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_src_dir: Option<&str>,
    cli_output: Option<&str>,
) -> Result<Effective> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let src_dir = cli_src_dir
        .map(|s| s.to_string())
        .or(cfg.src_dir)
        .unwrap_or_else(|| "src".to_string());

    let extension = cfg
        .extension
        .map(|e| e.trim_start_matches('.').to_string())
        .unwrap_or_else(|| "css".to_string());

    let layer_marker = cfg
        .layer_marker
        .unwrap_or_else(|| DEFAULT_LAYER_MARKER.to_string());

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let defaults = GrammarConfig::default();
    let grammar = GrammarConfig {
        targets: cfg
            .grammar
            .as_ref()
            .and_then(|g| g.targets.clone())
            .unwrap_or(defaults.targets),
        custom_media: cfg
            .grammar
            .as_ref()
            .and_then(|g| g.custom_media)
            .unwrap_or(defaults.custom_media),
        minify: false,
    };

    Ok(Effective {
        src_dir: repo_root.join(src_dir),
        repo_root,
        extension,
        layer_marker,
        output,
        grammar,
        config_found,
    })
}
