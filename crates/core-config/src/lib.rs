//! Configuration loading and parsing.
//!
//! Parses `keyarb.toml` (or an override path provided by the embedding host or
//! the binary). Recognized keys:
//!
//! ```toml
//! [status]
//! caret_marker = "|"        # single char spliced into the command-line status
//!
//! [arbiter]
//! reserve_insert_tab = true # leave <Tab> to the host's snippet expansion in Insert mode
//! ```
//!
//! Unknown fields are ignored so newer files still load. A missing file yields
//! defaults; a malformed file logs a warning and also yields defaults: key
//! handling must never be blocked by configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "keyarb.toml";
pub const DEFAULT_CARET_MARKER: char = '|';

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    #[serde(default = "StatusConfig::default_caret_marker")]
    pub caret_marker: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            caret_marker: Self::default_caret_marker(),
        }
    }
}

impl StatusConfig {
    fn default_caret_marker() -> String {
        DEFAULT_CARET_MARKER.to_string()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ArbiterConfig {
    #[serde(default = "ArbiterConfig::default_reserve_insert_tab")]
    pub reserve_insert_tab: bool,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            reserve_insert_tab: Self::default_reserve_insert_tab(),
        }
    }
}

impl ArbiterConfig {
    const fn default_reserve_insert_tab() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub arbiter: ArbiterConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

impl Config {
    /// Effective caret marker. Anything other than exactly one char falls back to
    /// the default `|`.
    pub fn caret_marker(&self) -> char {
        let configured = &self.file.status.caret_marker;
        let mut chars = configured.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => c,
            _ => {
                warn!(
                    target: "config",
                    len = configured.chars().count(),
                    "caret_marker_invalid_using_default"
                );
                DEFAULT_CARET_MARKER
            }
        }
    }

    pub fn reserve_insert_tab(&self) -> bool {
        self.file.arbiter.reserve_insert_tab
    }

    /// Parse config text directly (hosts that embed their own settings store).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file = toml::from_str::<ConfigFile>(content).context("parsing keyarb config")?;
        Ok(Self {
            raw: Some(content.to_string()),
            file,
            source: None,
        })
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("keyarb").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Load from `path`, or from [`discover`] when none is given. Unreadable files
/// yield defaults; only an explicit path that fails to read logs a warning.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            if explicit {
                warn!(target: "config", path = %path.display(), error = %e, "config_unreadable_using_defaults");
            }
            return Ok(Config::default());
        }
    };
    match Config::from_toml_str(&content) {
        Ok(mut cfg) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            cfg.source = Some(path);
            Ok(cfg)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}
