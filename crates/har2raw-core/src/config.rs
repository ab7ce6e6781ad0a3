use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::import::{ImportOptions, DEFAULT_PROGRESS_INTERVAL};
use crate::message::{BuildOptions, DEFAULT_CHARSET};

/// Global configuration loaded from `~/.config/har2raw/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Har2RawConfig {
    /// Charset assumed for response bodies whose MIME type declares none.
    pub default_charset: String,
    /// Decode and re-encode response bodies using their declared charset.
    pub reencode_response_body: bool,
    /// Drop HTTP/2 pseudo-headers when rebuilding HTTP/1.1 messages.
    pub drop_pseudo_headers: bool,
    /// Successful imports between progress reports (0 = never).
    pub progress_interval: usize,
}

impl Default for Har2RawConfig {
    fn default() -> Self {
        Self {
            default_charset: DEFAULT_CHARSET.to_string(),
            reencode_response_body: true,
            drop_pseudo_headers: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl Har2RawConfig {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            reencode_response_body: self.reencode_response_body,
            default_charset: self.default_charset.clone(),
            drop_pseudo_headers: self.drop_pseudo_headers,
        }
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            build: self.build_options(),
            progress_interval: self.progress_interval,
            abort: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("har2raw")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<Har2RawConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<Har2RawConfig> {
    if !path.exists() {
        let default_cfg = Har2RawConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: Har2RawConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
