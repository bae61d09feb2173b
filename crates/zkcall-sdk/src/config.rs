// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! CLI/SDK configuration at `~/.zkcall/config.json`.
//!
//! A missing file yields [`Config::default`]; unknown keys in the file are
//! ignored and missing keys take their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const PLACEHOLDER: &str = "PLACEHOLDER";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Native,
    Snarkjs,
}

impl std::str::FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "native" => Ok(BackendKind::Native),
            "snarkjs" => Ok(BackendKind::Snarkjs),
            other => Err(anyhow::anyhow!("unknown backend `{other}` (native | snarkjs)")),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BackendKind::Native => "native",
            BackendKind::Snarkjs => "snarkjs",
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub artifacts_dir: String,
    pub snarkjs_bin: String,
    pub rpc_url: String,
    pub verifier_address: String,
    pub backend: BackendKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artifacts_dir: "artifacts".to_string(),
            snarkjs_bin: "snarkjs".to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            verifier_address: PLACEHOLDER.to_string(),
            backend: BackendKind::Native,
        }
    }
}

impl Config {
    /// Keys accepted by `zkcall config set`
    pub const KEYS: &'static [&'static str] = &[
        "artifacts_dir",
        "snarkjs_bin",
        "rpc_url",
        "verifier_address",
        "backend",
    ];

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "artifacts_dir" => self.artifacts_dir = value.to_string(),
            "snarkjs_bin" => self.snarkjs_bin = value.to_string(),
            "rpc_url" => self.rpc_url = value.to_string(),
            "verifier_address" => self.verifier_address = value.to_string(),
            "backend" => self.backend = value.parse()?,
            other => anyhow::bail!("unknown config key: {other}"),
        }
        Ok(())
    }

    /// `verifier_address`, unless it is still the placeholder
    pub fn verifier_address(&self) -> Option<&str> {
        match self.verifier_address.as_str() {
            "" | PLACEHOLDER => None,
            addr => Some(addr),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".zkcall").join("config.json"))
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("cannot read config at {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("invalid config JSON in {}", path.display()))
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(&config_path()?, config)
}
