// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Layers, lowest first: built-in defaults, the TOML config file, then
//! `STUDYMAP_*` environment variables (`__` between section and key, e.g.
//! `STUDYMAP_GENERATION__MODEL`).

use crate::render::DotOptions;
use crate::request::GenerationConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "STUDYMAP";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Hosted model settings
    pub generation: GenerationConfig,
    /// Graphviz output settings
    pub render: DotOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            generation: GenerationConfig::default(),
            render: DotOptions::default(),
        }
    }
}

/// Default config file location
#[must_use]
pub fn default_path() -> PathBuf {
    directories::ProjectDirs::from("com", "hyperpolymath", "studymap")
        .map(|d| d.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("studymap.toml"))
}

/// Load configuration from `path` (or the default location), then the
/// environment. A missing file is not an error.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = path.map_or_else(default_path, Path::to_path_buf);

    let settings = config::Config::builder()
        .add_source(
            config::File::from(path.as_path())
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

    settings
        .try_deserialize()
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

/// Look up a dotted key (`generation.model`) in the effective configuration
pub fn get(config: &Config, key: &str) -> Result<toml::Value> {
    let root = toml::Value::try_from(config).context("Failed to serialize configuration")?;
    key.split('.')
        .try_fold(&root, |value, part| value.get(part))
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))
}

/// Write a dotted key into the config file at `path`, creating it if needed.
///
/// `value` is read as a TOML literal when possible (`96`, `true`, `1.2`),
/// otherwise stored as a string.
pub fn set(path: &Path, key: &str, value: &str) -> Result<()> {
    if !is_known_key(key) {
        anyhow::bail!("Unknown configuration key: {}", key);
    }

    let mut doc: toml::Table = if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        content
            .parse()
            .with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        toml::Table::new()
    };

    let parsed = parse_literal(value);
    let mut parts: Vec<&str> = key.split('.').collect();
    let leaf = parts.pop().unwrap_or(key);

    let mut table = &mut doc;
    for part in parts {
        table = table
            .entry(part)
            .or_insert_with(|| toml::Value::Table(toml::Table::new()))
            .as_table_mut()
            .ok_or_else(|| anyhow::anyhow!("{} is not a table in {}", part, path.display()))?;
    }
    table.insert(leaf.to_string(), parsed);

    // Reject values the loader would not accept
    let _: Config = toml::Value::Table(doc.clone())
        .try_into()
        .with_context(|| format!("Invalid value for {}: {}", key, value))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(&doc).context("Failed to serialize configuration")?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

fn is_known_key(key: &str) -> bool {
    // api_key is skipped when unset, so it is not in the serialized defaults
    key == "generation.api_key" || get(&Config::default(), key).is_ok()
}

fn parse_literal(value: &str) -> toml::Value {
    format!("v = {value}")
        .parse::<toml::Table>()
        .ok()
        .and_then(|mut t| t.remove("v"))
        .unwrap_or_else(|| toml::Value::String(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load(Some(&dir.path().join("absent.toml"))).unwrap();

        assert_eq!(config.render, DotOptions::default());
        assert_eq!(config.generation.top_k, 64);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[render]\ndpi = 96\nrankdir = \"LR\"\n").unwrap();

        let config = load(Some(&path)).unwrap();

        assert_eq!(config.render.dpi, 96);
        assert_eq!(config.render.rankdir, crate::render::RankDir::LeftRight);
        assert_eq!(config.render.size, "50,50!");
    }

    #[test]
    fn test_get_dotted_key() {
        let config = Config::default();

        assert_eq!(get(&config, "render.dpi").unwrap(), toml::Value::Integer(500));
        assert!(get(&config, "render.nope").is_err());
    }

    #[test]
    fn test_set_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        set(&path, "render.dpi", "72").unwrap();
        set(&path, "generation.model", "gemini-test").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.render.dpi, 72);
        assert_eq!(config.generation.model, "gemini-test");
    }

    #[test]
    fn test_set_rejects_unknown_and_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        assert!(set(&path, "render.colour", "red").is_err());
        assert!(set(&path, "render.dpi", "lots").is_err());
        assert!(set(&path, "render.rankdir", "LR]; x [").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_file_with_bad_rankdir_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[render]\nrankdir = \"LR]; x [\"\n").unwrap();

        assert!(load(Some(&path)).is_err());
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(parse_literal("96"), toml::Value::Integer(96));
        assert_eq!(parse_literal("true"), toml::Value::Boolean(true));
        assert_eq!(parse_literal("LR"), toml::Value::String("LR".into()));
        assert_eq!(parse_literal("50,50!"), toml::Value::String("50,50!".into()));
    }
}
