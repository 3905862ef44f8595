// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use crate::config::{self, Config};
use anyhow::Result;
use std::path::Path;

/// Print the effective value of `key`, or write `value` to the config file
pub fn run(key: &str, value: Option<String>, config: &Config, path: &Path) -> Result<()> {
    match value {
        Some(v) => {
            tracing::info!("Setting {} = {}", key, v);
            config::set(path, key, &v)?;
            println!("{} = {} ({})", key, v, path.display());
        }
        None => {
            tracing::debug!("Getting {}", key);
            match config::get(config, key)? {
                toml::Value::String(s) => println!("{s}"),
                toml::Value::Table(t) => print!("{}", toml::to_string_pretty(&t)?),
                other => println!("{other}"),
            }
        }
    }
    Ok(())
}
