//! Reads the light configuration into a `serde_json::Value` tree, picking
//! the format from the file extension.

use std::path::Path;

use anyhow::{Context, bail};
use serde_json::Value;

/// Parse `path` as TOML when it ends in `.toml`, as JSON otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn load(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse(path, &content)
}

fn parse(path: &Path, content: &str) -> anyhow::Result<Value> {
    let value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(content)
            .with_context(|| format!("failed to parse {} as TOML", path.display()))?,
        Some("json") | None => serde_json::from_str(content)
            .with_context(|| format!("failed to parse {} as JSON", path.display()))?,
        Some(other) => bail!("unsupported configuration format '.{other}'"),
    };
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(value)
}
