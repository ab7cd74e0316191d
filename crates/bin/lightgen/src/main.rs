//! # lightgen
//!
//! Composition root: reads settings and a light configuration, then prints
//! the generated initialization code.
//!
//! ## Responsibilities
//! - Parse settings (CLI argument, env vars, `lightgen.toml`)
//! - Install the log subscriber on stderr
//! - Load the configuration file (`.json` or `.toml`)
//! - Compile it, or print the validated configuration
//! - Write the result to stdout or the configured file
//!
//! ## Dependency rule
//! This is the **only** crate doing IO. No compilation logic belongs here.

mod config;
mod loader;

use anyhow::Context;
use lightgen_app::compiler;
use lightgen_domain::schema::UnitConfig;
use tracing_subscriber::EnvFilter;

use crate::config::{Mode, Settings};

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(std::env::args().nth(1)).context("failed to load settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let raw = loader::load(&settings.input.path)?;
    let rendered = match settings.output.mode {
        Mode::Compile => compiler::compile_value(&raw)?.to_string(),
        Mode::Config => {
            let unit = UnitConfig::validate(&raw)?;
            let mut json = serde_json::to_string_pretty(&unit)?;
            json.push('\n');
            json
        }
    };

    match settings.output_path() {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
