use std::path::Path;

use anyhow::{Context, Result};

use lexidx_core::config::{Config, IndexPaths};

/// Load the config at `config_file` (absent files fall back to defaults) and
/// resolve data paths relative to the directory that holds it.
pub fn resolve_paths(config_file: &Path) -> Result<IndexPaths> {
    let config = Config::load_from(config_file)
        .with_context(|| format!("Failed to load configuration from {}", config_file.display()))?;
    let base = match config_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    Ok(config.settings()?.resolve(base))
}
