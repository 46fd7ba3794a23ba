//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod draft;
pub mod extract;
pub mod output;
pub mod preprocess;

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use invscan_core::InvscanConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invscan")
        .join("config.json")
}

/// Resolve the config path given on the command line, or the default one.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration. An explicit path must exist; the default path falls
/// back to built-in defaults.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<InvscanConfig> {
    let config = match explicit {
        Some(path) => InvscanConfig::from_file(Path::new(path))?,
        None => InvscanConfig::load_or_default(&default_config_path())?,
    };
    debug!("Using configuration: {:?}", config);
    Ok(config)
}

/// Read recognized text from a file, or from stdin when the path is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(std::fs::read_to_string(path)?)
}
