use std::path::{Path, PathBuf};

use mockseed_generate::output::atomic::write_bytes_atomic;

use crate::CliError;
use crate::pipeline::PipelineConfig;

pub const DEFAULT_CONFIG_FILE: &str = "mockseed.toml";

/// Resolve the config path: an explicit `--config` must exist, the default
/// file is only used when present.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            path.exists().then_some(path)
        }
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<PipelineConfig, CliError> {
    let Some(path) = config_path(explicit) else {
        return Ok(PipelineConfig::default());
    };
    if !path.exists() {
        return Err(CliError::InvalidConfig(format!(
            "config file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&path)?;
    let config: PipelineConfig = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn save_config(path: &Path, config: &PipelineConfig) -> Result<(), CliError> {
    let encoded = toml::to_string_pretty(config)?;
    write_bytes_atomic(path, encoded.as_bytes())?;
    Ok(())
}
