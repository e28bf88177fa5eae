pub mod init;
mod schema;

pub use schema::{Config, Theme};

use crate::model::{default_model, load_model, Model, ModelError};
use crate::scoring::validate_bands;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/scorecard/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("scorecard"))
}

/// Get the default config file path (~/.config/scorecard/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Ensure the directory holding `path` exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory at {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/scorecard/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing default config file is not an error; built-in defaults are used.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let mut config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    // Checked before clamping, which would turn non-finite thresholds into 0
    if let Err(errors) = validate_bands(&config.bands) {
        anyhow::bail!(
            "Invalid bands in {}:\n  - {}",
            config_path.display(),
            errors.join("\n  - ")
        );
    }

    // Out-of-range thresholds are clamped rather than rejected
    config.bands = config.bands.into_iter().map(|band| band.clamped()).collect();

    // Relative model paths are relative to the config file
    if let Some(model_path) = config.model_path.take() {
        let resolved = if model_path.is_relative() {
            config_path
                .parent()
                .map(|dir| dir.join(&model_path))
                .unwrap_or(model_path)
        } else {
            model_path
        };
        config.model_path = Some(resolved);
    }

    tracing::debug!(path = %config_path.display(), bands = config.bands.len(), "loaded config");
    Ok(config)
}

/// Pick the model to start with: command-line override, then the configured
/// model file, then the built-in model.
pub fn resolve_model(config: &Config, override_path: Option<&Path>) -> Result<Model, ModelError> {
    match override_path.or(config.model_path.as_deref()) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading model file");
            load_model(path)
        }
        None => Ok(default_model()),
    }
}
