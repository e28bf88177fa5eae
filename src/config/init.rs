use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{ensure_parent_dir, get_config_path, Config};
use crate::model::{default_model, model_to_yaml};

const MODEL_FILE_NAME: &str = "model.yaml";

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Write `content` to `path` atomically, creating the parent directory.
fn write_file(path: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}

/// Starter config pointing at a model file next to it.
pub fn starter_config() -> Config {
    Config {
        model_path: Some(PathBuf::from(MODEL_FILE_NAME)),
        ..Config::default()
    }
}

/// Write a starter config and a copy of the built-in model for editing.
///
/// If `config_path` is None, uses the default config path. Existing files are
/// only replaced after confirmation.
pub fn run_init(config_path: Option<PathBuf>) -> Result<()> {
    let config_path = match config_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    let model_path = config_path
        .parent()
        .map(|dir| dir.join(MODEL_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(MODEL_FILE_NAME));

    println!("Scorecard setup");
    println!("===============");
    println!();

    let write_config = !config_path.exists()
        || prompt_yes_no(
            &format!("{} exists. Overwrite?", config_path.display()),
            false,
        )?;
    if write_config {
        let yaml = serde_saphyr::to_string(&starter_config())
            .context("Failed to serialize starter config")?;
        write_file(&config_path, &yaml)?;
        println!("Wrote {}", config_path.display());
    } else {
        println!("Kept {}", config_path.display());
    }

    let write_model = !model_path.exists()
        || prompt_yes_no(
            &format!("{} exists. Overwrite with the built-in model?", model_path.display()),
            false,
        )?;
    if write_model {
        let yaml = model_to_yaml(&default_model()).context("Failed to serialize default model")?;
        write_file(&model_path, &yaml)?;
        println!("Wrote {}", model_path.display());
    } else {
        println!("Kept {}", model_path.display());
    }

    println!();
    println!("Edit the model's weights and the grade bands, then run `scorecard`.");
    Ok(())
}
