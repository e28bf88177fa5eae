use crate::scoring::{default_bands, Band};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User configuration.
///
/// Example YAML:
/// ```yaml
/// model_path: model.yaml
/// theme: auto
/// bands:
///   - { label: "A", min: 85 }
///   - { label: "B", min: 70 }
///   - { label: "C", min: 55 }
///   - { label: "D", min: 40 }
///   - { label: "E", min: 0 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Grade bands, highest threshold first
    #[serde(default = "default_bands")]
    pub bands: Vec<Band>,

    /// Model file to load instead of the built-in model.
    /// Relative paths resolve against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,

    #[serde(default)]
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bands: default_bands(),
            model_path: None,
            theme: Theme::Auto,
        }
    }
}

/// TUI palette selection.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bands.len(), 5);
        assert!(config.model_path.is_none());
        assert_eq!(config.theme, Theme::Auto);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            model_path: Some(PathBuf::from("model.yaml")),
            ..Config::default()
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
theme: light
bands:
  - { label: "Pass", min: 50 }
  - { label: "Fail", min: 0 }
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.bands.len(), 2);
        assert_eq!(config.bands[0].label, "Pass");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []");
        assert!(result.is_err());
    }
}
