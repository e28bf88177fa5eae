use super::types::{Model, ModelDocument};
use super::validation::validate_model;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to adopt an externally supplied model.
///
/// Every variant is reported to the user as an invalid configuration; the
/// caller keeps whatever model it had before.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(String),

    #[error("invalid configuration: missing top-level `model` key")]
    MissingModel,

    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Document syntax of a model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// `.json` files are read as JSON, everything else as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Parse and shape-check a model document.
pub fn parse_model(content: &str, format: DocumentFormat) -> Result<Model, ModelError> {
    let document: ModelDocument = match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| ModelError::Parse(e.to_string()))?
        }
        DocumentFormat::Yaml => {
            serde_saphyr::from_str(content).map_err(|e| ModelError::Parse(e.to_string()))?
        }
    };

    let model = document.model.ok_or(ModelError::MissingModel)?;
    validate_model(&model).map_err(ModelError::Invalid)?;

    tracing::debug!(
        dimensions = model.dimensions.len(),
        indicators = model.indicator_count(),
        total_weight = model.total_weight(),
        "parsed model"
    );

    Ok(model)
}

/// Load a model document from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, has no
/// `model` key, or fails shape validation.
pub fn load_model(path: &Path) -> Result<Model, ModelError> {
    let content = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_model(&content, DocumentFormat::from_path(path))
}

/// Serialize a model wrapped in its `model:` document as YAML.
pub fn model_to_yaml(model: &Model) -> Result<String, ModelError> {
    let document = ModelDocument {
        model: Some(model.clone()),
    };
    serde_saphyr::to_string(&document).map_err(|e| ModelError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_model;
    use std::env;

    #[test]
    fn test_parse_yaml_model() {
        let yaml = r#"
model:
  Financial:
    Credit Risk:
      - kpi: "NPL Ratio"
        weight: 0.03
        explanation: "Share of impaired loans"
      - { kpi: "Coverage", weight: 0.02 }
"#;
        let model = parse_model(yaml, DocumentFormat::Yaml).unwrap();
        assert_eq!(model.indicator_count(), 2);
        let entry = model.find("Financial::NPL Ratio").unwrap();
        assert_eq!(entry.indicator.explanation, "Share of impaired loans");
    }

    #[test]
    fn test_parse_json_model() {
        let json = r#"{"model": {"Governance": {"Compliance": [{"kpi": "AML", "weight": 0.02}]}}}"#;
        let model = parse_model(json, DocumentFormat::Json).unwrap();
        assert!(model.contains_key("Governance::AML"));
    }

    #[test]
    fn test_missing_model_key() {
        let result = parse_model(r#"{"dimensions": {}}"#, DocumentFormat::Json);
        assert!(matches!(result, Err(ModelError::MissingModel)));
        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("invalid configuration"));
    }

    #[test]
    fn test_malformed_document() {
        let result = parse_model("{ not json", DocumentFormat::Json);
        assert!(matches!(result, Err(ModelError::Parse(_))));
    }

    #[test]
    fn test_indicator_without_weight_is_rejected() {
        let json = r#"{"model": {"Dim": {"Sub": [{"kpi": "A"}]}}}"#;
        let result = parse_model(json, DocumentFormat::Json);
        assert!(matches!(result, Err(ModelError::Parse(_))));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let json = r#"{"model": {"Dim": {"Sub": [{"kpi": "A", "weight": -0.5}]}}}"#;
        let result = parse_model(json, DocumentFormat::Json);
        assert!(matches!(result, Err(ModelError::Invalid(_))));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("m.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("m.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("m.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("model")), DocumentFormat::Yaml);
    }

    #[test]
    fn test_load_missing_file() {
        let path = env::temp_dir().join("scorecard_test_missing_model.yaml");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(load_model(&path), Err(ModelError::Io { .. })));
    }

    #[test]
    fn test_default_model_yaml_reloads() {
        let model = default_model();
        let yaml = model_to_yaml(&model).unwrap();
        let parsed = parse_model(&yaml, DocumentFormat::Yaml).unwrap();
        assert_eq!(parsed, model);
    }
}
