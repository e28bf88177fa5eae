use super::types::{Model, KEY_SEPARATOR};
use std::collections::HashSet;

/// Shape-check a model.
/// Returns all validation errors at once (not just the first).
pub fn validate_model(model: &Model) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (dimension, subcategories) in &model.dimensions {
        if dimension.trim().is_empty() {
            errors.push("model: dimension name must not be empty".to_string());
        } else if dimension.contains(KEY_SEPARATOR) {
            // Keys are "<dimension>::<name>"; a separator in the dimension
            // makes them ambiguous.
            errors.push(format!(
                "model.{}: dimension name must not contain '{}'",
                dimension, KEY_SEPARATOR
            ));
        }

        // Indicator identity is (dimension, name), so names must be unique
        // across all subcategories of a dimension.
        let mut seen = HashSet::new();

        for (subcategory, indicators) in subcategories {
            for (i, indicator) in indicators.iter().enumerate() {
                let path = format!("model.{}.{}[{}]", dimension, subcategory, i);

                if indicator.name.trim().is_empty() {
                    errors.push(format!("{}.kpi: must not be empty", path));
                } else if !seen.insert(indicator.name.as_str()) {
                    errors.push(format!(
                        "{}.kpi: duplicate indicator '{}' in dimension '{}'",
                        path, indicator.name, dimension
                    ));
                }

                if !indicator.weight.is_finite() {
                    errors.push(format!("{}.weight: must be a finite number", path));
                } else if indicator.weight < 0.0 {
                    errors.push(format!(
                        "{}.weight: must be non-negative (got {})",
                        path, indicator.weight
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Indicator, Subcategories};
    use std::collections::BTreeMap;

    fn model_with(indicators: Vec<(&str, Vec<Indicator>)>) -> Model {
        let subs: Subcategories = indicators
            .into_iter()
            .map(|(name, list)| (name.to_string(), list))
            .collect();
        let mut dimensions = BTreeMap::new();
        dimensions.insert("Dim".to_string(), subs);
        Model::new(dimensions)
    }

    #[test]
    fn test_valid_model() {
        let model = model_with(vec![("Sub", vec![Indicator::new("A", 0.1, "")])]);
        assert!(validate_model(&model).is_ok());
    }

    #[test]
    fn test_empty_model_is_valid() {
        assert!(validate_model(&Model::default()).is_ok());
    }

    #[test]
    fn test_zero_weight_is_valid() {
        let model = model_with(vec![("Sub", vec![Indicator::new("A", 0.0, "")])]);
        assert!(validate_model(&model).is_ok());
    }

    #[test]
    fn test_negative_weight() {
        let model = model_with(vec![("Sub", vec![Indicator::new("A", -0.1, "")])]);
        let errors = validate_model(&model).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("model.Dim.Sub[0].weight"));
    }

    #[test]
    fn test_non_finite_weight() {
        let model = model_with(vec![("Sub", vec![Indicator::new("A", f64::NAN, "")])]);
        let errors = validate_model(&model).unwrap_err();
        assert!(errors[0].contains("finite"));
    }

    #[test]
    fn test_duplicate_name_across_subcategories() {
        let model = model_with(vec![
            ("One", vec![Indicator::new("A", 0.1, "")]),
            ("Two", vec![Indicator::new("A", 0.1, "")]),
        ]);
        let errors = validate_model(&model).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("duplicate indicator 'A'"));
    }

    #[test]
    fn test_dimension_with_key_separator_rejected() {
        let mut dimensions = BTreeMap::new();
        dimensions.insert(
            "Risk::Credit".to_string(),
            Subcategories::from([("Sub".to_string(), vec![Indicator::new("NPL", 0.5, "")])]),
        );
        let errors = validate_model(&Model::new(dimensions)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("model.Risk::Credit"));
    }

    #[test]
    fn test_colliding_keys_rejected() {
        // "A" + "B::C" and "A::B" + "C" would both be keyed "A::B::C"
        let mut dimensions = BTreeMap::new();
        dimensions.insert(
            "A".to_string(),
            Subcategories::from([("Sub".to_string(), vec![Indicator::new("B::C", 0.1, "")])]),
        );
        dimensions.insert(
            "A::B".to_string(),
            Subcategories::from([("Sub".to_string(), vec![Indicator::new("C", 0.2, "")])]),
        );
        let errors = validate_model(&Model::new(dimensions)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("must not contain '::'"));
    }

    #[test]
    fn test_indicator_name_may_contain_separator() {
        let model = model_with(vec![("Sub", vec![Indicator::new("B::C", 0.1, "")])]);
        assert!(validate_model(&model).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let model = model_with(vec![(
            "Sub",
            vec![
                Indicator::new("", 0.1, ""),   // Error 1
                Indicator::new("B", -1.0, ""), // Error 2
            ],
        )]);
        let errors = validate_model(&model).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
