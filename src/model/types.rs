use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator between dimension and indicator name in an indicator key.
pub const KEY_SEPARATOR: &str = "::";

/// Build the key that identifies an indicator within its dimension.
///
/// Keys are used in ratings maps and in exported score snapshots.
pub fn indicator_key(dimension: &str, name: &str) -> String {
    format!("{}{}{}", dimension, KEY_SEPARATOR, name)
}

/// A leaf-level rated item.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Indicator {
    /// Indicator name, unique within its dimension
    #[serde(rename = "kpi")]
    pub name: String,

    /// Absolute contribution to the 0-1 total when rated 5
    pub weight: f64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub explanation: String,
}

impl Indicator {
    pub fn new(name: impl Into<String>, weight: f64, explanation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            explanation: explanation.into(),
        }
    }
}

/// Subcategory name -> ordered indicators.
pub type Subcategories = BTreeMap<String, Vec<Indicator>>;

/// Nested definition of dimensions -> subcategories -> weighted indicators.
///
/// Example YAML:
/// ```yaml
/// model:
///   Financial Performance:
///     Credit Risk:
///       - { kpi: "Non-Performing Loan Ratio", weight: 0.03 }
///       - kpi: "Provision Coverage"
///         weight: 0.02
///         explanation: "Loan loss reserves relative to impaired loans"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Model {
    pub dimensions: BTreeMap<String, Subcategories>,
}

/// Borrowed view of one indicator together with its position in the hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorEntry<'a> {
    pub dimension: &'a str,
    pub subcategory: &'a str,
    pub indicator: &'a Indicator,
}

impl IndicatorEntry<'_> {
    pub fn key(&self) -> String {
        indicator_key(self.dimension, &self.indicator.name)
    }
}

impl Model {
    pub fn new(dimensions: BTreeMap<String, Subcategories>) -> Self {
        Self { dimensions }
    }

    /// All indicators in display order (dimension, subcategory, then declared order).
    pub fn entries(&self) -> Vec<IndicatorEntry<'_>> {
        self.dimensions
            .iter()
            .flat_map(|(dimension, subcategories)| {
                subcategories.iter().flat_map(move |(subcategory, indicators)| {
                    indicators.iter().map(move |indicator| IndicatorEntry {
                        dimension,
                        subcategory,
                        indicator,
                    })
                })
            })
            .collect()
    }

    pub fn indicator_count(&self) -> usize {
        self.dimensions
            .values()
            .flat_map(|subs| subs.values())
            .map(Vec::len)
            .sum()
    }

    /// Sum of every indicator weight. Not required to be 1.
    pub fn total_weight(&self) -> f64 {
        self.entries().iter().map(|e| e.indicator.weight).sum()
    }

    /// Look up an indicator by its exact key.
    ///
    /// Matches on the whole `dimension::name` pair, so dimension names that
    /// themselves contain the separator still resolve.
    pub fn find(&self, key: &str) -> Option<IndicatorEntry<'_>> {
        self.dimensions.iter().find_map(|(dimension, subcategories)| {
            let name = key
                .strip_prefix(dimension.as_str())?
                .strip_prefix(KEY_SEPARATOR)?;
            subcategories.iter().find_map(|(subcategory, indicators)| {
                indicators
                    .iter()
                    .find(|i| i.name == name)
                    .map(|indicator| IndicatorEntry {
                        dimension,
                        subcategory,
                        indicator,
                    })
            })
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }
}

/// Top-level document wrapping a model, as read from and written to files.
///
/// `model` is optional at the serde level so that a missing key is reported as
/// a configuration error rather than a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ModelDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Model>,
}
