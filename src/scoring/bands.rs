use serde::{Deserialize, Serialize};

/// Label returned when there are no bands to grade against.
pub const NOT_APPLICABLE: &str = "N/A";

pub const MIN_THRESHOLD: f64 = 0.0;
pub const MAX_THRESHOLD: f64 = 100.0;

/// Grade band: scores at or above `min` percent earn `label`.
///
/// Example YAML:
/// ```yaml
/// bands:
///   - { label: "A", min: 85 }
///   - { label: "B", min: 70 }
///   - { label: "E", min: 0 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Band {
    pub label: String,
    pub min: f64,
}

impl Band {
    /// Create a band, clamping the threshold into 0-100.
    pub fn new(label: impl Into<String>, min: f64) -> Self {
        Self {
            label: label.into(),
            min: clamp_threshold(min),
        }
    }

    pub fn with_min(&self, min: f64) -> Self {
        Self::new(self.label.clone(), min)
    }

    pub fn with_label(&self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            min: self.min,
        }
    }

    pub fn clamped(self) -> Self {
        Self::new(self.label, self.min)
    }
}

/// Clamp a threshold into 0-100. Non-finite input becomes 0.
pub fn clamp_threshold(min: f64) -> f64 {
    if min.is_finite() {
        min.clamp(MIN_THRESHOLD, MAX_THRESHOLD)
    } else {
        MIN_THRESHOLD
    }
}

pub fn default_bands() -> Vec<Band> {
    vec![
        Band::new("A", 85.0),
        Band::new("B", 70.0),
        Band::new("C", 55.0),
        Band::new("D", 40.0),
        Band::new("E", 0.0),
    ]
}

/// Map a percentage to a grade label.
///
/// Bands are scanned in the order given and the first band whose `min` is met
/// wins. The caller keeps bands sorted descending by `min`; an unsorted list
/// is graded as-is. Falls back to the last band's label when nothing matches
/// and to [`NOT_APPLICABLE`] when there are no bands.
pub fn grade_from_score(percentage: f64, bands: &[Band]) -> &str {
    bands
        .iter()
        .find(|band| band.min <= percentage)
        .or_else(|| bands.last())
        .map(|band| band.label.as_str())
        .unwrap_or(NOT_APPLICABLE)
}

/// True when thresholds never increase from one band to the next.
pub fn is_sorted_descending(bands: &[Band]) -> bool {
    bands.windows(2).all(|pair| pair[0].min >= pair[1].min)
}

/// Validate band configuration at startup.
/// Returns all validation errors at once (not just the first).
///
/// Ordering is not an error here; see [`is_sorted_descending`].
pub fn validate_bands(bands: &[Band]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (i, band) in bands.iter().enumerate() {
        if band.label.trim().is_empty() {
            errors.push(format!("bands[{}].label: must not be empty", i));
        }
        if !band.min.is_finite() {
            errors.push(format!("bands[{}].min: must be a finite number", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
