use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MIN_RATING: i64 = 0;
pub const MAX_RATING: i64 = 5;

/// Clamp an arbitrary rating into the 0-5 scale.
pub fn clamp_rating(value: i64) -> u8 {
    // Always fits after clamping
    value.clamp(MIN_RATING, MAX_RATING) as u8
}

/// Sparse indicator key -> rating map. Missing keys read as 0.
///
/// Raw values are kept as given; every read clamps to the 0-5 scale so that
/// out-of-range input from files behaves like the nearest valid rating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ratings(BTreeMap<String, i64>);

impl Ratings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamped rating for a key, 0 if unrated.
    pub fn get(&self, key: &str) -> u8 {
        self.0.get(key).copied().map(clamp_rating).unwrap_or(0)
    }

    /// Store a rating, clamped on entry.
    pub fn set(&mut self, key: impl Into<String>, value: i64) {
        self.0.insert(key.into(), i64::from(clamp_rating(value)));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate keys with their clamped ratings, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(k, v)| (k.as_str(), clamp_rating(*v)))
    }
}

impl FromIterator<(String, i64)> for Ratings {
    /// Collect raw values without clamping; reads still clamp.
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
