//! Immutable-update state container for an interactive scoring session.
//!
//! Every mutation returns a new [`Session`] and leaves the receiver untouched,
//! so a previous snapshot can be kept for undo and the aggregator stays a pure
//! function of the snapshot it is handed.

use crate::model::Model;
use crate::scoring::{compute_weighted, grade_from_score, Band, Ratings, WeightedScore};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    model: Arc<Model>,
    ratings: Ratings,
    bands: Vec<Band>,
}

impl Session {
    /// Start a session with no ratings.
    pub fn new(model: Model, bands: Vec<Band>) -> Self {
        Self {
            model: Arc::new(model),
            ratings: Ratings::new(),
            bands,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn ratings(&self) -> &Ratings {
        &self.ratings
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Clamped rating for an indicator key, 0 if unrated.
    pub fn rating(&self, key: &str) -> u8 {
        self.ratings.get(key)
    }

    /// Rate one indicator. Keys outside the active model are ignored.
    pub fn with_rating(&self, key: &str, rating: i64) -> Self {
        if !self.model.contains_key(key) {
            tracing::debug!(key, "ignoring rating for unknown indicator");
            return self.clone();
        }
        let mut ratings = self.ratings.clone();
        ratings.set(key, rating);
        Self {
            ratings,
            ..self.clone()
        }
    }

    /// Move an indicator's rating up or down, staying within 0-5.
    pub fn with_rating_delta(&self, key: &str, delta: i64) -> Self {
        let current = i64::from(self.rating(key));
        self.with_rating(key, current.saturating_add(delta))
    }

    /// Adopt a new model. Ratings were keyed against the old model, so they reset.
    pub fn with_model(&self, model: Model) -> Self {
        tracing::info!(
            dimensions = model.dimensions.len(),
            indicators = model.indicator_count(),
            "model replaced, ratings cleared"
        );
        Self {
            model: Arc::new(model),
            ratings: Ratings::new(),
            bands: self.bands.clone(),
        }
    }

    /// Clear all ratings.
    pub fn reset(&self) -> Self {
        Self {
            ratings: Ratings::new(),
            ..self.clone()
        }
    }

    pub fn with_bands(&self, bands: Vec<Band>) -> Self {
        Self {
            bands,
            ..self.clone()
        }
    }

    /// Change one band's threshold, clamped into 0-100. Out-of-range index is a no-op.
    pub fn with_band_min(&self, index: usize, min: f64) -> Self {
        self.map_band(index, |band| band.with_min(min))
    }

    /// Rename one band. Out-of-range index is a no-op.
    pub fn with_band_label(&self, index: usize, label: &str) -> Self {
        self.map_band(index, |band| band.with_label(label))
    }

    fn map_band(&self, index: usize, f: impl FnOnce(&Band) -> Band) -> Self {
        let Some(band) = self.bands.get(index) else {
            return self.clone();
        };
        let mut bands = self.bands.clone();
        bands[index] = f(band);
        Self {
            bands,
            ..self.clone()
        }
    }

    /// Replace all ratings with imported scores.
    ///
    /// Values are clamped; keys that do not belong to the active model are dropped.
    pub fn with_imported_scores(&self, scores: &BTreeMap<String, i64>) -> Self {
        let mut ratings = Ratings::new();
        let mut dropped = 0usize;
        for (key, value) in scores {
            if self.model.contains_key(key) {
                ratings.set(key.clone(), *value);
            } else {
                dropped += 1;
                tracing::warn!(key = key.as_str(), "dropping score for indicator not in model");
            }
        }
        tracing::debug!(imported = ratings.len(), dropped, "imported scores");
        Self {
            ratings,
            ..self.clone()
        }
    }

    /// Aggregate the current ratings.
    pub fn result(&self) -> WeightedScore {
        compute_weighted(&self.model, &self.ratings)
    }

    pub fn total_pct(&self) -> f64 {
        self.result().total_pct()
    }

    pub fn grade(&self) -> &str {
        grade_from_score(self.total_pct(), &self.bands)
    }
}
