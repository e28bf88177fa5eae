pub mod bands;
pub mod engine;
pub mod ratings;

pub use bands::{
    clamp_threshold, default_bands, grade_from_score, is_sorted_descending, validate_bands, Band,
    NOT_APPLICABLE,
};
pub use engine::{compute_weighted, DimensionScore, IndicatorContribution, WeightedScore};
pub use ratings::{clamp_rating, Ratings, MAX_RATING, MIN_RATING};
