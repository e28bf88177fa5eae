use super::ratings::{Ratings, MAX_RATING};
use crate::model::Model;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorContribution {
    pub key: String,
    pub dimension: String,
    pub subcategory: String,
    pub name: String,
    pub weight: f64,
    pub rating: u8,            // Clamped 0-5
    pub contribution: f64,     // weight * rating / 5
}

/// Accumulated score of one dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionScore {
    /// Sum of contributions
    pub score: f64,
    /// Sum of weights
    pub weight: f64,
}

impl DimensionScore {
    /// The dimension's own completion percentage, independent of the others.
    ///
    /// A zero-weight dimension divides by 1, so its percentage is its raw sum.
    pub fn percentage(&self) -> f64 {
        let denominator = if self.weight > 0.0 { self.weight } else { 1.0 };
        self.score / denominator * 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedScore {
    /// Sum of all contributions; not normalized
    pub total: f64,
    pub dimensions: BTreeMap<String, DimensionScore>,
    pub breakdown: Vec<IndicatorContribution>,
}

impl WeightedScore {
    /// Total as a percentage, clamped to 0-100 in case weights sum above 1.
    pub fn total_pct(&self) -> f64 {
        (self.total * 100.0).clamp(0.0, 100.0)
    }

    pub fn dimension(&self, name: &str) -> Option<&DimensionScore> {
        self.dimensions.get(name)
    }
}

/// Aggregate ratings over every indicator of the model.
///
/// Pure: the result depends only on `model` and `ratings`. Ratings for keys
/// outside the model are ignored and out-of-range ratings are clamped.
pub fn compute_weighted(model: &Model, ratings: &Ratings) -> WeightedScore {
    let mut total = 0.0;
    let mut dimensions = BTreeMap::new();
    let mut breakdown = Vec::with_capacity(model.indicator_count());

    for (dimension, subcategories) in &model.dimensions {
        // Every dimension is reported, rated or not
        let dim_score: &mut DimensionScore = dimensions.entry(dimension.clone()).or_default();

        for (subcategory, indicators) in subcategories {
            for indicator in indicators {
                let key = crate::model::indicator_key(dimension, &indicator.name);
                let rating = ratings.get(&key);
                let contribution = indicator.weight * (f64::from(rating) / MAX_RATING as f64);

                total += contribution;
                dim_score.score += contribution;
                dim_score.weight += indicator.weight;

                breakdown.push(IndicatorContribution {
                    key,
                    dimension: dimension.clone(),
                    subcategory: subcategory.clone(),
                    name: indicator.name.clone(),
                    weight: indicator.weight,
                    rating,
                    contribution,
                });
            }
        }
    }

    WeightedScore {
        total,
        dimensions,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_model, Indicator, Subcategories};

    fn sample_model() -> Model {
        let mut financial = Subcategories::new();
        financial.insert(
            "Credit Risk".to_string(),
            vec![Indicator::new("NPL", 0.2, ""), Indicator::new("Coverage", 0.1, "")],
        );
        let mut governance = Subcategories::new();
        governance.insert("Compliance".to_string(), vec![Indicator::new("AML", 0.1, "")]);

        let mut dimensions = BTreeMap::new();
        dimensions.insert("Financial".to_string(), financial);
        dimensions.insert("Governance".to_string(), governance);
        Model::new(dimensions)
    }

    fn rate_all(model: &Model, value: i64) -> Ratings {
        model
            .entries()
            .iter()
            .map(|e| (e.key(), value))
            .collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_all_zero_ratings() {
        let model = default_model();
        let result = compute_weighted(&model, &rate_all(&model, 0));
        assert_eq!(result.total, 0.0);
        assert_eq!(result.total_pct(), 0.0);
    }

    #[test]
    fn test_empty_ratings_same_as_zero() {
        let model = default_model();
        let result = compute_weighted(&model, &Ratings::new());
        assert_eq!(result.total, 0.0);
        assert_eq!(result.breakdown.len(), model.indicator_count());
        assert!(result.breakdown.iter().all(|c| c.rating == 0));
    }

    #[test]
    fn test_all_max_ratings_sum_weights() {
        let model = default_model();
        let result = compute_weighted(&model, &rate_all(&model, 5));
        assert!(approx(result.total, model.total_weight()));
        // Default weights sum to 0.39, so a perfect sheet never reaches 100%
        assert!(approx(result.total_pct(), 39.0));
    }

    #[test]
    fn test_total_pct_clamps_when_weights_exceed_one() {
        let mut subs = Subcategories::new();
        subs.insert(
            "Sub".to_string(),
            vec![Indicator::new("A", 0.8, ""), Indicator::new("B", 0.7, "")],
        );
        let mut dimensions = BTreeMap::new();
        dimensions.insert("Dim".to_string(), subs);
        let model = Model::new(dimensions);

        let result = compute_weighted(&model, &rate_all(&model, 5));
        assert!(approx(result.total, 1.5));
        assert_eq!(result.total_pct(), 100.0);
    }

    #[test]
    fn test_out_of_range_ratings_clamp() {
        let model = sample_model();
        let low = compute_weighted(&model, &rate_all(&model, -1));
        let zero = compute_weighted(&model, &rate_all(&model, 0));
        assert_eq!(low, zero);

        let high = compute_weighted(&model, &rate_all(&model, 6));
        let five = compute_weighted(&model, &rate_all(&model, 5));
        assert_eq!(high, five);
    }

    #[test]
    fn test_contribution_formula() {
        let model = sample_model();
        let ratings: Ratings = vec![("Financial::NPL".to_string(), 3)].into_iter().collect();
        let result = compute_weighted(&model, &ratings);

        // 0.2 * 3/5
        assert!(approx(result.total, 0.12));
        let npl = result.breakdown.iter().find(|c| c.name == "NPL").unwrap();
        assert_eq!(npl.rating, 3);
        assert_eq!(npl.subcategory, "Credit Risk");
        assert!(approx(npl.contribution, 0.12));
    }

    #[test]
    fn test_dimension_scores_and_weights() {
        let model = sample_model();
        let ratings: Ratings = vec![
            ("Financial::NPL".to_string(), 5),
            ("Financial::Coverage".to_string(), 0),
        ]
        .into_iter()
        .collect();
        let result = compute_weighted(&model, &ratings);

        let financial = result.dimension("Financial").unwrap();
        assert!(approx(financial.score, 0.2));
        assert!(approx(financial.weight, 0.3));
        assert!(approx(financial.percentage(), 200.0 / 3.0));

        let governance = result.dimension("Governance").unwrap();
        assert_eq!(governance.score, 0.0);
        assert!(approx(governance.weight, 0.1));
    }

    #[test]
    fn test_dimension_percentage_independent_of_other_dimensions() {
        let model = sample_model();
        let mut ratings = Ratings::new();
        ratings.set("Financial::NPL", 4);
        let before = compute_weighted(&model, &ratings);

        ratings.set("Governance::AML", 5);
        let after = compute_weighted(&model, &ratings);

        assert_eq!(
            before.dimension("Financial").unwrap().percentage(),
            after.dimension("Financial").unwrap().percentage()
        );
        assert_ne!(before.total, after.total);
    }

    #[test]
    fn test_zero_weight_dimension_does_not_divide_by_zero() {
        let mut subs = Subcategories::new();
        subs.insert("Sub".to_string(), vec![Indicator::new("A", 0.0, "")]);
        let mut dimensions = BTreeMap::new();
        dimensions.insert("Empty".to_string(), subs);
        let model = Model::new(dimensions);

        let result = compute_weighted(&model, &rate_all(&model, 5));
        let dim = result.dimension("Empty").unwrap();
        assert_eq!(dim.weight, 0.0);
        assert_eq!(dim.percentage(), 0.0);
        assert!(dim.percentage().is_finite());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let model = sample_model();
        let ratings: Ratings = vec![("Nope::Ghost".to_string(), 5)].into_iter().collect();
        let result = compute_weighted(&model, &ratings);
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn test_empty_model() {
        let result = compute_weighted(&Model::default(), &Ratings::new());
        assert_eq!(result.total, 0.0);
        assert!(result.dimensions.is_empty());
        assert!(result.breakdown.is_empty());
    }
}
