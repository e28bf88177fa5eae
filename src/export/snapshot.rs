use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scores document offered for download.
///
/// `totalPct` and `finalGrade` are derived values; they are ignored on import
/// and recomputed from `scores`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    pub scores: BTreeMap<String, i64>,
    #[serde(default)]
    pub total_pct: f64,
    #[serde(default)]
    pub final_grade: String,
}

impl ScoreSnapshot {
    /// Project a session into a snapshot. Pure; the session is not touched.
    pub fn from_session(session: &Session) -> Self {
        let result = session.result();
        let total_pct = result.total_pct();
        Self {
            scores: session
                .ratings()
                .iter()
                .map(|(key, rating)| (key.to_string(), i64::from(rating)))
                .collect(),
            total_pct,
            final_grade: crate::scoring::grade_from_score(total_pct, session.bands()).to_string(),
        }
    }
}

pub fn snapshot(session: &Session) -> ScoreSnapshot {
    ScoreSnapshot::from_session(session)
}
