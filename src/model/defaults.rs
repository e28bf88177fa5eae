use super::types::{Indicator, Model, Subcategories};
use std::collections::BTreeMap;

/// Built-in bank scorecard used when no model file is configured.
///
/// Weights are absolute contributions to the 0-1 total and sum to 0.39.
pub fn default_model() -> Model {
    let mut dimensions = BTreeMap::new();

    dimensions.insert(
        "Financial Performance".to_string(),
        subcategories(vec![
            (
                "Profitability",
                vec![
                    Indicator::new("Return on Assets", 0.03, "Net income relative to average total assets"),
                    Indicator::new("Net Interest Margin", 0.03, "Interest income less interest expense over earning assets"),
                    Indicator::new("Cost-to-Income Ratio", 0.02, "Operating expenses relative to operating income; lower is better"),
                ],
            ),
            (
                "Credit Risk",
                vec![
                    Indicator::new("Non-Performing Loan Ratio", 0.03, "Share of loans 90+ days past due or impaired"),
                    Indicator::new("Provision Coverage", 0.02, "Loan loss reserves relative to non-performing loans"),
                    Indicator::new("Loan Concentration", 0.02, "Exposure to the largest borrowers and sectors"),
                ],
            ),
            (
                "Liquidity",
                vec![
                    Indicator::new("Liquidity Coverage Ratio", 0.02, "High-quality liquid assets over 30-day net outflows"),
                    Indicator::new("Loan-to-Deposit Ratio", 0.02, "Funding of the loan book by customer deposits"),
                ],
            ),
        ]),
    );

    dimensions.insert(
        "Governance".to_string(),
        subcategories(vec![
            (
                "Board Oversight",
                vec![
                    Indicator::new("Board Independence", 0.02, "Share of independent non-executive directors"),
                    Indicator::new("Risk Committee Effectiveness", 0.02, "Frequency and depth of risk committee review"),
                ],
            ),
            (
                "Compliance",
                vec![
                    Indicator::new("Regulatory Findings", 0.03, "Open supervisory findings and their severity"),
                    Indicator::new("AML Controls", 0.02, "Maturity of anti-money-laundering monitoring"),
                ],
            ),
        ]),
    );

    dimensions.insert(
        "Customer & Market".to_string(),
        subcategories(vec![
            (
                "Customer Experience",
                vec![
                    Indicator::new("Net Promoter Score", 0.02, "Customer willingness to recommend"),
                    Indicator::new("Complaint Resolution Time", 0.01, "Median days to close a customer complaint"),
                ],
            ),
            (
                "Market Position",
                vec![
                    Indicator::new("Market Share Growth", 0.02, "Year-over-year change in deposit market share"),
                    Indicator::new("Digital Adoption", 0.02, "Share of active customers using digital channels"),
                ],
            ),
        ]),
    );

    dimensions.insert(
        "Operations".to_string(),
        subcategories(vec![(
            "Resilience",
            vec![
                Indicator::new("System Availability", 0.02, "Uptime of core banking and payment systems"),
                Indicator::new("Incident Recovery", 0.02, "Time to restore service after a major incident"),
            ],
        )]),
    );

    Model::new(dimensions)
}

fn subcategories(entries: Vec<(&str, Vec<Indicator>)>) -> Subcategories {
    entries
        .into_iter()
        .map(|(name, indicators)| (name.to_string(), indicators))
        .collect()
}
