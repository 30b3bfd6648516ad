use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The total-weight indicator reads "balanced" only within this distance
/// of 1.0.
pub const BALANCE_TOLERANCE: f64 = 1e-3;

/// Larger drift still submits, but only after explicit user confirmation.
pub const SUBMIT_DRIFT_TOLERANCE: f64 = 0.01;

/// One editable row of the portfolio table. The weight stays raw text so
/// that non-numeric input reads as zero rather than as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioRow {
    pub code: String,
    pub weight: String,
}

impl PortfolioRow {
    pub fn new(code: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            weight: weight.into(),
        }
    }
}

/// Parse a weight field; blank or malformed input counts as zero.
pub fn parse_weight(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

/// Visual state of the total-weight indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightBalance {
    Balanced,
    Unbalanced,
}

impl WeightBalance {
    pub fn of(total: f64) -> Self {
        if (total - 1.0).abs() < BALANCE_TOLERANCE {
            Self::Balanced
        } else {
            Self::Unbalanced
        }
    }

    /// CSS classes applied to the total-weight label.
    pub fn indicator_class(&self) -> &'static str {
        match self {
            Self::Balanced => "text-success fw-bold",
            Self::Unbalanced => "text-danger fw-bold",
        }
    }
}

/// Portfolio state derived from the current rows; regenerated in full on
/// every row mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioSummary {
    pub weights: BTreeMap<String, f64>,
    pub total_weight: f64,
}

impl PortfolioSummary {
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn balance(&self) -> WeightBalance {
        WeightBalance::of(self.total_weight)
    }

    /// Weight sum drifted past the submit tolerance; ask before proceeding.
    pub fn needs_confirmation(&self) -> bool {
        (self.total_weight - 1.0).abs() > SUBMIT_DRIFT_TOLERANCE
    }

    /// Serialized form of the mapping, kept in the hidden form field.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.weights).unwrap_or_else(|_| "{}".to_string())
    }

    /// Text of the total-weight indicator.
    pub fn total_label(&self) -> String {
        format!("{:.2}", self.total_weight)
    }
}

/// Build the code → weight mapping from the current rows.
///
/// Rows with a blank code or a weight that parses ≤ 0 are skipped. A later
/// row for a code already seen overwrites the map entry, but its weight
/// still counts toward the total; duplicate rows therefore inflate the sum.
pub fn build_portfolio<'a, I>(rows: I) -> PortfolioSummary
where
    I: IntoIterator<Item = &'a PortfolioRow>,
{
    let mut weights = BTreeMap::new();
    let mut total_weight = 0.0;
    for row in rows {
        let code = row.code.trim();
        let weight = parse_weight(&row.weight);
        if code.is_empty() || weight <= 0.0 {
            continue;
        }
        weights.insert(code.to_string(), weight);
        total_weight += weight;
    }
    PortfolioSummary {
        weights,
        total_weight,
    }
}

/// A named, fixed portfolio template.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub holdings: &'static [(&'static str, f64)],
}

/// Selectable presets, in display order.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "组合A",
        holdings: &[("000001", 0.4), ("600519", 0.3), ("600036", 0.3)],
    },
    Preset {
        name: "组合B",
        holdings: &[("000031", 0.5), ("000078", 0.3), ("000111", 0.2)],
    },
    Preset {
        name: "组合C",
        holdings: &[("000002", 0.33), ("600000", 0.33), ("600104", 0.34)],
    },
];

pub fn preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name == name)
}

/// Rows seeded when the table is still empty once the catalog load settles,
/// so the form is never submittable-but-empty on first load.
pub const DEFAULT_ROWS: &[(&str, f64)] = &[("000002", 0.5), ("600000", 0.3), ("600096", 0.2)];

/// Expand a holdings table into editable rows.
pub fn rows_from_holdings(holdings: &[(&str, f64)]) -> Vec<PortfolioRow> {
    holdings
        .iter()
        .map(|(code, weight)| PortfolioRow::new(*code, weight.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(code: &str, weight: &str) -> PortfolioRow {
        PortfolioRow::new(code, weight)
    }

    #[test]
    fn skips_blank_codes_and_nonpositive_weights() {
        let rows = vec![
            row("000001", "0.4"),
            row("", "0.3"),
            row("   ", "0.2"),
            row("600519", "0"),
            row("600036", "-0.1"),
        ];
        let summary = build_portfolio(&rows);
        assert_eq!(summary.weights.len(), 1);
        assert_relative_eq!(summary.weights["000001"], 0.4);
        assert_relative_eq!(summary.total_weight, 0.4);
    }

    #[test]
    fn nonnumeric_weight_counts_as_zero_and_is_skipped() {
        let rows = vec![row("000001", "abc"), row("600519", "")];
        let summary = build_portfolio(&rows);
        assert!(summary.is_empty());
        assert_eq!(summary.to_json(), "{}");
    }

    #[test]
    fn payload_matches_exactly_the_included_rows() {
        let rows = vec![row("000002", "0.5"), row("600000", "0.3"), row("", "0.9")];
        let summary = build_portfolio(&rows);
        assert_eq!(summary.to_json(), r#"{"000002":0.5,"600000":0.3}"#);
    }

    // Duplicate codes overwrite silently: the map keeps the last row's
    // weight while the total still counts both rows.
    #[test]
    fn duplicate_codes_last_row_wins_total_counts_both() {
        let rows = vec![row("000001", "0.6"), row("000001", "0.4")];
        let summary = build_portfolio(&rows);
        assert_eq!(summary.weights.len(), 1);
        assert_relative_eq!(summary.weights["000001"], 0.4);
        assert_relative_eq!(summary.total_weight, 1.0);
    }

    #[test]
    fn balance_is_strict_within_tolerance() {
        assert_eq!(WeightBalance::of(1.0), WeightBalance::Balanced);
        assert_eq!(WeightBalance::of(1.0005), WeightBalance::Balanced);
        assert_eq!(WeightBalance::of(0.999), WeightBalance::Unbalanced);
        assert_eq!(WeightBalance::of(1.2), WeightBalance::Unbalanced);
    }

    #[test]
    fn balance_is_row_order_independent() {
        let forward = vec![row("a", "0.7"), row("b", "0.3")];
        let backward = vec![row("b", "0.3"), row("a", "0.7")];
        assert_eq!(
            build_portfolio(&forward).balance(),
            build_portfolio(&backward).balance()
        );
        assert_eq!(build_portfolio(&forward).balance(), WeightBalance::Balanced);
    }

    #[test]
    fn indicator_classes() {
        assert_eq!(
            WeightBalance::Balanced.indicator_class(),
            "text-success fw-bold"
        );
        assert_eq!(
            WeightBalance::Unbalanced.indicator_class(),
            "text-danger fw-bold"
        );
    }

    #[test]
    fn preset_a_replaces_rows_and_balances() {
        let preset = preset("组合A").unwrap();
        let rows = rows_from_holdings(preset.holdings);
        let summary = build_portfolio(&rows);
        assert_eq!(summary.weights.len(), 3);
        assert_relative_eq!(summary.weights["000001"], 0.4);
        assert_relative_eq!(summary.weights["600519"], 0.3);
        assert_relative_eq!(summary.weights["600036"], 0.3);
        assert_eq!(summary.total_label(), "1.00");
        assert_eq!(summary.balance(), WeightBalance::Balanced);
    }

    #[test]
    fn unknown_preset_is_none() {
        assert!(preset("组合D").is_none());
    }

    #[test]
    fn confirmation_only_past_submit_tolerance() {
        let near = build_portfolio(&[row("a", "0.995")]);
        assert!(!near.needs_confirmation());
        let off = build_portfolio(&[row("a", "0.98")]);
        assert!(off.needs_confirmation());
    }

    #[test]
    fn default_rows_balance() {
        let summary = build_portfolio(&rows_from_holdings(DEFAULT_ROWS));
        assert_eq!(summary.balance(), WeightBalance::Balanced);
        assert_eq!(summary.weights.len(), 3);
    }
}
