use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Endpoint the single model-run request is POSTed to.
pub const RUN_MODEL_PATH: &str = "/run_model";

/// A selectable regression factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorDef {
    pub id: &'static str,
    pub label: &'static str,
}

/// The five-factor set the model service accepts.
pub const FACTORS: &[FactorDef] = &[
    FactorDef {
        id: "mkt_rf",
        label: "市场 (MKT-RF)",
    },
    FactorDef {
        id: "smb",
        label: "规模 (SMB)",
    },
    FactorDef {
        id: "hml",
        label: "价值 (HML)",
    },
    FactorDef {
        id: "rmw",
        label: "盈利 (RMW)",
    },
    FactorDef {
        id: "cma",
        label: "投资 (CMA)",
    },
];

/// Body of the model-run request: the checked factors and the parsed
/// portfolio mapping from the hidden field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunModelRequest {
    pub factors: Vec<String>,
    pub portfolio: BTreeMap<String, f64>,
}

/// Overall regression statistics plus the per-factor coefficient table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelStats {
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub f_statistic: f64,
    pub p_value: f64,
    pub num_observations: u64,
    pub coefficients: Vec<FactorCoefficient>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FactorCoefficient {
    pub factor: String,
    pub coefficient: f64,
    pub std_error: f64,
    pub t_statistic: f64,
    pub p_value: f64,
}

/// Bar-chart series: explanatory power per factor combination. Combination
/// labels arrive newline-joined for multi-line axis rendering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct R2Chart {
    pub factors: Vec<String>,
    pub scores: Vec<f64>,
}

/// True vs. predicted weighted returns over the test date range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineSeriesData {
    pub dates: Vec<String>,
    pub y_true: Vec<f64>,
    pub y_pred: Vec<f64>,
}

/// Per-factor (factor value, excess return) pairs, pre-scaled to basis
/// points by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScatterSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Everything the model service returns for one run. Produced entirely
/// server-side; the UI only renders it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelResult {
    pub stats_data: ModelStats,
    pub r2_chart: R2Chart,
    pub line_chart: LineSeriesData,
    pub scatter: BTreeMap<String, ScatterSeries>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_wire_shape() {
        let request = RunModelRequest {
            factors: vec!["mkt_rf".into(), "smb".into()],
            portfolio: BTreeMap::from([("000001".to_string(), 0.4), ("600519".to_string(), 0.6)]),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"factors":["mkt_rf","smb"],"portfolio":{"000001":0.4,"600519":0.6}}"#
        );
    }

    #[test]
    fn result_deserializes_from_service_payload() {
        let payload = r#"{
            "stats_data": {
                "r_squared": 0.8234,
                "adj_r_squared": 0.8101,
                "f_statistic": 62.3,
                "p_value": 0.00003,
                "num_observations": 340,
                "coefficients": [
                    {"factor": "mkt_rf", "coefficient": 0.912345, "std_error": 0.045678,
                     "t_statistic": 19.97, "p_value": 0.000001}
                ]
            },
            "r2_chart": {"factors": ["mkt_rf", "mkt_rf\nsmb"], "scores": [0.61, 0.74]},
            "line_chart": {"dates": ["2024-01-02", "2024-01-03"],
                           "y_true": [0.001, -0.002], "y_pred": [0.0008, -0.0015]},
            "scatter": {"mkt_rf": {"x": [12.0, -4.0], "y": [9.0, -6.0]}}
        }"#;
        let result: ModelResult = serde_json::from_str(payload).unwrap();
        assert_eq!(result.stats_data.num_observations, 340);
        assert_eq!(result.stats_data.coefficients.len(), 1);
        assert_eq!(result.r2_chart.factors[1], "mkt_rf\nsmb");
        assert_eq!(result.line_chart.dates.len(), 2);
        assert_eq!(result.scatter["mkt_rf"].x, vec![12.0, -4.0]);
    }

    #[test]
    fn factor_ids_are_unique() {
        for (i, a) in FACTORS.iter().enumerate() {
            for b in &FACTORS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
