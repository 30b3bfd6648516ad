use std::collections::BTreeMap;

use thiserror::Error;

use crate::portfolio::SUBMIT_DRIFT_TOLERANCE;

/// Pre-submit validation failures. The display text doubles as the
/// user-facing alert, so no request is sent when one of these fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("请至少选择一个因子")]
    NoFactors,
    #[error("请添加至少一支股票到投资组合中")]
    EmptyPortfolio,
}

/// Validate a run before any network I/O. Factor emptiness is reported
/// before portfolio emptiness.
pub fn validate_run(
    factors: &[String],
    portfolio: &BTreeMap<String, f64>,
) -> Result<(), ValidationError> {
    if factors.is_empty() {
        return Err(ValidationError::NoFactors);
    }
    if portfolio.is_empty() {
        return Err(ValidationError::EmptyPortfolio);
    }
    Ok(())
}

/// Confirmation prompt shown when the weight sum drifts past the submit
/// tolerance; `None` means submit without asking.
pub fn drift_prompt(total_weight: f64) -> Option<String> {
    if (total_weight - 1.0).abs() > SUBMIT_DRIFT_TOLERANCE {
        Some(format!(
            "投资组合权重总和为 {total_weight:.2}，不等于1.0。是否继续？"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_factors_rejected_first() {
        let err = validate_run(&[], &BTreeMap::new()).unwrap_err();
        assert_eq!(err, ValidationError::NoFactors);
        assert_eq!(err.to_string(), "请至少选择一个因子");
    }

    #[test]
    fn empty_portfolio_rejected() {
        let factors = vec!["mkt_rf".to_string()];
        let err = validate_run(&factors, &BTreeMap::new()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyPortfolio);
        assert_eq!(err.to_string(), "请添加至少一支股票到投资组合中");
    }

    #[test]
    fn well_formed_run_passes() {
        let factors = vec!["mkt_rf".to_string()];
        let portfolio = BTreeMap::from([("000001".to_string(), 1.0)]);
        assert!(validate_run(&factors, &portfolio).is_ok());
    }

    #[test]
    fn drift_prompt_only_past_tolerance() {
        assert_eq!(drift_prompt(1.0), None);
        assert_eq!(drift_prompt(0.995), None);
        let prompt = drift_prompt(1.2).unwrap();
        assert_eq!(prompt, "投资组合权重总和为 1.20，不等于1.0。是否继续？");
    }
}
