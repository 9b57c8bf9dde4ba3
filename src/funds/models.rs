use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FundtrackError, Result};

/// Payload for registering a fund with the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFund {
    /// Six-digit fund code, e.g. `000001`
    pub code: String,
    pub name: String,
    /// Additional backend-specific fields, sent as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewFund {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_fund_code(&self.code)?;
        if self.name.trim().is_empty() {
            return Err(FundtrackError::Validation(
                "fund name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Buy,
    Sell,
}

/// One buy or sell appended to a fund's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TransactionRecord {
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(FundtrackError::Validation(format!(
                "amount must be a positive number, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

pub fn validate_fund_code(code: &str) -> Result<()> {
    if code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(FundtrackError::Validation(format!(
            "fund code must be six digits, got '{}'",
            code
        )))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_new_fund_flattens_extra() {
        let mut fund = NewFund::new("000001", "Test");
        fund.extra.insert("shares".to_string(), json!(1200.5));
        assert_eq!(
            serde_json::to_value(&fund).unwrap(),
            json!({"code": "000001", "name": "Test", "shares": 1200.5})
        );
    }

    #[test]
    fn test_record_wire_format() {
        let record = TransactionRecord {
            kind: RecordKind::Buy,
            amount: 100.0,
            date: None,
            note: None,
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"type": "buy", "amount": 100.0})
        );
    }

    #[test]
    fn test_validation() {
        assert!(NewFund::new("000001", "华夏成长").validate().is_ok());
        assert!(NewFund::new("00001", "short").validate().is_err());
        assert!(NewFund::new("00000a", "letters").validate().is_err());
        assert!(NewFund::new("000001", "  ").validate().is_err());

        let mut record = TransactionRecord {
            kind: RecordKind::Sell,
            amount: 0.0,
            date: Some("2024-03-01".to_string()),
            note: None,
        };
        assert!(record.validate().is_err());
        record.amount = f64::NAN;
        assert!(record.validate().is_err());
        record.amount = 50.0;
        assert!(record.validate().is_ok());
    }
}
