use serde::{Deserialize, Serialize};

use crate::error::{BudgetMapError, Result};

pub const MONTHS_PER_YEAR: usize = 12;

pub const MONTH_LABELS: [&str; MONTHS_PER_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One budget line as supplied by the user: a flat monthly allotment and
/// the actual spend for each calendar month (index 0 = January).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub monthly_budget: f64,
    pub monthly_amount: Vec<f64>,
}

impl BudgetRecord {
    pub fn annual_budget(&self) -> f64 {
        self.monthly_budget * MONTHS_PER_YEAR as f64
    }

    pub fn annual_amount(&self) -> f64 {
        self.monthly_amount.iter().sum()
    }

    /// Boundary check: twelve finite monthly figures and a finite,
    /// non-negative budget. Negative spend is allowed.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| BudgetMapError::InvalidInput {
            name: self.name.clone(),
            reason,
        };
        if self.monthly_amount.len() != MONTHS_PER_YEAR {
            return Err(invalid(format!(
                "expected {MONTHS_PER_YEAR} monthly amounts, found {}",
                self.monthly_amount.len()
            )));
        }
        if !self.monthly_budget.is_finite() || self.monthly_budget < 0.0 {
            return Err(invalid(format!(
                "monthly budget must be a non-negative number, got {}",
                self.monthly_budget
            )));
        }
        if let Some(month) = self.monthly_amount.iter().position(|a| !a.is_finite()) {
            return Err(invalid(format!("amount for {} is not a number", month_label(month))));
        }
        Ok(())
    }
}

/// Full-height column owned by one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBand {
    pub name: String,
    pub description: String,
    pub monthly_budget: f64,
    pub annual_amount: f64,
    pub x_start: f64,
    pub x_length: f64,
    pub y_start: f64,
    pub y_length: f64,
}

/// One category's spend for one month, stacked inside the category's column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSegment {
    pub name: String,
    pub description: String,
    pub monthly_budget: f64,
    pub month: usize,
    pub amount: f64,
    pub x_start: f64,
    pub x_length: f64,
    pub y_start: f64,
    pub y_length: f64,
}

/// All categories' spend for one month, spanning the full chart width.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthAggregate {
    pub name: String,
    pub description: String,
    pub monthly_budget: f64,
    pub month: usize,
    pub amount: f64,
    pub x_start: f64,
    pub x_length: f64,
    pub y_start: f64,
    pub y_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartEntry {
    Breakdown(MonthSegment),
    Aggregate(MonthAggregate),
}

impl ChartEntry {
    pub fn amount(&self) -> f64 {
        match self {
            Self::Breakdown(s) => s.amount,
            Self::Aggregate(a) => a.amount,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate(_))
    }
}

/// Vertical axis bounds needed to show every column, including troughs
/// caused by refunds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VerticalExtent {
    pub highest: f64,
    pub lowest: f64,
}

pub fn month_label(month: usize) -> &'static str {
    MONTH_LABELS.get(month).copied().unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_camel_case() {
        let json = r#"{"name":"Rent","description":"Flat","monthlyBudget":1000,
            "monthlyAmount":[1,2,3,4,5,6,7,8,9,10,11,12]}"#;
        let r: BudgetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.name, "Rent");
        assert_eq!(r.monthly_budget, 1000.0);
        assert_eq!(r.annual_budget(), 12000.0);
        assert_eq!(r.annual_amount(), 78.0);
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let json = r#"{"name":"Food","monthlyBudget":50,"monthlyAmount":[]}"#;
        let r: BudgetRecord = serde_json::from_str(json).unwrap();
        assert!(r.description.is_empty());
    }

    #[test]
    fn test_chart_entry_is_tagged() {
        let entry = ChartEntry::Aggregate(MonthAggregate {
            name: String::new(),
            description: String::new(),
            monthly_budget: 10.0,
            month: 3,
            amount: 5.0,
            x_start: 0.0,
            x_length: 100.0,
            y_start: 0.0,
            y_length: 1.0,
        });
        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["type"], "aggregate");
        assert_eq!(v["month"], 3);
        assert_eq!(v["xLength"], 100.0);
        assert_eq!(entry.amount(), 5.0);
        assert!(entry.is_aggregate());
    }

    fn record(budget: f64, amounts: Vec<f64>) -> BudgetRecord {
        BudgetRecord {
            name: "Fuel".to_string(),
            description: String::new(),
            monthly_budget: budget,
            monthly_amount: amounts,
        }
    }

    #[test]
    fn test_validate_accepts_negative_spend() {
        let mut amounts = vec![10.0; 12];
        amounts[4] = -25.0;
        assert!(record(10.0, amounts).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_month_count() {
        let err = record(10.0, vec![1.0; 11]).validate().unwrap_err();
        assert!(matches!(err, BudgetMapError::InvalidInput { .. }));
        assert!(err.to_string().contains("found 11"));
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        assert!(record(-1.0, vec![0.0; 12]).validate().is_err());
        assert!(record(f64::NAN, vec![0.0; 12]).validate().is_err());
        let mut amounts = vec![0.0; 12];
        amounts[2] = f64::INFINITY;
        let err = record(5.0, amounts).validate().unwrap_err();
        assert!(err.to_string().contains("Mar"));
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(0), "Jan");
        assert_eq!(month_label(11), "Dec");
        assert_eq!(month_label(12), "?");
    }
}
