use std::io::Read;
use std::path::Path;

use regex::Regex;

use crate::error::{BudgetMapError, Result};
use crate::models::{BudgetRecord, MONTHS_PER_YEAR};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a spreadsheet-style amount: `$1,234.50`, `-12`, `(40.00)` for a credit.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace([',', '"', '$', '£', '€'], "");
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

// ---------------------------------------------------------------------------
// Input formats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        match key.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(BudgetMapError::Other(format!("Unknown format: {other}"))),
        }
    }

    /// Pick a format from the file extension, defaulting to JSON.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

pub fn parse_json(content: &str) -> Result<Vec<BudgetRecord>> {
    let records: Vec<BudgetRecord> = serde_json::from_str(content)?;
    Ok(records)
}

/// CSV layout: `name,description,monthly_budget,jan,...,dec` with a header row.
pub fn parse_csv(content: &str) -> Result<Vec<BudgetRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let name = row.get(0).unwrap_or("").to_string();
        let label = if name.is_empty() { format!("row {}", i + 2) } else { name.clone() };
        let invalid = |reason: String| BudgetMapError::InvalidInput {
            name: label.clone(),
            reason,
        };

        let expected = 3 + MONTHS_PER_YEAR;
        if row.len() != expected {
            return Err(invalid(format!("expected {expected} columns, found {}", row.len())));
        }
        // Blank month cells mean no spend; a blank budget is an omission.
        if row[2].trim().is_empty() {
            return Err(invalid("monthly budget is blank".to_string()));
        }
        let monthly_budget = parse_amount(&row[2])
            .ok_or_else(|| invalid(format!("bad monthly budget '{}'", &row[2])))?;
        let monthly_amount = row
            .iter()
            .skip(3)
            .map(|cell| parse_amount(cell).ok_or_else(|| invalid(format!("bad amount '{cell}'"))))
            .collect::<Result<Vec<f64>>>()?;

        records.push(BudgetRecord {
            name,
            description: row[1].to_string(),
            monthly_budget,
            monthly_amount,
        });
    }
    Ok(records)
}

/// Load and validate records from a file, or from stdin when `path` is `-`.
pub fn load_records(path: &Path, format: Option<InputFormat>) -> Result<Vec<BudgetRecord>> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    let format = format.unwrap_or_else(|| InputFormat::detect(path));
    let records = match format {
        InputFormat::Json => parse_json(&content)?,
        InputFormat::Csv => parse_csv(&content)?,
    };
    for record in &records {
        record.validate()?;
    }
    tracing::info!(
        path = %path.display(),
        format = format.key(),
        records = records.len(),
        "loaded budget records"
    );
    Ok(records)
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Keep records named in `only` (all of them when empty) whose name also
/// matches `pattern`. Naming a category that does not exist is an error.
pub fn filter_records(
    records: Vec<BudgetRecord>,
    only: &[String],
    pattern: Option<&str>,
) -> Result<Vec<BudgetRecord>> {
    if let Some(missing) = only.iter().find(|n| !records.iter().any(|r| &r.name == *n)) {
        return Err(BudgetMapError::UnknownCategory(missing.clone()));
    }
    let re = pattern.map(Regex::new).transpose()?;

    let before = records.len();
    let kept: Vec<BudgetRecord> = records
        .into_iter()
        .filter(|r| only.is_empty() || only.contains(&r.name))
        .filter(|r| re.as_ref().map_or(true, |re| re.is_match(&r.name)))
        .collect();

    if kept.is_empty() && before > 0 {
        tracing::warn!(before, ?pattern, "category filter removed every record");
    } else {
        tracing::debug!(before, after = kept.len(), "filtered categories");
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"[
        {"name": "Rent", "description": "Flat", "monthlyBudget": 1000,
         "monthlyAmount": [1000,1000,1000,1000,1000,1000,1000,1000,1000,1000,1000,1000]},
        {"name": "Travel", "description": "Trips", "monthlyBudget": 200,
         "monthlyAmount": [0,0,650,-120,0,900,0,-400,0,0,150,0]}
    ]"#;

    const CSV: &str = "\
name,description,monthly_budget,jan,feb,mar,apr,may,jun,jul,aug,sep,oct,nov,dec
Rent,Flat,\"$1,000.00\",1000,1000,1000,1000,1000,1000,1000,1000,1000,1000,1000,1000
Travel,Trips,200,0,0,650,(120.00),0,900,0,-400,0,0,150,
";

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56"), Some(1234.56));
        assert_eq!(parse_amount("(50.00)"), Some(-50.0));
        assert_eq!(parse_amount("-3"), Some(-3.0));
        assert_eq!(parse_amount("£12"), Some(12.0));
        assert_eq!(parse_amount(""), Some(0.0));
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_parse_json() {
        let records = parse_json(JSON).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].monthly_amount[3], -120.0);
    }

    #[test]
    fn test_parse_csv_matches_json() {
        let from_csv = parse_csv(CSV).unwrap();
        let from_json = parse_json(JSON).unwrap();
        assert_eq!(from_csv, from_json);
    }

    #[test]
    fn test_parse_csv_rejects_short_rows() {
        let csv = "name,description,monthly_budget,jan\nRent,Flat,1000,5\n";
        let err = parse_csv(csv).unwrap_err();
        assert!(matches!(err, BudgetMapError::InvalidInput { .. }));
        assert!(err.to_string().contains("Rent"));
    }

    #[test]
    fn test_parse_csv_rejects_blank_budget() {
        let csv = "name,description,monthly_budget,jan,feb,mar,apr,may,jun,jul,aug,sep,oct,nov,dec\n\
                   Gifts,Presents,  ,0,0,0,0,0,0,0,0,0,0,0,80\n";
        let err = parse_csv(csv).unwrap_err();
        assert!(matches!(err, BudgetMapError::InvalidInput { ref name, .. } if name == "Gifts"));
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(InputFormat::detect(Path::new("budget.CSV")), InputFormat::Csv);
        assert_eq!(InputFormat::detect(Path::new("budget.json")), InputFormat::Json);
        assert_eq!(InputFormat::detect(Path::new("budget")), InputFormat::Json);
        assert_eq!(InputFormat::from_key("CSV").unwrap(), InputFormat::Csv);
        assert!(InputFormat::from_key("xlsx").is_err());
    }

    #[test]
    fn test_load_records_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.csv");
        std::fs::write(&path, CSV).unwrap();
        let records = load_records(&path, None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Rent");
    }

    #[test]
    fn test_load_records_validates_month_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.json");
        std::fs::write(
            &path,
            r#"[{"name":"Rent","description":"","monthlyBudget":10,"monthlyAmount":[1,2,3]}]"#,
        )
        .unwrap();
        let err = load_records(&path, None).unwrap_err();
        assert!(matches!(err, BudgetMapError::InvalidInput { .. }));
    }

    #[test]
    fn test_filter_by_name_and_pattern() {
        let records = parse_json(JSON).unwrap();
        let only = vec!["Travel".to_string()];
        let kept = filter_records(records.clone(), &only, None).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Travel");

        let kept = filter_records(records.clone(), &[], Some("^R")).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Rent");

        let kept = filter_records(records, &[], None).unwrap();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_filter_unknown_category() {
        let records = parse_json(JSON).unwrap();
        let err = filter_records(records, &["Gym".to_string()], None).unwrap_err();
        assert!(matches!(err, BudgetMapError::UnknownCategory(ref n) if n == "Gym"));
    }

    #[test]
    fn test_filter_bad_pattern() {
        let records = parse_json(JSON).unwrap();
        let err = filter_records(records, &[], Some("(")).unwrap_err();
        assert!(matches!(err, BudgetMapError::InvalidPattern(_)));
    }
}
