use std::path::PathBuf;

use crate::error::{BudgetMapError, Result};
use crate::models::{BudgetRecord, MONTH_LABELS};

struct DemoCategory {
    name: &'static str,
    description: &'static str,
    monthly_budget: f64,
    spend: [f64; 12],
}

/// A household year: flat bills, seasonal utilities, lumpy holidays with a
/// cancelled-booking refund, and a January clothing return that dips below
/// zero.
const CATEGORIES: &[DemoCategory] = &[
    DemoCategory {
        name: "Rent",
        description: "Two-bed flat",
        monthly_budget: 1200.0,
        spend: [1200.0; 12],
    },
    DemoCategory {
        name: "Groceries",
        description: "Weekly shop and top-ups",
        monthly_budget: 350.0,
        spend: [
            332.18, 341.50, 327.90, 368.25, 349.99, 344.15, 361.40, 372.80, 330.10, 345.72, 358.60, 455.30,
        ],
    },
    DemoCategory {
        name: "Utilities",
        description: "Gas, electricity, water",
        monthly_budget: 160.0,
        spend: [
            245.00, 232.50, 198.40, 150.20, 118.75, 96.30, 92.10, 94.60, 112.40, 151.80, 199.90, 238.45,
        ],
    },
    DemoCategory {
        name: "Transport",
        description: "Season ticket and fuel",
        monthly_budget: 120.0,
        spend: [
            118.00, 118.00, 126.40, 118.00, 131.25, 118.00, 88.00, 64.50, 118.00, 122.10, 118.00, 97.30,
        ],
    },
    DemoCategory {
        name: "Eating Out",
        description: "Restaurants and takeaway",
        monthly_budget: 150.0,
        spend: [
            96.40, 182.15, 120.00, 141.75, 165.30, 210.90, 187.45, 143.20, 118.60, 132.00, 159.85, 264.10,
        ],
    },
    DemoCategory {
        name: "Holidays",
        description: "Flights and accommodation",
        monthly_budget: 250.0,
        spend: [
            0.0, 640.00, 0.0, -180.00, 0.0, 1250.00, 420.00, 0.0, 0.0, 310.00, 0.0, 0.0,
        ],
    },
    DemoCategory {
        name: "Clothing",
        description: "Clothes and shoes",
        monthly_budget: 90.0,
        spend: [
            -62.50, 145.00, 40.00, 85.20, 0.0, 120.75, 38.90, 0.0, 152.30, 60.00, -24.99, 95.00,
        ],
    },
    DemoCategory {
        name: "Gifts",
        description: "Birthdays and holidays",
        monthly_budget: 60.0,
        spend: [
            0.0, 25.00, 40.00, 0.0, 55.00, 0.0, 30.00, 0.0, 0.0, 45.00, 80.00, 395.00,
        ],
    },
];

pub fn demo_records() -> Vec<BudgetRecord> {
    CATEGORIES
        .iter()
        .map(|c| BudgetRecord {
            name: c.name.to_string(),
            description: c.description.to_string(),
            monthly_budget: c.monthly_budget,
            monthly_amount: c.spend.to_vec(),
        })
        .collect()
}

pub fn to_csv(records: &[BudgetRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let months: Vec<String> = MONTH_LABELS.iter().map(|m| m.to_lowercase()).collect();
    let mut header = vec!["name", "description", "monthly_budget"];
    header.extend(months.iter().map(String::as_str));
    writer.write_record(&header)?;

    for r in records {
        let mut row = vec![r.name.clone(), r.description.clone(), r.monthly_budget.to_string()];
        row.extend(r.monthly_amount.iter().map(f64::to_string));
        writer.write_record(&row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| BudgetMapError::Other(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| BudgetMapError::Other(e.to_string()))
}

pub fn run(output: Option<PathBuf>, csv: bool) -> Result<()> {
    let records = demo_records();
    let content = if csv {
        to_csv(&records)?
    } else {
        format!("{}\n", serde_json::to_string_pretty(&records)?)
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, content)?;
            println!("Wrote {} demo categories to {}", records.len(), path.display());
            println!("Try: budgetmap report summary {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
