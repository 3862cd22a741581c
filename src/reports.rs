use serde::Serialize;

use crate::error::{BudgetMapError, Result};
use crate::layout::{Canvas, LayoutEngine};
use crate::models::{VerticalExtent, MONTHS_PER_YEAR};

// ---------------------------------------------------------------------------
// Budget summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub name: String,
    pub description: String,
    pub annual_budget: f64,
    pub annual_amount: f64,
    pub left_to_spend: f64,
    pub budget_share: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub categories: Vec<CategorySummary>,
    pub total_budget: f64,
    pub total_amount: f64,
    pub left_to_spend: f64,
}

pub fn get_budget_summary(engine: &LayoutEngine) -> BudgetSummary {
    let total_budget = engine.total_annual_budget();
    let total_amount = engine.total_annual_amount();
    let categories = engine
        .records()
        .iter()
        .map(|r| {
            let annual_budget = r.annual_budget();
            let annual_amount = r.annual_amount();
            CategorySummary {
                name: r.name.clone(),
                description: r.description.clone(),
                annual_budget,
                annual_amount,
                left_to_spend: annual_budget - annual_amount,
                budget_share: annual_budget / total_budget,
            }
        })
        .collect();

    BudgetSummary {
        categories,
        total_budget,
        total_amount,
        left_to_spend: total_budget - total_amount,
    }
}

// ---------------------------------------------------------------------------
// Monthly totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month: usize,
    /// Raw sum of every category's monthly budget.
    pub monthly_budget: f64,
    pub amount: f64,
    pub running_amount: f64,
    pub running_budget: f64,
}

pub fn get_month_summary(engine: &LayoutEngine) -> Vec<MonthSummary> {
    let mut running_amount = 0.0f64;
    let mut running_budget = 0.0f64;
    engine
        .monthly_aggregates()
        .into_iter()
        .map(|agg| {
            running_amount += agg.amount;
            running_budget += agg.monthly_budget;
            MonthSummary {
                month: agg.month,
                monthly_budget: agg.monthly_budget,
                amount: agg.amount,
                running_amount,
                running_budget,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Reference lines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineKind {
    Total,
    MonthEnd(usize),
}

/// Horizontal full-width marker comparing budget to date against spend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLine {
    pub kind: LineKind,
    pub height: f64,
    pub budget: f64,
    pub amount: f64,
    pub left_to_spend: f64,
}

fn line_at(engine: &LayoutEngine, kind: LineKind, budget: f64) -> ReferenceLine {
    let amount = engine.total_annual_amount();
    ReferenceLine {
        kind,
        height: budget / engine.total_annual_budget() * engine.canvas().height,
        budget,
        amount,
        left_to_spend: budget - amount,
    }
}

pub fn total_line(engine: &LayoutEngine) -> ReferenceLine {
    line_at(engine, LineKind::Total, engine.total_annual_budget())
}

/// Budget accrued through the end of `month` (0-based). Months past
/// December have no line.
pub fn month_end_line(engine: &LayoutEngine, month: usize) -> Option<ReferenceLine> {
    if month >= MONTHS_PER_YEAR {
        return None;
    }
    let budget = engine.total_annual_budget() / MONTHS_PER_YEAR as f64 * (month + 1) as f64;
    Some(line_at(engine, LineKind::MonthEnd(month), budget))
}

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
    pub interval: f64,
}

/// Round the extent outward to whole `step`s; ticks fall once per month of
/// nominal height.
pub fn axis_bounds(extent: VerticalExtent, canvas: Canvas, step: f64) -> Result<AxisBounds> {
    if !(step.is_finite() && step > 0.0) {
        return Err(BudgetMapError::Settings(format!(
            "axis step must be positive, got {step}"
        )));
    }
    Ok(AxisBounds {
        min: (extent.lowest / step).floor() * step,
        max: (extent.highest / step).ceil() * step,
        interval: canvas.height / MONTHS_PER_YEAR as f64,
    })
}
