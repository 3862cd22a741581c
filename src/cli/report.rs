use chrono::Datelike;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::InputArgs;
use crate::error::Result;
use crate::fmt::{coord, money, percent};
use crate::models::{month_label, ChartEntry};
use crate::reports::{self, LineKind, ReferenceLine};
use crate::settings::load_settings;

fn signed_money(val: f64, symbol: &str) -> Cell {
    let text = money(val, symbol);
    if val < 0.0 {
        Cell::new(text.red())
    } else {
        Cell::new(text.green())
    }
}

pub fn bands(input: &InputArgs) -> Result<()> {
    let settings = load_settings();
    let engine = input.build_engine(&settings)?;
    let cur = &settings.currency;

    let mut table = Table::new();
    table.set_header(vec!["Category", "Monthly Budget", "Annual Amount", "x Start", "x Length"]);
    for band in engine.category_bands() {
        table.add_row(vec![
            Cell::new(&band.name),
            Cell::new(money(band.monthly_budget, cur)),
            Cell::new(money(band.annual_amount, cur)),
            Cell::new(coord(band.x_start)),
            Cell::new(coord(band.x_length)),
        ]);
    }
    println!("Category Bands\n{table}");
    Ok(())
}

/// Categories with any spend (or refund) in a month's group.
fn active_categories(group: &[ChartEntry]) -> usize {
    group
        .iter()
        .filter(|e| !e.is_aggregate() && e.amount() != 0.0)
        .count()
}

pub fn months(input: &InputArgs) -> Result<()> {
    let settings = load_settings();
    let engine = input.build_engine(&settings)?;
    let cur = &settings.currency;
    let grouped = engine.monthly_grouped_data();
    let summary = reports::get_month_summary(&engine);

    let mut table = Table::new();
    table.set_header(vec![
        "Month",
        "Total Budget",
        "Total Amount",
        "Running",
        "Active",
        "y Start",
        "y Length",
    ]);
    for (m, group) in summary.iter().zip(&grouped) {
        let Some(ChartEntry::Aggregate(agg)) = group.last() else {
            continue;
        };
        table.add_row(vec![
            Cell::new(month_label(m.month)),
            Cell::new(money(m.monthly_budget, cur)),
            Cell::new(money(m.amount, cur)),
            Cell::new(money(m.running_amount, cur)),
            Cell::new(active_categories(group)),
            Cell::new(coord(agg.y_start)),
            Cell::new(coord(agg.y_length)),
        ]);
    }
    println!("Monthly Totals\n{table}");
    Ok(())
}

pub fn extent(input: &InputArgs) -> Result<()> {
    let settings = load_settings();
    let engine = input.build_engine(&settings)?;
    let extent = engine.vertical_extent();
    let axis = reports::axis_bounds(extent, engine.canvas(), settings.axis_step)?;

    let mut table = Table::new();
    table.set_header(vec!["", "Value"]);
    table.add_row(vec![Cell::new("Highest"), Cell::new(coord(extent.highest))]);
    table.add_row(vec![Cell::new("Lowest"), Cell::new(coord(extent.lowest))]);
    table.add_row(vec![Cell::new("Axis min"), Cell::new(coord(axis.min))]);
    table.add_row(vec![Cell::new("Axis max"), Cell::new(coord(axis.max))]);
    table.add_row(vec![Cell::new("Tick interval"), Cell::new(coord(axis.interval))]);
    println!("Vertical Extent\n{table}");
    Ok(())
}

pub fn summary(input: &InputArgs) -> Result<()> {
    let settings = load_settings();
    let engine = input.build_engine(&settings)?;
    let cur = &settings.currency;
    let data = reports::get_budget_summary(&engine);

    let mut table = Table::new();
    table.set_header(vec!["Category", "Annual Budget", "Annual Amount", "Left to Spend", "Share"]);
    for item in &data.categories {
        table.add_row(vec![
            Cell::new(&item.name),
            Cell::new(money(item.annual_budget, cur)),
            Cell::new(money(item.annual_amount, cur)),
            signed_money(item.left_to_spend, cur),
            Cell::new(percent(item.budget_share)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(data.total_budget, cur)),
        Cell::new(money(data.total_amount, cur)),
        signed_money(data.left_to_spend, cur),
        Cell::new(""),
    ]);
    println!("Budget Summary\n{table}");
    Ok(())
}

fn line_label(line: &ReferenceLine) -> String {
    match line.kind {
        LineKind::Total => "Total".to_string(),
        LineKind::MonthEnd(m) => format!("End of {}", month_label(m)),
    }
}

pub fn lines(input: &InputArgs, month_end: Option<u32>, current: bool) -> Result<()> {
    let settings = load_settings();
    let engine = input.build_engine(&settings)?;
    let cur = &settings.currency;

    let month = if current {
        Some(chrono::Local::now().month0() as usize)
    } else {
        month_end.map(|m| m as usize - 1)
    };

    let mut all = vec![reports::total_line(&engine)];
    all.extend(month.and_then(|m| reports::month_end_line(&engine, m)));

    let mut table = Table::new();
    table.set_header(vec!["Line", "Height", "Budget", "Amount", "Left to Spend"]);
    for line in &all {
        table.add_row(vec![
            Cell::new(line_label(line)),
            Cell::new(coord(line.height)),
            Cell::new(money(line.budget, cur)),
            Cell::new(money(line.amount, cur)),
            signed_money(line.left_to_spend, cur),
        ]);
    }
    println!("Reference Lines\n{table}");
    Ok(())
}
