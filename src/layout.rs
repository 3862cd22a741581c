use std::iter;

use crate::error::{BudgetMapError, Result};
use crate::models::{
    month_label, BudgetRecord, CategoryBand, ChartEntry, MonthAggregate, MonthSegment,
    VerticalExtent, MONTHS_PER_YEAR,
};

const MONTHS: f64 = MONTHS_PER_YEAR as f64;

/// Chart-space size every rectangle is normalized against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(BudgetMapError::InvalidCanvas { width, height });
        }
        Ok(Self { width, height })
    }

    fn area(&self) -> f64 {
        self.width * self.height
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Proportional layout over a fixed snapshot of budget records.
///
/// Each category gets a column whose width is its share of the total budget;
/// each month's spend is stacked inside that column with a height chosen so
/// that rectangle area tracks spend as a share of the total annual budget.
///
/// Construction rejects anything that would divide by zero, so every value
/// returned by the compute methods is finite.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    records: Vec<BudgetRecord>,
    canvas: Canvas,
    total_annual_budget: f64,
    total_annual_amount: f64,
    category_names: Vec<String>,
}

impl LayoutEngine {
    pub fn new(records: Vec<BudgetRecord>, canvas: Canvas) -> Result<Self> {
        if records.is_empty() {
            return Err(BudgetMapError::DegenerateBudget(
                "no budget records".to_string(),
            ));
        }
        for record in &records {
            record.validate()?;
            if record.monthly_budget == 0.0 {
                return Err(BudgetMapError::DegenerateBudget(format!(
                    "category '{}' has a zero monthly budget",
                    record.name
                )));
            }
        }

        let total_annual_budget: f64 = records.iter().map(BudgetRecord::annual_budget).sum();
        let total_annual_amount: f64 = records.iter().map(BudgetRecord::annual_amount).sum();
        if !(total_annual_budget.is_finite() && total_annual_budget > 0.0) {
            return Err(BudgetMapError::DegenerateBudget(format!(
                "total annual budget is {total_annual_budget}"
            )));
        }
        if let Some(record) = records.iter().find(|r| !r.annual_amount().is_finite()) {
            return Err(BudgetMapError::InvalidInput {
                name: record.name.clone(),
                reason: "annual amount is too large to add up".to_string(),
            });
        }
        if !total_annual_amount.is_finite() {
            return Err(BudgetMapError::DegenerateBudget(
                "total annual amount is too large to add up".to_string(),
            ));
        }

        let mut category_names: Vec<String> = Vec::new();
        for record in &records {
            if !category_names.contains(&record.name) {
                category_names.push(record.name.clone());
            }
        }

        let engine = Self {
            records,
            canvas,
            total_annual_budget,
            total_annual_amount,
            category_names,
        };
        engine.ensure_finite()?;

        tracing::debug!(
            records = engine.records.len(),
            categories = engine.category_names.len(),
            total_annual_budget,
            total_annual_amount,
            width = canvas.width,
            height = canvas.height,
            "layout engine ready"
        );
        Ok(engine)
    }

    /// Reject snapshots whose columns round to zero width or whose stacked
    /// heights overflow.
    fn ensure_finite(&self) -> Result<()> {
        let finite = |values: &[f64]| values.iter().all(|v| v.is_finite());

        for record in &self.records {
            let width = self.column_width(record);
            if !(width.is_finite() && width > 0.0) {
                return Err(BudgetMapError::DegenerateBudget(format!(
                    "category '{}' is too small to draw (column width {width})",
                    record.name
                )));
            }
        }
        for s in self.month_segments() {
            if !finite(&[s.x_start, s.x_length, s.y_start, s.y_length]) {
                return Err(BudgetMapError::DegenerateBudget(format!(
                    "category '{}' overflows in {}",
                    s.name,
                    month_label(s.month)
                )));
            }
        }
        for a in self.monthly_aggregates() {
            if !finite(&[a.monthly_budget, a.amount, a.y_start, a.y_length]) {
                return Err(BudgetMapError::DegenerateBudget(format!(
                    "monthly total overflows in {}",
                    month_label(a.month)
                )));
            }
        }
        let extent = self.vertical_extent();
        if !finite(&[extent.highest, extent.lowest]) {
            return Err(BudgetMapError::DegenerateBudget(
                "vertical extent overflows".to_string(),
            ));
        }
        Ok(())
    }

    pub fn records(&self) -> &[BudgetRecord] {
        &self.records
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn total_annual_budget(&self) -> f64 {
        self.total_annual_budget
    }

    pub fn total_annual_amount(&self) -> f64 {
        self.total_annual_amount
    }

    /// Unique category names in first-seen order. Renderers index their
    /// palette by position in this list.
    pub fn category_names(&self) -> &[String] {
        &self.category_names
    }

    fn column_width(&self, record: &BudgetRecord) -> f64 {
        record.monthly_budget / (self.total_annual_budget / MONTHS) * self.canvas.width
    }

    /// Height that gives `amount` its share of the canvas area in a column
    /// of the given width.
    fn area_height(&self, amount: f64, width: f64) -> f64 {
        (amount / self.total_annual_budget) * self.canvas.area() / width
    }

    // -----------------------------------------------------------------------
    // Bands
    // -----------------------------------------------------------------------

    pub fn category_bands(&self) -> Vec<CategoryBand> {
        self.records
            .iter()
            .scan(0.0, |x_cursor, record| {
                let x_start = *x_cursor;
                let x_length = self.column_width(record);
                *x_cursor = x_start + x_length;
                Some(CategoryBand {
                    name: record.name.clone(),
                    description: record.description.clone(),
                    monthly_budget: record.monthly_budget,
                    annual_amount: record.annual_amount(),
                    x_start,
                    x_length,
                    y_start: 0.0,
                    y_length: self.canvas.height,
                })
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Segments
    // -----------------------------------------------------------------------

    /// Record-major list of every (category, month) rectangle. The vertical
    /// cursor restarts at zero for each category.
    pub fn month_segments(&self) -> Vec<MonthSegment> {
        self.records
            .iter()
            .zip(self.category_bands())
            .flat_map(|(record, band)| {
                let (x_start, x_length) = (band.x_start, band.x_length);
                record
                    .monthly_amount
                    .iter()
                    .enumerate()
                    .scan(0.0, move |y_cursor, (month, &amount)| {
                        let y_start = *y_cursor;
                        let y_length = self.area_height(amount, x_length);
                        *y_cursor = y_start + y_length;
                        Some(MonthSegment {
                            name: record.name.clone(),
                            description: record.description.clone(),
                            monthly_budget: record.monthly_budget,
                            month,
                            amount,
                            x_start,
                            x_length,
                            y_start,
                            y_length,
                        })
                    })
            })
            .collect()
    }

    fn segments_by_month(&self) -> Vec<Vec<MonthSegment>> {
        let mut groups: Vec<Vec<MonthSegment>> = vec![Vec::new(); MONTHS_PER_YEAR];
        for segment in self.month_segments() {
            groups[segment.month].push(segment);
        }
        groups
    }

    // -----------------------------------------------------------------------
    // Aggregates
    // -----------------------------------------------------------------------

    fn aggregate_groups(&self, groups: &[Vec<MonthSegment>]) -> Vec<MonthAggregate> {
        groups
            .iter()
            .enumerate()
            .scan(0.0, |y_cursor, (month, segments)| {
                let monthly_budget: f64 = segments.iter().map(|s| s.monthly_budget).sum();
                let amount: f64 = segments.iter().map(|s| s.amount).sum();
                let y_start = *y_cursor;
                let y_length = self.area_height(amount, self.canvas.width);
                *y_cursor = y_start + y_length;
                Some(MonthAggregate {
                    name: String::new(),
                    description: String::new(),
                    monthly_budget,
                    month,
                    amount,
                    x_start: 0.0,
                    x_length: self.canvas.width,
                    y_start,
                    y_length,
                })
            })
            .collect()
    }

    /// One full-width rectangle per month; the cursor carries across
    /// months so the twelve rectangles stack into the year total.
    pub fn monthly_aggregates(&self) -> Vec<MonthAggregate> {
        self.aggregate_groups(&self.segments_by_month())
    }

    /// Twelve groups, each holding that month's segments in record order
    /// followed by the month's aggregate.
    pub fn monthly_grouped_data(&self) -> Vec<Vec<ChartEntry>> {
        let groups = self.segments_by_month();
        let aggregates = self.aggregate_groups(&groups);
        groups
            .into_iter()
            .zip(aggregates)
            .map(|(segments, aggregate)| {
                segments
                    .into_iter()
                    .map(ChartEntry::Breakdown)
                    .chain(iter::once(ChartEntry::Aggregate(aggregate)))
                    .collect()
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Extent
    // -----------------------------------------------------------------------

    pub fn vertical_extent(&self) -> VerticalExtent {
        let mut highest = 0.0_f64;
        let mut lowest = 0.0_f64;
        for record in &self.records {
            let width = self.column_width(record);

            highest = highest.max(self.area_height(record.annual_amount(), width));

            let (_, trough) = record
                .monthly_amount
                .iter()
                .fold((0.0_f64, 0.0_f64), |(running, trough), amount| {
                    let running = running + amount;
                    (running, trough.min(running))
                });
            lowest = lowest.min(self.area_height(trough, width));
        }
        VerticalExtent {
            highest: highest.max(self.canvas.height),
            lowest: lowest.min(0.0),
        }
    }
}
