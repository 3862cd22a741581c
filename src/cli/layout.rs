use std::path::PathBuf;

use serde::Serialize;

use crate::cli::InputArgs;
use crate::error::Result;
use crate::layout::LayoutEngine;
use crate::models::{CategoryBand, ChartEntry, VerticalExtent};
use crate::reports::{axis_bounds, total_line, AxisBounds, ReferenceLine};
use crate::settings::{load_settings, Settings};

/// Everything a renderer needs, in one document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    pub category_names: Vec<String>,
    pub total_annual_budget: f64,
    pub total_annual_amount: f64,
    pub width: f64,
    pub height: f64,
    pub bands: Vec<CategoryBand>,
    pub months: Vec<Vec<ChartEntry>>,
    pub extent: VerticalExtent,
    pub axis: AxisBounds,
    pub total: ReferenceLine,
}

pub fn build_document(engine: &LayoutEngine, settings: &Settings) -> Result<LayoutDocument> {
    let extent = engine.vertical_extent();
    let canvas = engine.canvas();
    Ok(LayoutDocument {
        category_names: engine.category_names().to_vec(),
        total_annual_budget: engine.total_annual_budget(),
        total_annual_amount: engine.total_annual_amount(),
        width: canvas.width,
        height: canvas.height,
        bands: engine.category_bands(),
        months: engine.monthly_grouped_data(),
        extent,
        axis: axis_bounds(extent, canvas, settings.axis_step)?,
        total: total_line(engine),
    })
}

pub fn run(input: &InputArgs, output: Option<PathBuf>, compact: bool) -> Result<()> {
    let settings = load_settings();
    let engine = input.build_engine(&settings)?;
    let doc = build_document(&engine, &settings)?;
    let json = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, format!("{json}\n"))?;
            tracing::info!(path = %path.display(), "wrote layout");
            println!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
