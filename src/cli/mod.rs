pub mod config;
pub mod demo;
pub mod layout;
pub mod report;
pub mod validate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::layout::{Canvas, LayoutEngine};
use crate::loader::{filter_records, load_records, InputFormat};
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "budgetmap",
    version,
    about = "Lay out annual budget-vs-spend records as a proportional chart."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). BUDGETMAP_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the full chart layout and print it as JSON.
    Layout {
        #[command(flatten)]
        input: InputArgs,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print text reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Check that a budget file loads and lays out cleanly.
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Write a sample budget year to explore budgetmap.
    Demo {
        /// Output path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write CSV instead of JSON
        #[arg(long)]
        csv: bool,
    },
    /// Show or change saved defaults.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Category columns with their horizontal extent.
    Bands {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Monthly totals across all categories.
    Months {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Vertical extent and axis bounds.
    Extent {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Budget vs. spend per category.
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Total and month-end reference lines.
    Lines {
        #[command(flatten)]
        input: InputArgs,
        /// Month (1-12) to draw the month-end line at
        #[arg(long = "month-end", value_parser = clap::value_parser!(u32).range(1..=12))]
        month_end: Option<u32>,
        /// Use the current calendar month for the month-end line
        #[arg(long, conflicts_with = "month_end")]
        current: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the active settings.
    Show,
    /// Update saved settings.
    Set {
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long = "axis-step")]
        axis_step: Option<f64>,
        /// Currency symbol used in reports
        #[arg(long)]
        currency: Option<String>,
    },
}

/// Where the records come from and how to size the canvas.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Budget file (JSON or CSV), or '-' for stdin
    pub file: PathBuf,
    /// Input format: json or csv (default: from extension)
    #[arg(long)]
    pub format: Option<String>,
    /// Only include these categories (repeatable)
    #[arg(long = "only")]
    pub only: Vec<String>,
    /// Only include categories whose name matches this regex
    #[arg(long = "match")]
    pub pattern: Option<String>,
    /// Canvas width (default from settings)
    #[arg(long)]
    pub width: Option<f64>,
    /// Canvas height (default from settings)
    #[arg(long)]
    pub height: Option<f64>,
}

impl InputArgs {
    pub fn canvas(&self, settings: &Settings) -> Result<Canvas> {
        Canvas::new(
            self.width.unwrap_or(settings.canvas_width),
            self.height.unwrap_or(settings.canvas_height),
        )
    }

    pub fn build_engine(&self, settings: &Settings) -> Result<LayoutEngine> {
        let format = self.format.as_deref().map(InputFormat::from_key).transpose()?;
        let records = load_records(&self.file, format)?;
        let records = filter_records(records, &self.only, self.pattern.as_deref())?;
        LayoutEngine::new(records, self.canvas(settings)?)
    }
}
