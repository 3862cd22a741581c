use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid record '{name}': {reason}")]
    InvalidInput { name: String, reason: String },

    #[error("Empty or invalid budget: {0}")]
    DegenerateBudget(String),

    #[error("Invalid canvas size: {width} x {height}")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BudgetMapError>;
