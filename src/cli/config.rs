use crate::error::{BudgetMapError, Result};
use crate::layout::Canvas;
use crate::settings::{load_settings, save_settings, settings_path, Settings};

pub fn show() -> Result<()> {
    let settings = load_settings();
    let json = serde_json::to_string_pretty(&settings)
        .map_err(|e| BudgetMapError::Settings(e.to_string()))?;
    println!("Settings:   {}", settings_path().display());
    println!("{json}");
    Ok(())
}

pub fn apply(
    mut settings: Settings,
    width: Option<f64>,
    height: Option<f64>,
    axis_step: Option<f64>,
    currency: Option<String>,
) -> Result<Settings> {
    if let Some(w) = width {
        settings.canvas_width = w;
    }
    if let Some(h) = height {
        settings.canvas_height = h;
    }
    Canvas::new(settings.canvas_width, settings.canvas_height)?;

    if let Some(step) = axis_step {
        if !(step.is_finite() && step > 0.0) {
            return Err(BudgetMapError::Settings(format!(
                "axis step must be positive, got {step}"
            )));
        }
        settings.axis_step = step;
    }
    if let Some(c) = currency {
        settings.currency = c;
    }
    Ok(settings)
}

pub fn set(
    width: Option<f64>,
    height: Option<f64>,
    axis_step: Option<f64>,
    currency: Option<String>,
) -> Result<()> {
    let settings = apply(load_settings(), width, height, axis_step, currency)?;
    save_settings(&settings)?;
    println!("Saved {}", settings_path().display());
    Ok(())
}
