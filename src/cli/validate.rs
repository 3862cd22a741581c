use crate::cli::InputArgs;
use crate::error::Result;
use crate::fmt::money;
use crate::settings::load_settings;

pub fn run(input: &InputArgs) -> Result<()> {
    let settings = load_settings();
    let engine = input.build_engine(&settings)?;
    let cur = &settings.currency;

    println!("File:        {}", input.file.display());
    println!("Records:     {}", engine.records().len());
    println!("Categories:  {}", engine.category_names().len());
    println!("Budget:      {}", money(engine.total_annual_budget(), cur));
    println!("Spent:       {}", money(engine.total_annual_amount(), cur));

    let refunds = engine
        .records()
        .iter()
        .filter(|r| r.monthly_amount.iter().any(|a| *a < 0.0))
        .count();
    if refunds > 0 {
        println!("Refunds:     {refunds} categories with negative months");
    }
    println!("OK");
    Ok(())
}
