mod cli;
mod error;
mod fmt;
mod layout;
mod loader;
mod logging;
mod models;
mod reports;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands, ReportCommands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Layout {
            input,
            output,
            compact,
        } => cli::layout::run(&input, output, compact),
        Commands::Report { command } => match command {
            ReportCommands::Bands { input } => cli::report::bands(&input),
            ReportCommands::Months { input } => cli::report::months(&input),
            ReportCommands::Extent { input } => cli::report::extent(&input),
            ReportCommands::Summary { input } => cli::report::summary(&input),
            ReportCommands::Lines {
                input,
                month_end,
                current,
            } => cli::report::lines(&input, month_end, current),
        },
        Commands::Validate { input } => cli::validate::run(&input),
        Commands::Demo { output, csv } => cli::demo::run(output, csv),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Set {
                width,
                height,
                axis_step,
                currency,
            } => cli::config::set(width, height, axis_step, currency),
        },
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
