//! clicktrader - replays recorded clicks to place orders.

use clap::Parser;
use clicktrader::{App, Cli, Settings, logging};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let mut settings = match Settings::load(cli.config.clone()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(positions) = &cli.positions {
        settings.paths.positions_file = positions.clone();
    }

    let _guard = match logging::init(&settings.paths) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: could not open log in {}: {e}", settings.paths.log_dir.display());
            return ExitCode::FAILURE;
        }
    };
    info!("Trading bot started");

    match App::new(settings).run(&cli).await {
        Ok(()) => {
            println!("Operation completed successfully");
            info!("Operation completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
