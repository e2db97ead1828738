use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use morse_gpio::{init_logging, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(report) if report.is_clean() => {
            info!(sent = report.sent, "All messages sent");
            ExitCode::SUCCESS
        }
        Ok(report) => {
            warn!(
                sent = report.sent,
                rejected = report.rejected,
                "Some messages were rejected"
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(%err, "Transmission failed");
            ExitCode::FAILURE
        }
    }
}
