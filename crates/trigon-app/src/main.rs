use std::process::ExitCode;

use trigon_engine::core::{run, HarnessConfig};
use trigon_engine::logging::{init_logging, LoggingConfig};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run(&HarnessConfig::default()) {
        Ok(report) => {
            log::info!("exiting after {} frame(s)", report.frames);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
