use std::process::ExitCode;

use clap::Parser;
use moviemeter2chart::{cli::ChartArgs, logging};

fn main() -> ExitCode {
    logging::setup_logging();

    let args = ChartArgs::parse();
    match moviemeter2chart::run_chart(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Error while generating the genre chart: {}", e);
            ExitCode::FAILURE
        }
    }
}
