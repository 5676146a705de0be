use std::process::ExitCode;

use clap::Parser;
use moviemeter2chart::{cli::CollectorArgs, logging};

#[tokio::main]
async fn main() -> ExitCode {
    logging::setup_logging();

    let args = CollectorArgs::parse();
    match moviemeter2chart::run_collector(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Error while collecting movies: {}", e);
            ExitCode::FAILURE
        }
    }
}
