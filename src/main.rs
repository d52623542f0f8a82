use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use model_info::cli::{inspect, normalize_args, Cli, LookupError};
use model_info::InspectConfig;

fn main() -> Result<ExitCode> {
    // Initialize logging; reports own stdout, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "model_info=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    let config = InspectConfig::from(cli);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match inspect(&config, &mut out) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => match err.downcast_ref::<LookupError>() {
            Some(lookup) => {
                writeln!(out, "{}", lookup)?;
                Ok(ExitCode::from(1))
            }
            None => Err(err),
        },
    }
}
