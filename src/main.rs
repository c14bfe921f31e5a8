mod brightness;
mod cli;
mod config;
mod control_loop;
mod dispatch;
mod display;
mod error;
mod steps;
mod terminal;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use cli::Cli;
use config::DeviceConfig;
use control_loop::{ControlLoop, FireAndForget, Resynchronize, TransferErrorPolicy};
use display::UltraFineDisplay;
use error::{AppError, Result};
use terminal::Terminal;

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logs(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Usage) => {
            print!("{}", dispatch::USAGE);
            ExitCode::FAILURE
        }
        Err(err) => {
            println!("{}", err.describe());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    dispatch::run(
        cli.brightness.as_slice(),
        || {
            let config = match &cli.config {
                Some(path) => DeviceConfig::load(path)?,
                None => DeviceConfig::default(),
            };
            debug!(?config, "connecting");
            UltraFineDisplay::connect(&config)
        },
        |display: &mut UltraFineDisplay| {
            let policy: Box<dyn TransferErrorPolicy> = if cli.resync {
                Box::new(Resynchronize)
            } else {
                Box::new(FireAndForget)
            };
            let mut terminal = Terminal::new()?;
            let last = ControlLoop::new(display, &mut terminal, policy).run()?;
            debug!(last, "left control loop");
            Ok(())
        },
    )
}

fn setup_logs(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
