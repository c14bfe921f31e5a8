use tracing::info;

use crate::{
    brightness,
    display::{self, FeatureReportChannel},
    error::{AppError, Result},
};

pub const USAGE: &str = "\
USAGE: lgufb [<brightness>]

EXAMPLE:

  lgufb 80
        Setting display brightness to 80%
";

/// What the positional arguments ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Interactive,
    /// Percentage already capped at 100.
    SetPercent(i64),
}

impl Command {
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        match args {
            [] => Ok(Command::Interactive),
            [percent] => parse_percent(percent.as_ref()).map(Command::SetPercent),
            _ => Err(AppError::Usage),
        }
    }
}

fn parse_percent(arg: &str) -> Result<i64> {
    arg.parse::<i64>()
        .map(|percent| percent.min(100))
        .map_err(|_| AppError::InvalidArgument(arg.to_string()))
}

/// Resolve the command, then open the display only when the arguments are
/// valid.
///
/// `interactive` receives the channel for the zero-argument form; the
/// one-argument form issues a single write. A failed write is reported but
/// does not fail the run.
pub fn run<S, C, F, I>(args: &[S], connect: F, interactive: I) -> Result<()>
where
    S: AsRef<str>,
    C: FeatureReportChannel,
    F: FnOnce() -> Result<C>,
    I: FnOnce(&mut C) -> Result<()>,
{
    let command = Command::from_args(args)?;
    let mut channel = connect()?;

    match command {
        Command::Interactive => interactive(&mut channel),
        Command::SetPercent(percent) => {
            if let Err(err) = set_percent(&mut channel, percent) {
                println!("{}", err.describe());
            }
            Ok(())
        }
    }
}

/// Write the register value for `percent` once.
pub fn set_percent<C>(channel: &mut C, percent: i64) -> Result<u16>
where
    C: FeatureReportChannel + ?Sized,
{
    let value = brightness::from_percent(percent);
    info!(percent, value, "setting brightness");
    display::write_brightness(channel, value)?;
    Ok(value)
}
