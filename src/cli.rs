use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(name = "lgufb")]
#[command(version, about = "Adjust the backlight of an LG UltraFine display")]
pub struct Cli {
    /// Brightness in percent to set before exiting; omit for interactive mode
    #[arg(value_name = "BRIGHTNESS", allow_negative_numbers = true)]
    pub brightness: Vec<String>,

    /// YAML file overriding the display's USB IDs, interface or timeout
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Re-read the display after a failed write instead of keeping the local value
    #[arg(long)]
    pub resync: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::Cli;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn collects_every_positional() {
        let cli = Cli::parse_from(["lgufb", "10", "20", "30"]);
        assert_eq!(cli.brightness, ["10", "20", "30"]);
    }

    #[test]
    fn accepts_negative_percent() {
        let cli = Cli::parse_from(["lgufb", "-5"]);
        assert_eq!(cli.brightness, ["-5"]);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn options_mix_with_positionals() {
        let cli = Cli::parse_from(["lgufb", "-vv", "--resync", "--config", "lg.yml", "80"]);
        assert_eq!(cli.brightness, ["80"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.resync);
        assert_eq!(cli.config.as_deref(), Some("lg.yml".as_ref()));
    }
}
