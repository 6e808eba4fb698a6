//! Command dispatch logic for usage-lens

use super::{ChartArgs, InitArgs, SeriesArgs, ValidateArgs, init_config, list_series, process_chart, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "usage-lens", version, author, long_about = None)]
#[command(about = "Chart hourly per-endpoint API usage from request logs")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: UsageSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsageSubcommand {
    /// Aggregate request-log events into an hourly chart
    Chart(Box<ChartArgs>),
    /// List the endpoint series found in request-log events
    Series(Box<SeriesArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        UsageSubcommand::Chart(chart_args) => process_chart(host, chart_args),
        UsageSubcommand::Series(series_args) => list_series(host, series_args),
        UsageSubcommand::Init(init_args) => init_config(host, init_args),
        UsageSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_chart_with_toggles() {
        let cli = Cli::try_parse_from(["usage-lens", "chart", "--events", "-", "-s", "GETa", "--series", "POSTa", "--csv", "out.csv"]).unwrap();
        let UsageSubcommand::Chart(args) = cli.command else {
            panic!("expected the chart subcommand");
        };
        assert_eq!(args.common.series, vec!["GETa", "POSTa"]);
        assert_eq!(args.common.events.as_str(), "-");
        assert!(!args.console);
        assert_eq!(args.csv.as_deref().map(camino::Utf8Path::as_str), Some("out.csv"));
    }

    #[test]
    fn test_parse_rejects_bad_now() {
        assert!(Cli::try_parse_from(["usage-lens", "chart", "--events", "e.json", "--now", "noon"]).is_err());
    }

    #[test]
    fn test_events_is_required() {
        assert!(Cli::try_parse_from(["usage-lens", "series"]).is_err());
    }
}
