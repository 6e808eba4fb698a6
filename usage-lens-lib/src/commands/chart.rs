use super::Host;
use super::common::{ColorMode, Common, CommonArgs, use_colors};
use crate::Result;
use crate::reports::{generate_console, generate_csv, generate_json};
use crate::usage::apply_filter;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ChartArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Output the chart to the console. This is the default when no other report is requested
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    /// Output the chart data to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output the chart data to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,
}

/// Aggregate the events, apply the series toggles and emit the requested reports
///
/// # Errors
///
/// Returns an error if the events cannot be loaded or aggregated, or a report cannot be written
pub fn process_chart<H: Host>(host: &mut H, args: &ChartArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    let result = common.aggregate()?;
    let state = common.filter_state(&result);
    let view = apply_filter(&result, &state);

    let generating_reports = args.csv.is_some() || args.json.is_some();
    if args.console || !generating_reports {
        let mut console_output = String::new();
        generate_console(&view, use_colors(args.color), &mut console_output)?;
        let _ = write!(common.host().output(), "{console_output}");
    }

    if let Some(filename) = &args.csv {
        let mut csv_output = String::new();
        generate_csv(&view, &mut csv_output)?;
        fs::write(filename, csv_output).into_app_err_with(|| format!("writing CSV report to '{filename}'"))?;
        log::info!("wrote CSV report to '{filename}'");
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(&view, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
        log::info!("wrote JSON report to '{filename}'");
    }

    Ok(())
}
