use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// List every series found in the events, in legend order, marking the toggled ones
///
/// # Errors
///
/// Returns an error if the events cannot be loaded or aggregated
pub fn list_series<H: Host>(host: &mut H, args: &SeriesArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    let result = common.aggregate()?;
    let state = common.filter_state(&result);
    let options = state.options(&result.registry);

    let mut out = common.host().output();
    if options.is_empty() {
        let _ = writeln!(out, "No endpoints recorded");
        return Ok(());
    }

    let key_width = options.iter().map(|o| o.key.as_str().len()).max().unwrap_or(0);
    for option in &options {
        let mark = if option.active { 'x' } else { ' ' };
        let _ = writeln!(
            out,
            "[{mark}] {:>2}  {:<key_width$}  {}",
            option.color_slot,
            option.key.as_str(),
            option.label
        );
    }

    Ok(())
}
