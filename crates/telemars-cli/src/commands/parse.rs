//! Parse command implementation.
//!
//! Recovers an audience filter from its label.

use telemars_filters::audience;
use tracing::debug;

use super::{CommandContext, Result};
use crate::output::{format_audience_json, format_audience_table};

/// Executes the parse command.
///
/// # Errors
///
/// Returns `CommandError::Filter` wrapping the parse diagnostic if the label
/// is malformed.
pub fn execute(ctx: &CommandContext, label: &str) -> Result<()> {
    let filter = audience::parse(label)?;
    debug!(label, ?filter, "parsed audience label");

    if ctx.json_output {
        println!("{}", format_audience_json(&filter)?);
    } else if !ctx.quiet {
        print!("{}", format_audience_table(&filter, ctx.use_colors));
    }

    Ok(())
}
