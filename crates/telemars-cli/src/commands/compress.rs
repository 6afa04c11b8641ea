//! Compress command implementation.

use telemars_filters::compress::compress;

use super::{CommandContext, Result};

/// Executes the compress command.
pub fn execute(ctx: &CommandContext, values: &[u32]) -> Result<()> {
    let compressed = compress(values.iter().copied());

    if ctx.json_output {
        let output = serde_json::json!({
            "values": values,
            "compressed": compressed,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{compressed}");
    }

    Ok(())
}
