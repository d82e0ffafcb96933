//! Inspect command: describe the configured dates.

use anyhow::Result;
use tracing::{info, info_span};

use crate::cli::InspectArgs;
use crate::config;
use crate::convert;

/// Run the inspect pipeline.
pub fn run(args: InspectArgs) -> Result<()> {
    let _cmd = info_span!("inspect").entered();
    let config = config::load(&args.config)?;

    let dates = convert::build_dates(&config.dates)?;
    info!(n_dates = dates.len(), shape = ?dates.shape(), "dates loaded");

    let records = convert::inspect_records(&dates);
    let path = args.output.as_deref().or(config.output.path.as_deref());
    convert::write_json(&records, path, &config.output)?;
    if let Some(path) = path {
        info!(path = %path.display(), n_records = records.len(), "output written");
    }
    Ok(())
}
