//! Shift command: apply the configured periods to the configured dates.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use crate::cli::ShiftArgs;
use crate::config;
use crate::convert;

/// Run the shift pipeline.
pub fn run(args: ShiftArgs) -> Result<()> {
    let _cmd = info_span!("shift").entered();
    let config = config::load(&args.config)?;

    let dates = convert::build_dates(&config.dates)?;
    let period = convert::build_period(&config.period, args.unit, args.quantity);
    info!(
        n_dates = dates.len(),
        shape = ?dates.shape(),
        unit = %period.unit(),
        subtract = args.subtract,
        "shifting dates"
    );

    let shifted = if args.subtract {
        &dates - &period
    } else {
        &dates + &period
    };
    let shifted = shifted.context("period arithmetic failed")?;

    let records = convert::date_records(&shifted);
    let path = args.output.as_deref().or(config.output.path.as_deref());
    convert::write_json(&records, path, &config.output)?;
    if let Some(path) = path {
        info!(path = %path.display(), n_records = records.len(), "output written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use tenor_calendar::PeriodUnit;

    use super::*;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("tenor.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    fn args(config: PathBuf, output: PathBuf) -> ShiftArgs {
        ShiftArgs {
            config,
            unit: None,
            quantity: None,
            subtract: false,
            output: Some(output),
        }
    }

    fn read_days(path: &Path) -> Vec<(i64, i64, i64)> {
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        json.as_array()
            .unwrap()
            .iter()
            .map(|r| {
                (
                    r["year"].as_i64().unwrap(),
                    r["month"].as_i64().unwrap(),
                    r["day"].as_i64().unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn subtracts_months_with_clamping() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            "[dates]\ntuples = [[2020, 3, 15], [2020, 3, 31]]\n\
             [period]\nunit = \"month\"\nquantities = [2, 1]\n",
        );
        let out = dir.path().join("out.json");
        let mut a = args(config, out.clone());
        a.subtract = true;
        run(a).unwrap();
        assert_eq!(read_days(&out), vec![(2020, 1, 15), (2020, 2, 29)]);
    }

    #[test]
    fn cli_overrides_replace_period() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            "[dates]\ntuples = [[2020, 1, 31], [2021, 1, 31]]\n\
             [period]\nunit = \"day\"\nquantities = [5, 6]\n",
        );
        let out = dir.path().join("out.json");
        let mut a = args(config, out.clone());
        a.unit = Some(PeriodUnit::Year);
        a.quantity = Some(1);
        run(a).unwrap();
        assert_eq!(read_days(&out), vec![(2021, 1, 31), (2022, 1, 31)]);
    }

    #[test]
    fn arithmetic_errors_carry_context() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            "[dates]\nordinals = [1]\n[period]\nquantities = [-1]\n",
        );
        let err = run(args(config, dir.path().join("out.json"))).unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "period arithmetic failed: invalid ordinal: 0 (must be 1..=2147483647)"
        );
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            "[dates]\nordinals = [1, 2]\n[period]\nquantities = [1, 2, 3]\n",
        );
        let err = run(args(config, dir.path().join("out.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("not broadcast-compatible"), "{err:#}");
    }
}
