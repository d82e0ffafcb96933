//! Pure conversion functions: TOML config structs -> library batches, and
//! date batches -> JSON records.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tenor_batch::Batch;
use tenor_calendar::PeriodUnit;
use tenor_dates::{DateBatch, PeriodBatch};

use crate::config::{DatesToml, OutputToml, PeriodToml};

/// Builds the input [`DateBatch`] from the `[dates]` section.
///
/// Exactly one of `tuples` or `ordinals` must be set.
pub fn build_dates(dates: &DatesToml) -> Result<DateBatch> {
    let batch = match (&dates.tuples, &dates.ordinals) {
        (Some(tuples), None) => DateBatch::from_tuples(tuples).context("invalid [dates].tuples")?,
        (None, Some(ordinals)) => DateBatch::from_ordinals(Batch::from(ordinals.as_slice()))
            .context("invalid [dates].ordinals")?,
        (Some(_), Some(_)) => {
            bail!("[dates] must have exactly one of tuples or ordinals, got both")
        }
        (None, None) => {
            bail!("[dates] must have exactly one of tuples or ordinals, got neither")
        }
    };
    match &dates.shape {
        Some(shape) => batch
            .reshape(shape)
            .with_context(|| format!("cannot reshape {} dates to {shape:?}", batch.len())),
        None => Ok(batch),
    }
}

/// Builds the [`PeriodBatch`] from the `[period]` section, applying CLI
/// overrides. A quantity override is a scalar that broadcasts over all dates.
pub fn build_period(
    period: &PeriodToml,
    unit: Option<PeriodUnit>,
    quantity: Option<i32>,
) -> PeriodBatch {
    let unit = unit.unwrap_or(period.unit);
    match quantity {
        Some(q) => PeriodBatch::new(Batch::scalar(q), unit),
        None => PeriodBatch::new(period.quantities.as_slice(), unit),
    }
}

/// One output row for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRecord {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub ordinal: i32,
    pub day_of_week: i32,
}

/// A [`DateRecord`] with calendar details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectRecord {
    #[serde(flatten)]
    pub date: DateRecord,
    pub day_of_year: i32,
    pub is_end_of_month: bool,
}

/// Flattens a date batch into records in row-major order.
pub fn date_records(dates: &DateBatch) -> Vec<DateRecord> {
    let years = dates.years().to_vec();
    let months = dates.months().to_vec();
    let days = dates.days().to_vec();
    let weekdays = dates.days_of_week().to_vec();
    let ordinals = dates.ordinals().to_vec();
    (0..ordinals.len())
        .map(|i| DateRecord {
            year: years[i],
            month: months[i],
            day: days[i],
            ordinal: ordinals[i],
            day_of_week: weekdays[i],
        })
        .collect()
}

/// Like [`date_records`], with day of year and month-end flags.
pub fn inspect_records(dates: &DateBatch) -> Vec<InspectRecord> {
    let doy = dates.day_of_year().to_vec();
    let eom = dates.is_end_of_month().to_vec();
    date_records(dates)
        .into_iter()
        .zip(doy.into_iter().zip(eom))
        .map(|(date, (day_of_year, is_end_of_month))| InspectRecord {
            date,
            day_of_year,
            is_end_of_month,
        })
        .collect()
}

/// Serializes `records` as a JSON array to `path`, or stdout when `None`.
pub fn write_json<T: Serialize>(
    records: &[T],
    path: Option<&Path>,
    output: &OutputToml,
) -> Result<()> {
    let json = if output.pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
    .context("failed to serialize records")?;

    match path {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write output: {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
