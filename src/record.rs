//! Degree-day records derived from climate features.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Datelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::climate::Feature;

/// Mean temperature at or above which no heating is assumed.
pub const BASELINE_TEMP: f64 = 17.0;

/// One report row. Field names double as the report header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "Station")]
    pub station_id: String,
    pub year: String,
    pub month: String,
    pub day: String,
    #[serde(rename = "147")]
    pub adjusted_value: String,
}

impl Observation {
    /// Builds the record for `feature`, or `None` when it carries no temperature.
    ///
    /// # Errors
    ///
    /// A feature with a temperature but a missing or non ISO-8601 `from` is
    /// rejected rather than written with bogus date fields.
    pub fn from_feature(station_id: &str, feature: &Feature) -> Result<Option<Self>> {
        let props = &feature.properties;
        let Some(mean_temp) = props.value else {
            debug!(from = ?props.from, "Feature without value skipped");
            return Ok(None);
        };

        let raw = props
            .from
            .as_deref()
            .ok_or_else(|| anyhow!("Feature with value {mean_temp} has no 'from' timestamp"))?;
        let from = DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Malformed 'from' timestamp '{raw}'"))?;

        Ok(Some(Self {
            station_id: station_id.to_string(),
            year: format!("{:04}", from.year()),
            month: format!("{:02}", from.month()),
            day: format!("{:02}", from.day()),
            adjusted_value: format_decimal(heating_degrees(mean_temp)),
        }))
    }
}

/// Degrees below [`BASELINE_TEMP`], zero when at or above it.
pub fn heating_degrees(mean_temp: f64) -> f64 {
    if mean_temp < BASELINE_TEMP {
        BASELINE_TEMP - mean_temp
    } else {
        0.0
    }
}

/// Digits kept after the decimal point; drops float noise such as `6.800000000000001`.
const DECIMAL_PRECISION: f64 = 1e10;

/// Renders `value` with a decimal comma in its shortest form.
/// Integral values have no fractional part: `7`, not `7,0`.
pub fn format_decimal(value: f64) -> String {
    let rounded = (value * DECIMAL_PRECISION).round() / DECIMAL_PRECISION;
    // -0.0 would print as "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    rounded.to_string().replace('.', ",")
}

/// Inverse of [`format_decimal`].
pub fn parse_decimal(text: &str) -> Result<f64> {
    text.replace(',', ".")
        .parse::<f64>()
        .with_context(|| format!("Invalid decimal '{text}'"))
}

/// Maps features to records in input order, dropping those without a value.
/// Every record is logged as it is produced.
pub fn observations_from_features(
    station_id: &str,
    features: &[Feature],
) -> Result<Vec<Observation>> {
    let mut records = Vec::with_capacity(features.len());

    for feature in features {
        if let Some(record) = Observation::from_feature(station_id, feature)? {
            info!(
                station = %record.station_id,
                year = %record.year,
                month = %record.month,
                day = %record.day,
                adjusted = %record.adjusted_value,
                "Observation"
            );
            records.push(record);
        }
    }

    Ok(records)
}
