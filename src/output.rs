//! Semicolon-delimited degree-day report.
//!
//! The file has the fixed header `Station;year;month;day;147` followed by one
//! row per observation, in the order given.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::path::Path;
use tracing::debug;

use crate::record::Observation;
use crate::settings::REPORT_HEADER;

const DELIMITER: u8 = b';';

/// Name of the report for a run started at `now`: `<YYYY-MM-DD_HHMMSS>_Graddage.csv`.
pub fn report_file_name(now: NaiveDateTime) -> String {
    format!("{}_Graddage.csv", now.format("%Y-%m-%d_%H%M%S"))
}

/// Writes the report to `path`, replacing any existing file.
///
/// The header is written even when there are no records.
pub fn write_report(path: &Path, records: &[Observation]) -> Result<()> {
    debug!(path = %path.display(), rows = records.len(), "Writing report");

    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Cannot create report {}", path.display()))?;

    writer.write_record(REPORT_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Reads the data rows of a report written by [`write_report`].
pub fn read_report(path: &Path) -> Result<Vec<Observation>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .from_path(path)
        .with_context(|| format!("Cannot open report {}", path.display()))?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let record: Observation = result?;
        rows.push(record);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    fn observation(day: &str, adjusted: &str) -> Observation {
        Observation {
            station_id: "607400".to_string(),
            year: "2024".to_string(),
            month: "05".to_string(),
            day: day.to_string(),
            adjusted_value: adjusted.to_string(),
        }
    }

    #[test]
    fn test_report_file_name() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(7, 5, 9)
            .unwrap();
        assert_eq!(report_file_name(now), "2024-06-01_070509_Graddage.csv");
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_report(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Station;year;month;day;147\n");
        assert!(read_report(&path).unwrap().is_empty());
    }

    #[test]
    fn test_report_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        let records = vec![
            observation("01", "6,8"),
            observation("02", "0"),
            observation("04", "12,25"),
        ];
        write_report(&path, &records).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Station;year;month;day;147",
                "607400;2024;05;01;6,8",
                "607400;2024;05;02;0",
                "607400;2024;05;04;12,25",
            ]
        );
        assert_eq!(read_report(&path).unwrap(), records);
    }

    #[test]
    fn test_write_report_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        write_report(&path, &[observation("01", "1"), observation("02", "2")]).unwrap();
        write_report(&path, &[observation("03", "3")]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
    }
}
