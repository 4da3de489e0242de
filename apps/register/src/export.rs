//! # Sales Report Export
//!
//! Writes the ledger's report rows to `sales_report_YYYYMMDD_HHMMSS.csv`.
//!
//! ```text
//! Item Name,Quantity,Total Price,Date
//! Choc Chip,3,15.00,2024-05-01 09:15:02
//! Oatmeal,1,4.50,2024-05-01 09:15:02
//! ```
//!
//! Dates are rendered in the register's local time zone. Row order is the
//! core's order: transaction, then line.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use palace_core::ReportRow;

use crate::error::ExportError;

/// CSV header row.
pub const REPORT_HEADER: [&str; 4] = ["Item Name", "Quantity", "Total Price", "Date"];

/// Timestamp format for the Date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// File name for a report generated at `now`.
pub fn report_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("sales_report_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Writes `rows` into a new report file under `dir` and returns its path.
///
/// A report generated in the same second as an earlier one replaces it.
pub fn write_sales_report(
    rows: &[ReportRow],
    dir: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    if !dir.is_dir() {
        return Err(ExportError::MissingDirectory(dir.to_path_buf()));
    }

    let path = dir.join(report_file_name(&now));
    let file = std::fs::File::create(&path)?;
    write_rows(rows, &Local, file)?;

    tracing::info!(?path, rows = rows.len(), "Sales report written");
    Ok(path)
}

/// Writes the header and one record per row, dates rendered in `tz`.
pub fn write_rows<Tz, W>(rows: &[ReportRow], tz: &Tz, writer: W) -> Result<(), ExportError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
    W: io::Write,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(REPORT_HEADER)?;

    for row in rows {
        let quantity = row.quantity.to_string();
        let total = row.line_total.to_string();
        let date = row
            .timestamp
            .with_timezone(tz)
            .format(DATE_FORMAT)
            .to_string();
        csv.write_record([
            row.item_name.as_str(),
            quantity.as_str(),
            total.as_str(),
            date.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use palace_core::Money;

    fn row(name: &str, quantity: i64, cents: i64) -> ReportRow {
        ReportRow {
            item_name: name.to_string(),
            quantity,
            line_total: Money::from_cents(cents),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 9, 15, 2).unwrap(),
        }
    }

    #[test]
    fn test_file_name() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap();
        assert_eq!(report_file_name(&now), "sales_report_20240501_090507.csv");
    }

    #[test]
    fn test_rows_render_in_order() {
        let rows = vec![row("Choc Chip", 3, 1500), row("Oatmeal, Raisin", 1, 450)];
        let mut out = Vec::new();

        write_rows(&rows, &Utc, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Item Name,Quantity,Total Price,Date\n\
             Choc Chip,3,15.00,2024-05-01 09:15:02\n\
             \"Oatmeal, Raisin\",1,4.50,2024-05-01 09:15:02\n"
        );
    }

    #[test]
    fn test_writes_file_into_dir() {
        let dir = tempfile::tempdir().unwrap();
        let now = Local::now();

        let path = write_sales_report(&[row("Choc Chip", 3, 1500)], dir.path(), now).unwrap();

        assert_eq!(path, dir.path().join(report_file_name(&now)));
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), REPORT_HEADER);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "Choc Chip");
        assert_eq!(&records[0][2], "15.00");
    }

    #[test]
    fn test_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("reports");

        let err = write_sales_report(&[], &missing, Local::now()).unwrap_err();
        assert!(matches!(err, ExportError::MissingDirectory(p) if p == missing));
    }
}
