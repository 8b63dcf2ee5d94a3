//! Spreadsheet import and export.
//!
//! Payroll reports, the employee list and the attendance log are exported as
//! CSV. Employees can be bulk-imported from a CSV file with `name` and `rate`
//! columns (the Russian headers `Имя` and `Ставка` are accepted as well).

use std::io::Cursor;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use csv::{ReaderBuilder, StringRecord, Writer};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::calculation::validate_new_employee;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Employee, NewEmployee, PayrollReport};

/// MIME type of every export produced here.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

const NAME_HEADERS: [&str; 2] = ["name", "имя"];
const RATE_HEADERS: [&str; 2] = ["rate", "ставка"];

const DATE_FORMAT: &str = "%d.%m.%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Which payroll sheet to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayrollSheet {
    /// One row per employee with totals.
    Summary,
    /// One row per completed shift.
    Shifts,
}

/// Returns the download file name for a payroll export.
///
/// ```
/// use timeclock_engine::export::{payroll_filename, PayrollSheet};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
/// assert_eq!(
///     payroll_filename(start, end, PayrollSheet::Summary),
///     "payroll_report_2024-03-01_2024-03-31.csv"
/// );
/// ```
pub fn payroll_filename(start: NaiveDate, end: NaiveDate, sheet: PayrollSheet) -> String {
    let suffix = match sheet {
        PayrollSheet::Summary => "",
        PayrollSheet::Shifts => "_shifts",
    };
    format!(
        "payroll_report_{}_{}{}.csv",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d"),
        suffix
    )
}

/// Rounds an amount to two decimal places, halves away from zero, and
/// formats it with exactly two decimals.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Writes the payroll summary sheet: one row per employee.
pub fn summary_csv(report: &PayrollReport) -> EngineResult<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    write_row(&mut writer, &["employee", "rate", "total_hours", "total_pay"])?;

    for row in &report.rows {
        write_row(
            &mut writer,
            &[
                row.employee.name.clone(),
                row.employee.rate.normalize().to_string(),
                format_amount(row.total_hours),
                format_amount(row.total_pay),
            ],
        )?;
    }

    finish(writer)
}

/// Writes the shift listing sheet: one row per completed shift, with local
/// dates and times.
pub fn shifts_csv<Tz: TimeZone>(report: &PayrollReport, tz: &Tz) -> EngineResult<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    write_row(
        &mut writer,
        &[
            "employee",
            "clock_in_date",
            "clock_in_time",
            "clock_out_date",
            "clock_out_time",
            "hours",
        ],
    )?;

    for row in &report.rows {
        for shift in &row.shifts {
            let (in_date, in_time) = local_parts(shift.clock_in_time, tz);
            let (out_date, out_time) = local_parts(shift.clock_out_time, tz);
            write_row(
                &mut writer,
                &[
                    row.employee.name.clone(),
                    in_date,
                    in_time,
                    out_date,
                    out_time,
                    format_amount(shift.hours),
                ],
            )?;
        }
    }

    finish(writer)
}

/// Writes the employee list with the same columns the importer reads, plus
/// the stored ID.
pub fn employees_csv(employees: &[Employee]) -> EngineResult<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    write_row(&mut writer, &["name", "rate", "id"])?;
    for employee in employees {
        write_row(
            &mut writer,
            &[
                employee.name.clone(),
                employee.rate.normalize().to_string(),
                employee.id.clone(),
            ],
        )?;
    }
    finish(writer)
}

/// Writes every attendance record, open shifts included, for backup.
pub fn attendance_csv<Tz: TimeZone>(records: &[AttendanceRecord], tz: &Tz) -> EngineResult<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    write_row(
        &mut writer,
        &[
            "employee_name",
            "employee_id",
            "clock_in_date",
            "clock_in_time",
            "clock_out_date",
            "clock_out_time",
            "status",
            "record_id",
        ],
    )?;
    for record in records {
        let (in_date, in_time) = local_parts(record.clock_in_time, tz);
        let (out_date, out_time) = record
            .clock_out_time
            .map(|out| local_parts(out, tz))
            .unwrap_or_default();
        write_row(
            &mut writer,
            &[
                record.employee_name.clone(),
                record.employee_id.clone(),
                in_date,
                in_time,
                out_date,
                out_time,
                record.status.to_string(),
                record.id.clone(),
            ],
        )?;
    }
    finish(writer)
}

/// A data row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowError {
    /// 1-based line number in the file, counting the header as line 1.
    pub line: usize,
    /// Why the row was skipped.
    pub message: String,
}

/// The outcome of parsing an employee import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeImport {
    /// Valid rows, in file order.
    pub employees: Vec<NewEmployee>,
    /// Rows that were skipped.
    pub failures: Vec<ImportRowError>,
}

/// Parses an employee import file.
///
/// Rows with a blank name or a rate that is not a non-negative number are
/// skipped and reported in [`EmployeeImport::failures`]; the rest are
/// returned for insertion.
///
/// # Errors
///
/// Returns [`EngineError::ImportError`] if the file cannot be read as CSV,
/// has no data rows, or lacks a name or rate column.
pub fn parse_employee_import(data: &[u8]) -> EngineResult<EmployeeImport> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(data);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(data));

    let headers = reader
        .headers()
        .map_err(|e| import_error(format!("failed to read CSV headers: {}", e)))?
        .clone();

    let name_column = find_column(&headers, &NAME_HEADERS);
    let rate_column = find_column(&headers, &RATE_HEADERS);

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| import_error(format!("failed to read CSV row: {}", e)))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        // The reader skips blank lines, so the index alone undercounts.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);
        rows.push((line, record));
    }

    if rows.is_empty() {
        return Err(import_error("file is empty".to_string()));
    }

    let (Some(name_column), Some(rate_column)) = (name_column, rate_column) else {
        return Err(import_error(
            "expected columns named \"name\" and \"rate\" (or \"Имя\" and \"Ставка\")".to_string(),
        ));
    };

    let mut employees = Vec::new();
    let mut failures = Vec::new();
    for (line, record) in rows {
        let name = record.get(name_column).unwrap_or_default();
        let rate = record.get(rate_column).unwrap_or_default();
        match validate_new_employee(name, rate) {
            Ok(employee) => employees.push(employee),
            Err(e) => failures.push(ImportRowError {
                line,
                message: e.to_string(),
            }),
        }
    }

    Ok(EmployeeImport {
        employees,
        failures,
    })
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().to_lowercase() == *n))
}

fn local_parts<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> (String, String) {
    let local = instant.with_timezone(tz).naive_local();
    (
        local.format(DATE_FORMAT).to_string(),
        local.format(TIME_FORMAT).to_string(),
    )
}

fn write_row<I, T>(writer: &mut Writer<Vec<u8>>, fields: I) -> EngineResult<()>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    writer
        .write_record(fields)
        .map_err(|e| export_error(format!("failed to write CSV row: {}", e)))
}

fn finish(mut writer: Writer<Vec<u8>>) -> EngineResult<Vec<u8>> {
    writer
        .flush()
        .map_err(|e| export_error(format!("failed to flush CSV writer: {}", e)))?;
    writer
        .into_inner()
        .map_err(|e| export_error(format!("failed to get CSV output: {}", e)))
}

fn import_error(message: String) -> EngineError {
    EngineError::ImportError { message }
}

fn export_error(message: String) -> EngineError {
    EngineError::ExportError { message }
}
