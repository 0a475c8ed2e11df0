/// Conversion of a member spreadsheet export (CSV) into birthday records
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::BirthdayRecord;
use crate::utils::datetime::month_day_key;
use crate::utils::string_utils::{is_empty_or_whitespace, normalize_whitespace, split_csv_line};

const NAME_HEADERS: &[&str] = &["full name", "name"];
const DOB_HEADERS: &[&str] = &["dob", "date of birth", "birthday", "birth date", "birthdate"];
const PHONE_HEADERS: &[&str] = &["phone", "phone number", "mobile", "mobile number", "contact"];

/// Date layouts accepted in the date-of-birth column
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Import error types
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV file is empty")]
    Empty,
    #[error("CSV header has no {0} column")]
    MissingColumn(&'static str),
}

/// Result of a conversion
#[derive(Debug, Default)]
pub struct ImportReport {
    pub records: Vec<BirthdayRecord>,
    /// Data rows dropped for a missing name or unparsable date
    pub skipped: usize,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    name: usize,
    dob: usize,
    phone: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, ImportError> {
        let normalized: Vec<String> = header
            .iter()
            .map(|h| normalize_whitespace(h.trim_start_matches('\u{feff}')).to_lowercase())
            .collect();
        let find = |candidates: &[&str]| {
            candidates
                .iter()
                .find_map(|c| normalized.iter().position(|h| h == c))
        };

        Ok(Self {
            name: find(NAME_HEADERS).ok_or(ImportError::MissingColumn("name"))?,
            dob: find(DOB_HEADERS).ok_or(ImportError::MissingColumn("date of birth"))?,
            phone: find(PHONE_HEADERS),
        })
    }
}

/// Parse a date of birth in any accepted layout
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let value = normalize_whitespace(value);
    if value.is_empty() || value.eq_ignore_ascii_case("n/a") {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&value, format).ok())
}

/// Convert CSV text into birthday records, dropping unusable rows
pub fn convert_csv(text: &str) -> Result<ImportReport, ImportError> {
    let mut lines = text.lines().filter(|line| !is_empty_or_whitespace(line));
    let header = lines.next().ok_or(ImportError::Empty)?;
    let columns = Columns::from_header(&split_csv_line(header))?;

    let mut report = ImportReport::default();
    for (index, line) in lines.enumerate() {
        let values = split_csv_line(line);
        match convert_row(&values, columns) {
            Some(record) => report.records.push(record),
            None => {
                debug!("Skipping CSV row {}", index + 2);
                report.skipped += 1;
            }
        }
    }

    info!(
        "Converted {} birthday(s) from CSV, skipped {} row(s)",
        report.records.len(),
        report.skipped
    );
    Ok(report)
}

fn convert_row(values: &[String], columns: Columns) -> Option<BirthdayRecord> {
    let field = |index: usize| values.get(index).map(|v| normalize_whitespace(v));

    let name = field(columns.name).filter(|n| !n.is_empty())?;
    let birth_date = parse_birth_date(&field(columns.dob)?)?;
    let phone = columns.phone.and_then(field);

    Some(BirthdayRecord::new(name, month_day_key(birth_date), phone))
}
