//! Typed spreadsheet cell values and their conversions.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{DATE_FORMAT, EmployeeId};

/// Day zero of the spreadsheet serial date system (1900 date system with the
/// leap-year bug folded in).
const SERIAL_DATE_EPOCH: (i32, u32, u32) = (1899, 12, 30);

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// A single cell value read from an input table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value.
    Empty,
    /// A text value, kept verbatim.
    Text(String),
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// A calendar date.
    Date(NaiveDate),
    /// A date with a time of day.
    DateTime(NaiveDateTime),
    /// A spreadsheet error value such as `#N/A`.
    Error(String),
}

impl Cell {
    /// Returns true if the cell holds no value, including blank text.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Renders the cell as display text, or `None` when it is empty.
    pub fn text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(self.to_string())
    }

    /// Reads the cell as an employee identifier.
    ///
    /// Integral numbers are rendered without a fractional part so that an
    /// identifier stored as `101.0` matches one typed as the text `101`.
    pub fn employee_id(&self) -> Result<EmployeeId, String> {
        match self {
            Cell::Text(s) if !s.trim().is_empty() => Ok(EmployeeId::new(s.trim())),
            Cell::Int(i) => Ok(EmployeeId::new(i.to_string())),
            Cell::Float(f) if f.is_finite() => {
                if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    Ok(EmployeeId::new((*f as i64).to_string()))
                } else {
                    Ok(EmployeeId::new(f.to_string()))
                }
            }
            Cell::Empty | Cell::Text(_) => Err("employee id is missing".to_string()),
            other => Err(format!("'{}' is not a valid employee id", other)),
        }
    }

    /// Reads the cell as a decimal amount, or `None` when it is empty.
    ///
    /// Floats are converted through their shortest round-trip representation,
    /// so `1825.005` stays `1825.005` rather than its binary expansion.
    pub fn decimal(&self) -> Result<Option<Decimal>, String> {
        match self {
            _ if self.is_empty() => Ok(None),
            Cell::Int(i) => Ok(Some(Decimal::from(*i))),
            Cell::Float(f) if f.is_finite() => Decimal::from_str(&f.to_string())
                .map(Some)
                .map_err(|e| format!("number {} cannot be represented: {}", f, e)),
            Cell::Text(s) => Decimal::from_str(s.trim())
                .map(Some)
                .map_err(|_| format!("expected a number, got '{}'", s)),
            other => Err(format!("expected a number, got '{}'", other)),
        }
    }

    /// Reads the cell as a calendar date.
    ///
    /// Accepts native date cells, ISO text (`YYYY-MM-DD`, optionally with a
    /// time part) and serial day numbers.
    pub fn date(&self) -> Result<NaiveDate, String> {
        match self {
            Cell::Date(d) => Ok(*d),
            Cell::DateTime(dt) => Ok(dt.date()),
            Cell::Text(s) if !s.trim().is_empty() => parse_date_text(s.trim())
                .ok_or_else(|| format!("'{}' is not a valid date", s)),
            Cell::Int(i) => serial_to_date(*i as f64),
            Cell::Float(f) => serial_to_date(*f),
            Cell::Empty | Cell::Text(_) => Err("date is missing".to_string()),
            other => Err(format!("'{}' is not a valid date", other)),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Date(d) => write!(f, "{}", d),
            Cell::DateTime(dt) => write!(f, "{}", dt),
            Cell::Error(e) => write!(f, "#{}", e),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Cell::Date(value)
    }
}

pub(crate) fn parse_date_text(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

fn serial_to_date(serial: f64) -> Result<NaiveDate, String> {
    if !serial.is_finite() || serial < 1.0 {
        return Err(format!("{} is not a valid serial date", serial));
    }
    let (y, m, d) = SERIAL_DATE_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|epoch| epoch.checked_add_days(Days::new(serial.floor() as u64)))
        .ok_or_else(|| format!("{} is not a valid serial date", serial))
}
