//! Typed column values shared by filters, keys and in-memory evaluation.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";
// `%.f` renders nothing for whole seconds and the exact fraction otherwise.
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Semantic type of a legacy column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// 32-bit integer (`INTEGER`, `SMALLINT` widened).
    Int,
    /// Decimal quantity stored as double precision.
    Decimal,
    /// Character data.
    Text,
    /// Flag.
    Bool,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Timestamp without time zone.
    DateTime,
}

impl ColumnKind {
    /// Human-readable format hint used in validation messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Int => "an integer",
            Self::Decimal => "a number",
            Self::Text => "text",
            Self::Bool => "true or false",
            Self::Date => "a date (YYYY-MM-DD)",
            Self::Time => "a time (HH:MM[:SS])",
            Self::DateTime => "a timestamp (YYYY-MM-DDTHH:MM:SS)",
        }
    }
}

/// A nullable scalar tagged with its column kind.
///
/// Values of the same kind are totally ordered with `NULL` first. Values of
/// different kinds never compare equal.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Integer value.
    Int(Option<i32>),
    /// Decimal value.
    Decimal(Option<f64>),
    /// Text value, compared as stored.
    Text(Option<String>),
    /// Boolean flag.
    Bool(Option<bool>),
    /// Date value.
    Date(Option<NaiveDate>),
    /// Time-of-day value.
    Time(Option<NaiveTime>),
    /// Timestamp value.
    DateTime(Option<NaiveDateTime>),
}

impl FieldValue {
    /// Parse raw query-string text as a value of `kind`.
    ///
    /// Text is taken verbatim; every other kind is trimmed first. The error
    /// carries the expected format for the caller's message.
    pub fn parse(kind: ColumnKind, raw: &str) -> Result<Self, &'static str> {
        let trimmed = raw.trim();
        let value = match kind {
            ColumnKind::Int => Self::Int(Some(trimmed.parse().map_err(|_| kind.expected())?)),
            ColumnKind::Decimal => {
                let n: f64 = trimmed.parse().map_err(|_| kind.expected())?;
                if !n.is_finite() {
                    return Err(kind.expected());
                }
                Self::Decimal(Some(n))
            }
            ColumnKind::Text => Self::Text(Some(raw.to_string())),
            ColumnKind::Bool => Self::Bool(Some(parse_bool(trimmed).ok_or(kind.expected())?)),
            ColumnKind::Date => Self::Date(Some(
                NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| kind.expected())?,
            )),
            ColumnKind::Time => Self::Time(Some(parse_time(trimmed).ok_or(kind.expected())?)),
            ColumnKind::DateTime => {
                Self::DateTime(Some(parse_datetime(trimmed).ok_or(kind.expected())?))
            }
        };
        Ok(value)
    }

    /// The column kind this value belongs to.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Int(_) => ColumnKind::Int,
            Self::Decimal(_) => ColumnKind::Decimal,
            Self::Text(_) => ColumnKind::Text,
            Self::Bool(_) => ColumnKind::Bool,
            Self::Date(_) => ColumnKind::Date,
            Self::Time(_) => ColumnKind::Time,
            Self::DateTime(_) => ColumnKind::DateTime,
        }
    }

    /// Whether the value is SQL `NULL`.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Int(v) => v.is_none(),
            Self::Decimal(v) => v.is_none(),
            Self::Text(v) => v.is_none(),
            Self::Bool(v) => v.is_none(),
            Self::Date(v) => v.is_none(),
            Self::Time(v) => v.is_none(),
            Self::DateTime(v) => v.is_none(),
        }
    }

    /// Borrow the text payload, if this is a non-null text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(Some(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Total order within a kind, `NULL` first. Mixed kinds order by kind.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Decimal(a), Self::Decimal(b)) => match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(b),
                _ => a.is_some().cmp(&b.is_some()),
            },
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Time(a), Self::Time(b)) => a.cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
            _ => (self.kind() as u8).cmp(&(other.kind() as u8)),
        }
    }

    /// Render the value in the same format [`FieldValue::parse`] accepts.
    ///
    /// Returns `None` for `NULL`.
    pub fn to_query_value(&self) -> Option<String> {
        match self {
            Self::Int(v) => v.map(|v| v.to_string()),
            Self::Decimal(v) => v.map(|v| v.to_string()),
            Self::Text(v) => v.clone(),
            Self::Bool(v) => v.map(|v| v.to_string()),
            Self::Date(v) => v.map(|v| v.format(DATE_FORMAT).to_string()),
            Self::Time(v) => v.map(|v| v.format(TIME_FORMAT).to_string()),
            Self::DateTime(v) => v.map(|v| v.format(DATETIME_FORMAT).to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_query_value() {
            Some(v) => f.write_str(&v),
            None => f.write_str("NULL"),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}
