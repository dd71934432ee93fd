//! Sorting types for list endpoints.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(AppError::validation(format!(
                "sortDir must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

/// Caller-requested sort: an optional field and a direction.
///
/// Resolved against a table schema by
/// [`OrderBy::resolve`](crate::query::OrderBy::resolve).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field name to sort by; `None` means key order.
    pub field: Option<String>,
    /// Sort direction for `field`.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    /// Build from raw `sortBy` / `sortDir` query values. Blank means absent.
    pub fn from_raw(sort_by: Option<&str>, sort_dir: Option<&str>) -> Result<Self, AppError> {
        let field = sort_by
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let direction = match sort_dir {
            Some(dir) => dir.parse()?,
            None => SortDirection::Asc,
        };
        Ok(Self { field, direction })
    }

    /// Sort on `field` ascending.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            direction: SortDirection::Asc,
        }
    }

    /// Sort on `field` descending.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            direction: SortDirection::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_direction_case_insensitively() {
        assert_eq!("DESC".parse::<SortDirection>().ok(), Some(SortDirection::Desc));
        assert_eq!("".parse::<SortDirection>().ok(), Some(SortDirection::Asc));
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn blank_sort_by_is_absent() {
        let spec = SortSpec::from_raw(Some("  "), Some("desc")).unwrap();
        assert_eq!(spec.field, None);
        assert_eq!(spec.direction, SortDirection::Desc);
    }
}
