//! Raw filter criteria as received from the query string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Query-string parameters that control paging and sorting rather than
/// filtering.
pub const RESERVED_PARAMS: &[&str] = &["page", "pageSize", "sortBy", "sortDir"];

/// Field name to raw value map.
///
/// Values are kept as text until a table schema tells the query builder
/// which type each field has. Blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterCriteria(BTreeMap<String, String>);

impl FilterCriteria {
    /// Create empty criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a criterion.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Raw value for a field, if present and not blank.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Iterate over the non-blank criteria.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether no non-blank criterion is present.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Split off the paging and sorting parameters.
    ///
    /// Returns the remaining criteria and the reserved parameters.
    pub fn split_reserved(mut self) -> (Self, BTreeMap<String, String>) {
        let mut reserved = BTreeMap::new();
        for name in RESERVED_PARAMS {
            if let Some(value) = self.0.remove(*name) {
                reserved.insert((*name).to_string(), value);
            }
        }
        (self, reserved)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterCriteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_absent() {
        let criteria = FilterCriteria::new().with("cdEmpresa", "1").with("tpJornada", "   ");
        assert_eq!(criteria.get("tpJornada"), None);
        assert_eq!(criteria.iter().count(), 1);
        assert!(!criteria.is_empty());
        assert!(FilterCriteria::new().with("a", "").is_empty());
    }

    #[test]
    fn split_reserved_removes_paging_params() {
        let criteria: FilterCriteria =
            [("page", "2"), ("pageSize", "10"), ("sortBy", "ano"), ("ano", "2024")]
                .into_iter()
                .collect();
        let (filters, reserved) = criteria.split_reserved();
        assert_eq!(filters.iter().collect::<Vec<_>>(), vec![("ano", "2024")]);
        assert_eq!(reserved.get("pageSize").map(String::as_str), Some("10"));
        assert_eq!(reserved.len(), 3);
    }
}
