//! Response DTOs.

use serde::Serialize;

use rhsenso_core::types::{ColumnKind, MatchMode, TableSchema, UniqueConstraint};

/// The uniform response envelope.
///
/// Successful responses carry `data`; failures carry `message`, `code` and,
/// for validation problems, one `errors` entry per offending field.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Human-readable outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Field-level problems.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Machine-readable error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            errors: Vec::new(),
            code: None,
        }
    }

    /// Creates a successful response with a message.
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }
}

impl ApiResponse<()> {
    /// Success acknowledgment without data.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            errors: Vec::new(),
            code: None,
        }
    }

    /// Failure envelope.
    pub fn failure(message: impl Into<String>, code: &'static str, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            errors,
            code: Some(code),
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `ok` or `unavailable`.
    pub status: &'static str,
    /// Server version.
    pub version: &'static str,
}

/// One entry of the resource catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceInfo {
    /// URL segment under `/api`.
    pub resource: &'static str,
    /// Key fields in key order.
    pub key_fields: Vec<&'static str>,
    /// Every column with its kind and constraints.
    pub fields: Vec<FieldInfo>,
    /// Unique constraints besides the key.
    pub unique: &'static [UniqueConstraint],
}

/// Column metadata in the resource catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    /// Field name.
    pub name: &'static str,
    /// Value kind.
    pub kind: ColumnKind,
    /// Part of the key.
    pub key: bool,
    /// Accepts `null`.
    pub nullable: bool,
    /// Maximum text length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
    /// How list filters compare text values.
    pub match_mode: MatchMode,
}

impl From<&'static TableSchema> for ResourceInfo {
    fn from(schema: &'static TableSchema) -> Self {
        Self {
            resource: schema.resource,
            key_fields: schema.key_fields(),
            fields: schema
                .columns
                .iter()
                .map(|c| FieldInfo {
                    name: c.field,
                    kind: c.kind,
                    key: c.key,
                    nullable: c.nullable,
                    max_len: c.max_len,
                    match_mode: c.match_mode,
                })
                .collect(),
            unique: schema.unique,
        }
    }
}
