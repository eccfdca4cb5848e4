use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number};

use crate::{D1Error, Result};

/// Diagnostic entry used for both `errors` and `messages`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseInfo {
    /// Cloudflare API code, 1000 or above.
    pub code: u32,
    pub message: String,
    /// Fields not modelled above, e.g. `documentation_url`.
    #[serde(flatten)]
    pub extra: Map<String, serde_json::Value>,
}

impl ResponseInfo {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            extra: Map::new(),
        }
    }
}

impl fmt::Display for ResponseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Execution statistics for one statement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_db: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<u64>,
    /// Execution time in milliseconds, kept as sent (`0` stays `0`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_row_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_read: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_written: Option<u64>,
    /// Database size in bytes after the statement ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_after: Option<u64>,
    /// Fields not modelled above, e.g. `served_by` or `timings`.
    #[serde(flatten)]
    pub extra: Map<String, serde_json::Value>,
}

impl QueryMeta {
    /// Execution time in milliseconds as a float.
    pub fn duration_ms(&self) -> Option<f64> {
        self.duration.as_ref().and_then(Number::as_f64)
    }
}

/// Outcome of a single statement.
///
/// `T` is the caller's row shape. Rows are deserialized into it as-is; no
/// schema check is made beyond what `serde` enforces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct QueryResult<T = serde_json::Value> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<QueryMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, serde_json::Value>,
}

/// Full response envelope of the `/query` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct D1QueryResponse<T = serde_json::Value> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ResponseInfo>,
    #[serde(default)]
    pub messages: Vec<ResponseInfo>,
    /// One entry per statement in the submitted SQL.
    #[serde(default)]
    pub result: Vec<QueryResult<T>>,
    #[serde(flatten)]
    pub extra: Map<String, serde_json::Value>,
}

impl<T> D1QueryResponse<T> {
    /// Turns an envelope reporting `success: false` into [`D1Error::Api`].
    pub fn ensure_success(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(D1Error::Api {
                errors: self.errors,
            })
        }
    }

    /// Returns the result of the first statement.
    pub fn first(&self) -> Option<&QueryResult<T>> {
        self.result.first()
    }

    /// Consumes the envelope and returns the rows of every statement in order.
    pub fn into_rows(self) -> Vec<T> {
        self.result
            .into_iter()
            .filter_map(|result| result.results)
            .flatten()
            .collect()
    }
}
