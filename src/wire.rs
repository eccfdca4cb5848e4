use serde::Serialize;

use crate::{D1Error, Params, Value};

/// JSON body posted to the `/query` endpoint.
///
/// `params` is left out of the payload entirely when no parameters are
/// supplied; an empty array is never sent.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryRequest {
    pub sql: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Value>,
}

impl QueryRequest {
    /// Builds a request payload, rejecting empty SQL and non-finite floats.
    pub fn new(sql: &str, params: impl Into<Params>) -> Result<Self, D1Error> {
        if sql.trim().is_empty() {
            return Err(D1Error::InvalidRequest(
                "sql statement cannot be empty".to_owned(),
            ));
        }

        let params = params.into().into_values();
        if let Some((index, value)) = params.iter().enumerate().find_map(|(index, value)| {
            match value {
                Value::Float(float) if !float.is_finite() => Some((index, *float)),
                _ => None,
            }
        }) {
            return Err(D1Error::InvalidRequest(format!(
                "non-finite float value '{value}' at parameter {index} is unsupported"
            )));
        }

        Ok(Self {
            sql: sql.to_owned(),
            params,
        })
    }
}
