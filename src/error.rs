use crate::ResponseInfo;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum D1Error {
    /// Missing or empty credentials at client construction.
    #[error("configuration error: {0}")]
    Config(String),
    /// Request rejected locally before anything was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status} {status_text}: {body}")]
    Http {
        status: u16,
        /// Canonical reason phrase for `status`, empty if unknown.
        status_text: String,
        body: String,
    },
    /// Success response whose body is not a valid query envelope.
    #[error("decode error: {0}")]
    Decode(String),
    /// Application-level failure reported inside a success envelope.
    ///
    /// Only produced by [`D1QueryResponse::ensure_success`](crate::D1QueryResponse::ensure_success).
    #[error("d1 api error: {}", join_infos(.errors))]
    Api { errors: Vec<ResponseInfo> },
}

fn join_infos(infos: &[ResponseInfo]) -> String {
    if infos.is_empty() {
        return "request was not successful".to_owned();
    }
    infos
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use crate::{D1Error, ResponseInfo};

    #[test]
    fn http_error_message_carries_status_and_body() {
        let err = D1Error::Http {
            status: 400,
            status_text: "Bad Request".to_owned(),
            body: "Bad Request: syntax error".to_owned(),
        };
        let message = err.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("Bad Request: syntax error"));
    }

    #[test]
    fn api_error_lists_every_entry() {
        let err = D1Error::Api {
            errors: vec![
                ResponseInfo::new(7500, "no such table: users"),
                ResponseInfo::new(7501, "second"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "d1 api error: 7500: no such table: users; 7501: second"
        );
    }

    #[test]
    fn api_error_without_entries_still_describes_failure() {
        let err = D1Error::Api { errors: vec![] };
        assert_eq!(err.to_string(), "d1 api error: request was not successful");
    }
}
