use std::fmt;

use reqwest::header;
use serde::de::DeserializeOwned;

use crate::{ClientOptions, D1Config, D1Error, D1QueryResponse, Params, QueryRequest, Result};

#[derive(Clone)]
/// HTTP client for a single Cloudflare D1 database.
pub struct D1Client {
    http: reqwest::Client,
    base_url: String,
    authorization: String,
    options: ClientOptions,
}

impl fmt::Debug for D1Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("D1Client")
            .field("base_url", &self.base_url)
            .field("authorization", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl D1Client {
    /// Creates a client from explicit credentials.
    ///
    /// Fails with [`D1Error::Config`] if the account ID, database ID or API
    /// key is empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use d1_http::{D1Client, D1Config};
    ///
    /// let db = D1Client::new(D1Config::new("account-id", "database-id", "api-key"))
    ///     .expect("credentials must be set");
    /// ```
    pub fn new(config: D1Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url(),
            authorization: format!("Bearer {}", config.api_key.trim()),
            options: ClientOptions::default(),
        })
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `D1_ACCOUNT_ID`, `D1_DATABASE_ID` and `CLOUDFLARE_API_KEY`.
    /// See [`D1Config::from_env`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use d1_http::D1Client;
    ///
    /// let db = D1Client::from_env().expect("missing D1 env vars");
    /// ```
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        Self::new(D1Config::from_env()?)
    }

    /// Applies client options such as a request timeout.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Per-database base URL derived at construction.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Executes `sql` and returns the response envelope with rows typed as `T`.
    ///
    /// Pass `()` for no parameters; the `params` key is then left out of the
    /// request body. An envelope with `success: false` is returned as `Ok`,
    /// use [`D1QueryResponse::ensure_success`] to turn it into an error.
    pub async fn query<T, P>(&self, sql: &str, params: P) -> Result<D1QueryResponse<T>>
    where
        T: DeserializeOwned,
        P: Into<Params>,
    {
        let payload = QueryRequest::new(sql, params)?;
        let url = format!("{}/query", self.base_url);

        #[cfg(feature = "tracing")]
        tracing::debug!(url = %url, params = payload.params.len(), "sending d1 query");

        let mut request = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, &self.authorization)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&payload);
        if let Some(timeout) = self.options.timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(D1Error::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(D1Error::Transport)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "d1 query response");

        if !status.is_success() {
            return Err(D1Error::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                body,
            });
        }

        serde_json::from_str::<D1QueryResponse<T>>(&body).map_err(|err| {
            D1Error::Decode(format!("invalid query response JSON: {err}; body: {body}"))
        })
    }
}
