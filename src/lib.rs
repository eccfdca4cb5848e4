//! `d1-http` is an async HTTP client for the Cloudflare D1 query API.
//!
//! The crate wraps the `/accounts/{account}/d1/database/{database}/query`
//! endpoint with a single typed call:
//! - [`D1Client::query`]
//!
//! ```no_run
//! use d1_http::{D1Client, D1Config, Value};
//!
//! # async fn run() -> d1_http::Result<()> {
//! let db = D1Client::new(D1Config::new("account-id", "database-id", "api-key"))?;
//! let response: d1_http::D1QueryResponse = db
//!     .query("SELECT * FROM users WHERE email = ?", [Value::text("kit@example.com")])
//!     .await?;
//! println!("{:?}", response.into_rows());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod options;
mod params;
mod types;
mod value;
mod wire;

pub use client::D1Client;
pub use config::{D1Config, DEFAULT_API_BASE};
pub use error::D1Error;
pub use options::ClientOptions;
pub use params::Params;
pub use types::{D1QueryResponse, QueryMeta, QueryResult, ResponseInfo};
pub use value::Value;
pub use wire::QueryRequest;

pub type Result<T> = std::result::Result<T, D1Error>;
