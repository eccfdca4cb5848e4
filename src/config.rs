use std::fmt;

use crate::D1Error;

/// Cloudflare API root used unless overridden with [`D1Config::with_api_base`].
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

const ACCOUNT_ID_VAR: &str = "D1_ACCOUNT_ID";
const DATABASE_ID_VAR: &str = "D1_DATABASE_ID";
const API_KEY_VAR: &str = "CLOUDFLARE_API_KEY";

/// Credentials and endpoint settings for a single D1 database.
#[derive(Clone, PartialEq, Eq)]
pub struct D1Config {
    pub account_id: String,
    pub database_id: String,
    pub api_key: String,
    pub api_base: String,
}

impl fmt::Debug for D1Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("D1Config")
            .field("account_id", &self.account_id)
            .field("database_id", &self.database_id)
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl D1Config {
    pub fn new(
        account_id: impl Into<String>,
        database_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            database_id: database_id.into(),
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }

    /// Points the client at a different API root, e.g. a proxy or a local
    /// mock server. A trailing `/` is ignored.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Reads credentials from environment variables.
    ///
    /// Reads:
    /// - `D1_ACCOUNT_ID`
    /// - `D1_DATABASE_ID`
    /// - `CLOUDFLARE_API_KEY`
    ///
    /// **Not available on `wasm32` targets** — environment variables do not
    /// exist in browser runtimes.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, D1Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    ///
    /// Fails if any of the three variables is missing or blank.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, D1Error>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let config = Self::new(
            lookup(ACCOUNT_ID_VAR).unwrap_or_default(),
            lookup(DATABASE_ID_VAR).unwrap_or_default(),
            lookup(API_KEY_VAR).unwrap_or_default(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Checks that every credential is present.
    ///
    /// The error always names all three variables, not just the first
    /// missing one.
    pub fn validate(&self) -> Result<(), D1Error> {
        let missing = [&self.account_id, &self.database_id, &self.api_key]
            .iter()
            .any(|value| value.trim().is_empty());
        if missing {
            return Err(D1Error::Config(format!(
                "missing required credentials: {ACCOUNT_ID_VAR}, {DATABASE_ID_VAR}, {API_KEY_VAR}"
            )));
        }
        if self.api_base.trim().is_empty() {
            return Err(D1Error::Config("api base url cannot be empty".to_owned()));
        }
        Ok(())
    }

    /// Per-database base URL:
    /// `<api_base>/accounts/<account>/d1/database/<database>`.
    pub fn base_url(&self) -> String {
        format!(
            "{}/accounts/{}/d1/database/{}",
            self.api_base.trim().trim_end_matches('/'),
            self.account_id.trim(),
            self.database_id.trim()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{D1Config, DEFAULT_API_BASE};
    use crate::D1Error;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn assert_names_all_vars(err: D1Error) {
        match err {
            D1Error::Config(message) => {
                assert!(message.contains("D1_ACCOUNT_ID"));
                assert!(message.contains("D1_DATABASE_ID"));
                assert!(message.contains("CLOUDFLARE_API_KEY"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn lookup_with_all_vars_succeeds() {
        let config = D1Config::from_lookup(lookup_from(&[
            ("D1_ACCOUNT_ID", "acc"),
            ("D1_DATABASE_ID", "db"),
            ("CLOUDFLARE_API_KEY", "key"),
        ]))
        .expect("must build config");

        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(
            config.base_url(),
            "https://api.cloudflare.com/client/v4/accounts/acc/d1/database/db"
        );
    }

    #[test]
    fn each_missing_var_names_all_three() {
        let all = [
            ("D1_ACCOUNT_ID", "acc"),
            ("D1_DATABASE_ID", "db"),
            ("CLOUDFLARE_API_KEY", "key"),
        ];
        for skip in 0..all.len() {
            let partial: Vec<_> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, pair)| *pair)
                .collect();
            let err = D1Config::from_lookup(lookup_from(&partial)).expect_err("must fail");
            assert_names_all_vars(err);
        }
    }

    #[test]
    fn blank_value_is_rejected() {
        let err = D1Config::new("acc", "  ", "key")
            .validate()
            .expect_err("must fail");
        assert_names_all_vars(err);
    }

    #[test]
    fn base_url_uses_arbitrary_ids_and_trims_api_base() {
        let config = D1Config::new("0123abcd-account", "f00d-db-ID", "key")
            .with_api_base("http://127.0.0.1:8787/client/v4/");
        assert_eq!(
            config.base_url(),
            "http://127.0.0.1:8787/client/v4/accounts/0123abcd-account/d1/database/f00d-db-ID"
        );
    }

    #[test]
    fn base_url_trims_surrounding_whitespace_from_ids() {
        let config = D1Config::new(" acc ", "\tdb\n", "key");
        assert_eq!(
            config.base_url(),
            "https://api.cloudflare.com/client/v4/accounts/acc/d1/database/db"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let debug = format!("{:?}", D1Config::new("acc", "db", "secret-key"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-key"));
    }
}
