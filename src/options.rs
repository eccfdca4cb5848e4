use std::time::Duration;

/// Configures transport behavior applied to every request.
///
/// The default applies no timeout beyond what the HTTP transport itself
/// enforces.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl ClientOptions {
    /// Sets a per-request timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::ClientOptions;

    #[test]
    fn default_has_no_timeout() {
        assert_eq!(ClientOptions::default().timeout(), None);
    }

    #[test]
    fn timeout_builder() {
        let opts = ClientOptions::default().with_timeout_ms(250);
        assert_eq!(opts.timeout(), Some(Duration::from_millis(250)));
    }
}
