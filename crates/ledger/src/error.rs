/// Errors from the ledger gateway layer.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway rejected the call with a non-2xx status.
    #[error("Ledger API error ({status}): {}", .errors.join("; "))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error messages reported by the gateway, or the raw body.
        errors: Vec<String>,
    },

    /// A payload, argument or result did not match the expected shape.
    #[error("JSON conversion failed for {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// Missing or malformed client configuration.
    #[error("Invalid ledger configuration: {0}")]
    Config(String),
}

impl LedgerError {
    pub fn decode(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            what: what.into(),
            source,
        }
    }
}
