use std::time::Duration;

use crate::error::LedgerError;

/// Connection parameters for the ledger JSON API.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Gateway host (default: `localhost`).
    pub host: String,
    /// Gateway port (default: `7575`).
    pub port: u16,
    /// Bearer token sent on every request. Must authorize every party the
    /// scripts act as.
    pub token: String,
    /// Use `https` instead of `http` (default: `false`).
    pub tls: bool,
    /// Per-request timeout (default: 30 seconds).
    pub timeout: Duration,
}

impl LedgerConfig {
    pub fn new(host: impl Into<String>, port: u16, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            token: token.into(),
            tls: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default     |
    /// |-----------------------|-------------|
    /// | `LEDGER_HOST`         | `localhost` |
    /// | `LEDGER_PORT`         | `7575`      |
    /// | `LEDGER_TOKEN`        | (required)  |
    /// | `LEDGER_TLS`          | `false`     |
    /// | `LEDGER_TIMEOUT_SECS` | `30`        |
    pub fn from_env() -> Result<Self, LedgerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LedgerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("LEDGER_HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.into());

        let port: u16 = match lookup("LEDGER_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| LedgerError::Config(format!("LEDGER_PORT must be a valid u16, got '{raw}'")))?,
            None => DEFAULT_PORT,
        };

        let token = lookup("LEDGER_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| LedgerError::Config("LEDGER_TOKEN must be set".into()))?;

        let tls = match lookup("LEDGER_TLS").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(LedgerError::Config(format!(
                    "LEDGER_TLS must be true or false, got '{other}'"
                )))
            }
        };

        let timeout_secs: u64 = match lookup("LEDGER_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| {
                LedgerError::Config(format!("LEDGER_TIMEOUT_SECS must be a valid u64, got '{raw}'"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            host,
            port,
            token,
            tls,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Base URL, e.g. `http://localhost:7575`.
    pub fn base_url(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 7575;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
