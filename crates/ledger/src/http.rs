//! [`LedgerApi`] over the Daml JSON API v1.
//!
//! Every call is a `POST` with a bearer token. Successful responses wrap
//! their data as `{"status": 200, "result": ...}`; failures carry
//! `{"status": n, "errors": [...]}`.

use async_trait::async_trait;
use ledger_core::types::{ContractId, Party};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::{ActiveContract, CreatedContract, ExerciseOutcome, LedgerApi};
use crate::config::LedgerConfig;
use crate::error::LedgerError;

pub const QUERY_PATH: &str = "/v1/query";
pub const CREATE_PATH: &str = "/v1/create";
pub const EXERCISE_PATH: &str = "/v1/exercise";

/// HTTP client for a single JSON API endpoint.
pub struct HttpLedger {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    template_ids: [&'a str; 1],
    readers: [&'a Party; 1],
}

/// Submission metadata; the JSON API uses it to pick the acting party
/// out of a multi-party token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommandMeta<'a> {
    act_as: [&'a Party; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest<'a> {
    template_id: &'a str,
    payload: serde_json::Value,
    meta: CommandMeta<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExerciseRequest<'a> {
    template_id: &'a str,
    contract_id: &'a ContractId,
    choice: &'a str,
    argument: serde_json::Value,
    meta: CommandMeta<'a>,
}

#[derive(Debug, Deserialize)]
struct SuccessEnvelope<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl HttpLedger {
    /// Build a client with its own connection pool and the configured
    /// request timeout.
    pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config.base_url(), config.token.clone()))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, LedgerError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "Ledger request");

        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await?;
        let envelope: SuccessEnvelope<T> = serde_json::from_slice(&body)
            .map_err(|e| LedgerError::decode(format!("{path} response"), e))?;
        Ok(envelope.result)
    }

    /// Map a non-2xx response to [`LedgerError::Api`], preferring the
    /// gateway's `errors` list over the raw body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, LedgerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let errors = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) if !envelope.errors.is_empty() => envelope.errors,
            _ => vec![body],
        };

        Err(LedgerError::Api {
            status: status.as_u16(),
            errors,
        })
    }
}

#[async_trait]
impl LedgerApi for HttpLedger {
    async fn query(
        &self,
        acting: &Party,
        template_id: &str,
    ) -> Result<Vec<ActiveContract>, LedgerError> {
        let body = QueryRequest {
            template_ids: [template_id],
            readers: [acting],
        };
        self.post(QUERY_PATH, &body).await
    }

    async fn create(
        &self,
        acting: &Party,
        template_id: &str,
        payload: serde_json::Value,
    ) -> Result<CreatedContract, LedgerError> {
        let body = CreateRequest {
            template_id,
            payload,
            meta: CommandMeta { act_as: [acting] },
        };
        self.post(CREATE_PATH, &body).await
    }

    async fn exercise(
        &self,
        acting: &Party,
        template_id: &str,
        contract_id: &ContractId,
        choice: &str,
        argument: serde_json::Value,
    ) -> Result<ExerciseOutcome, LedgerError> {
        let body = ExerciseRequest {
            template_id,
            contract_id,
            choice,
            argument,
            meta: CommandMeta { act_as: [acting] },
        };
        self.post(EXERCISE_PATH, &body).await
    }
}
