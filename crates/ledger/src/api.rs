//! The ledger gateway contract.
//!
//! Three operations, each scoped by the acting party: list the active
//! contracts of a template, create a contract, exercise a choice on a
//! contract. The ledger alone enforces authorization and validity.

use async_trait::async_trait;
use ledger_core::types::{ContractId, Party};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// An active contract with its payload still in JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveContract {
    pub contract_id: ContractId,
    pub template_id: String,
    pub payload: serde_json::Value,
}

/// Result of a successful `create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedContract {
    pub contract_id: ContractId,
}

/// Result of a successful `exercise`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseOutcome {
    /// Whatever the choice body returned, often a new contract id.
    pub exercise_result: serde_json::Value,
}

impl ExerciseOutcome {
    pub fn decode<T: serde::de::DeserializeOwned>(&self, choice: &str) -> Result<T, LedgerError> {
        serde_json::from_value(self.exercise_result.clone())
            .map_err(|e| LedgerError::decode(format!("result of {choice}"), e))
    }
}

#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// All active contracts of `template_id` visible to `acting`.
    async fn query(
        &self,
        acting: &Party,
        template_id: &str,
    ) -> Result<Vec<ActiveContract>, LedgerError>;

    /// Create a contract with `acting` as the submitting party.
    async fn create(
        &self,
        acting: &Party,
        template_id: &str,
        payload: serde_json::Value,
    ) -> Result<CreatedContract, LedgerError>;

    /// Exercise `choice` on `contract_id` with `acting` as the controller.
    async fn exercise(
        &self,
        acting: &Party,
        template_id: &str,
        contract_id: &ContractId,
        choice: &str,
        argument: serde_json::Value,
    ) -> Result<ExerciseOutcome, LedgerError>;
}
