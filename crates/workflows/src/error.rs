use ledger_client::LedgerError;
use ledger_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// The lookup matched no active contract. No mutation was attempted.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl WorkflowError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Whether the step aborted on a lookup rather than a remote failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
