use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identity principal on the ledger. Every gateway call is scoped by one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Party(String);

impl Party {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Party {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Opaque identifier the ledger assigns to a contract instance.
///
/// A contract id is only valid while the contract is active; exercising a
/// consuming choice archives it and the ledger hands back a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(String);

impl ContractId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A record type stored on the ledger.
///
/// `TEMPLATE_ID` uses the package-less `Module:Entity` form, which the
/// JSON API resolves as long as the name is unambiguous.
pub trait Template: Serialize + DeserializeOwned + Send + Sync + 'static {
    const TEMPLATE_ID: &'static str;
}

/// A named state transition on a template. The implementing type is the
/// choice argument record.
pub trait Choice: Serialize + Send + Sync {
    type Template: Template;

    const NAME: &'static str;
}

/// An active contract as seen by the querying party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract<T> {
    pub contract_id: ContractId,
    pub payload: T,
}
