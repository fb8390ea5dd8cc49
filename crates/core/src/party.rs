//! Mapping from human role names to ledger party identifiers.
//!
//! Sandboxes allocate parties under their display name, so the defaults
//! map every role to itself. Ledgers that suffix party ids with a
//! namespace (`Parent::1220...`) override individual roles through
//! `LEDGER_PARTY_<ROLE>` variables, see [`PartyDirectory::with_overrides`].

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::types::Party;

pub const ROLE_PARENT: &str = "Parent";
pub const ROLE_EMMA: &str = "Emma";
pub const ROLE_JAMES: &str = "James";

pub const ROLE_ISSUER: &str = "Issuer";
pub const ROLE_INVESTOR1: &str = "Investor1";
pub const ROLE_INVESTOR2: &str = "Investor2";

/// All roles the bundled scenarios refer to.
pub const KNOWN_ROLES: &[&str] = &[
    ROLE_PARENT,
    ROLE_EMMA,
    ROLE_JAMES,
    ROLE_ISSUER,
    ROLE_INVESTOR1,
    ROLE_INVESTOR2,
];

/// Prefix of the environment variables that override a role's party id.
pub const PARTY_ENV_PREFIX: &str = "LEDGER_PARTY_";

#[derive(Debug, Clone, Default)]
pub struct PartyDirectory {
    parties: BTreeMap<String, Party>,
}

impl PartyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory with every [`KNOWN_ROLES`] entry mapped to a party of
    /// the same name.
    pub fn with_known_roles() -> Self {
        let mut directory = Self::new();
        for &role in KNOWN_ROLES {
            directory.insert(role, Party::new(role));
        }
        directory
    }

    pub fn insert(&mut self, role: &str, party: Party) {
        self.parties.insert(role.to_string(), party);
    }

    /// Resolve a role to its party id. Unknown roles are an error.
    pub fn resolve(&self, role: &str) -> Result<&Party, CoreError> {
        self.parties
            .get(role)
            .ok_or_else(|| CoreError::UnknownRole(role.to_string()))
    }

    /// Replace party ids for roles that have a `LEDGER_PARTY_<ROLE>` value.
    ///
    /// `lookup` is normally `|key| std::env::var(key).ok()`. Blank values
    /// are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for (role, party) in self.parties.iter_mut() {
            let key = format!("{PARTY_ENV_PREFIX}{}", role.to_ascii_uppercase());
            if let Some(value) = lookup(&key).filter(|v| !v.trim().is_empty()) {
                *party = Party::new(value.trim());
            }
        }
        self
    }

    pub fn roles(&self) -> impl Iterator<Item = (&str, &Party)> {
        self.parties.iter().map(|(role, party)| (role.as_str(), party))
    }
}
