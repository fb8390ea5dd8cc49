//! Domain types shared by the ledger client and the workflow scripts.
//!
//! Everything here is a transient, read-only projection of state that
//! lives on the ledger. Nothing in this crate talks to the network.

pub mod allowance;
pub mod amount;
pub mod bond;
pub mod clock;
pub mod error;
pub mod party;
pub mod types;
