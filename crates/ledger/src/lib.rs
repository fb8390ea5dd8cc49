//! Client side of the ledger gateway boundary.
//!
//! [`LedgerApi`] is the three-operation contract every workflow step
//! talks to. [`HttpLedger`] implements it against the Daml JSON API v1;
//! the [`typed`] helpers layer template and choice types on top of the
//! raw JSON operations.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod typed;

pub use api::{ActiveContract, CreatedContract, ExerciseOutcome, LedgerApi};
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use http::HttpLedger;
