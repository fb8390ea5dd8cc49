//! `ledger-workflows` library crate.
//!
//! Workflow steps for the allowance and bond applications, plus the
//! linear scenarios the binary runs. Re-exported for integration tests.

pub mod allowance;
pub mod bond;
pub mod error;
pub mod scenario;
pub mod summary;
