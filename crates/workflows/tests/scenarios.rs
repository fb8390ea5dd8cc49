//! End-to-end runs of the scripted scenarios against the ledger doubles.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;

use common::{amount, clock, MemoryLedger, UnavailableLedger};
use ledger_client::{LedgerApi, LedgerError};
use ledger_core::allowance::{Task, TaskCompletion};
use ledger_core::bond::{Bond, BondIssuanceRequest, BondTradeOffer, CouponPayment};
use ledger_core::party::PartyDirectory;
use ledger_core::types::Template;
use ledger_workflows::error::WorkflowError;
use ledger_workflows::scenario::{run_allowance, run_bond};

// ---------------------------------------------------------------------------
// Allowance
// ---------------------------------------------------------------------------

#[tokio::test]
async fn allowance_scenario_settles_expected_balances() {
    let ledger = MemoryLedger::new();
    ledger.seed_account("Emma", "20.0", "10.0");
    ledger.seed_account("James", "15.0", "5.0");
    let parties = PartyDirectory::with_known_roles();

    run_allowance(&ledger, &parties, &clock()).await.unwrap();

    // Emma: +10.0 weekly, -5.0 ice cream. James: +10.0 bonus, +5.0 reward.
    assert_eq!(ledger.balance("Emma"), amount("25.0"));
    assert_eq!(ledger.balance("James"), amount("30.0"));

    assert_eq!(ledger.exercises_of("ApproveAndPay").len(), 1);
    assert!(ledger.active(Task::TEMPLATE_ID).is_empty());
    assert!(ledger.active(TaskCompletion::TEMPLATE_ID).is_empty());
}

#[tokio::test]
async fn allowance_scenario_skips_steps_whose_lookup_misses() {
    // No accounts at all: every account step is skipped, the task is still
    // created and completed, approval stops at the missing account.
    let ledger = MemoryLedger::new();
    let parties = PartyDirectory::with_known_roles();

    run_allowance(&ledger, &parties, &clock()).await.unwrap();

    let choices: Vec<String> = ledger
        .mutating_calls()
        .into_iter()
        .map(|call| match call {
            common::Call::Create { template_id, .. } => template_id,
            common::Call::Exercise { choice, .. } => choice,
            common::Call::Query { .. } => unreachable!(),
        })
        .collect();
    assert_eq!(choices, vec![Task::TEMPLATE_ID.to_string(), "CompleteTask".to_string()]);
    assert_eq!(ledger.active(TaskCompletion::TEMPLATE_ID).len(), 1);
}

#[tokio::test]
async fn allowance_scenario_stops_on_remote_failure() {
    let ledger = UnavailableLedger::default();
    let parties = PartyDirectory::with_known_roles();

    let err = run_allowance(&ledger, &parties, &clock()).await.unwrap_err();

    assert_matches!(err, WorkflowError::Ledger(LedgerError::Api { status: 503, .. }));
    assert_eq!(ledger.call_count(), 1, "nothing runs after the first failure");
}

// ---------------------------------------------------------------------------
// Bond
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bond_scenario_ends_with_investor2_holding_the_bond() {
    let ledger = Arc::new(MemoryLedger::new());
    let shared: Arc<dyn LedgerApi> = ledger.clone();
    let parties = PartyDirectory::with_known_roles();

    let outcome = run_bond(shared, &parties, &clock()).await.unwrap();

    let bonds = ledger.active(Bond::TEMPLATE_ID);
    assert_eq!(bonds.len(), 1);
    assert_eq!(bonds[0].contract_id, outcome.traded_bond_cid);
    assert_eq!(bonds[0].payload["investor"], "Investor2");
    assert_eq!(bonds[0].payload["maturityDate"], "2029-03-01");

    assert!(ledger.active(BondIssuanceRequest::TEMPLATE_ID).is_empty());
    assert!(ledger.active(BondTradeOffer::TEMPLATE_ID).is_empty());
    assert_eq!(ledger.active(CouponPayment::TEMPLATE_ID).len(), 1);
    assert_ne!(outcome.bond_cid, outcome.traded_bond_cid);
}

#[tokio::test]
async fn bond_scenario_requires_bond_roles() {
    let ledger: Arc<dyn LedgerApi> = Arc::new(MemoryLedger::new());
    let parties = PartyDirectory::new();

    let err = run_bond(ledger, &parties, &clock()).await.unwrap_err();

    assert_matches!(err, WorkflowError::Core(_));
}
