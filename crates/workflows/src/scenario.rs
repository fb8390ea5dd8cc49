//! End-to-end scripted scenarios.
//!
//! Both scenarios are fixed, linear sequences. In the allowance scenario a
//! step whose lookup finds nothing is logged and skipped; any remote call
//! failure ends the scenario with an error.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Months;
use ledger_client::LedgerApi;
use ledger_core::allowance::DEFAULT_TASK_DUE_DAYS;
use ledger_core::amount::Amount;
use ledger_core::bond::BondData;
use ledger_core::clock::Clock;
use ledger_core::error::CoreError;
use ledger_core::party::{
    PartyDirectory, ROLE_EMMA, ROLE_INVESTOR1, ROLE_INVESTOR2, ROLE_ISSUER, ROLE_JAMES,
};
use ledger_core::types::ContractId;

use crate::allowance::AllowanceWorkflow;
use crate::bond::{BondClient, IssuanceTerms};
use crate::error::WorkflowError;
use crate::summary::to_pretty_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenarioKind {
    #[default]
    Allowance,
    Bond,
}

impl FromStr for ScenarioKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allowance" => Ok(Self::Allowance),
            "bond" => Ok(Self::Bond),
            other => Err(CoreError::Validation(format!(
                "Unknown scenario '{other}'. Must be one of: allowance, bond"
            ))),
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowance => f.write_str("allowance"),
            Self::Bond => f.write_str("bond"),
        }
    }
}

/// Turn a lookup miss into `None` so the script can carry on. The step
/// has already logged it.
pub fn skip_not_found<T>(result: Result<T, WorkflowError>) -> Result<Option<T>, WorkflowError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// Allowance
// ---------------------------------------------------------------------------

pub const BONUS_AMOUNT: &str = "10.0";
pub const BONUS_REASON: &str = "Great report card!";
pub const WITHDRAW_AMOUNT: &str = "5.0";
pub const WITHDRAW_DESCRIPTION: &str = "Ice cream with friends";
pub const TASK_DESCRIPTION: &str = "Clean your room";
pub const TASK_REWARD: &str = "5.0";

/// Pay, bonus, withdraw, then a full task round trip for James.
pub async fn run_allowance(
    ledger: &dyn LedgerApi,
    parties: &PartyDirectory,
    clock: &dyn Clock,
) -> Result<(), WorkflowError> {
    let workflow = AllowanceWorkflow::new(ledger, parties, clock);

    tracing::info!("=== Viewing all allowance accounts ===");
    workflow.view_all_accounts().await?;

    tracing::info!("=== Paying weekly allowance to {ROLE_EMMA} ===");
    skip_not_found(workflow.pay_weekly_allowance(ROLE_EMMA).await)?;

    tracing::info!("=== Making bonus payment to {ROLE_JAMES} ===");
    let bonus = Amount::parse(BONUS_AMOUNT)?;
    skip_not_found(workflow.make_bonus_payment(ROLE_JAMES, &bonus, BONUS_REASON).await)?;

    tracing::info!("=== {ROLE_EMMA} withdrawing money ===");
    let withdrawal = Amount::parse(WITHDRAW_AMOUNT)?;
    skip_not_found(
        workflow
            .child_withdraw(ROLE_EMMA, &withdrawal, WITHDRAW_DESCRIPTION)
            .await,
    )?;

    tracing::info!("=== Creating task for {ROLE_JAMES} ===");
    let reward = Amount::parse(TASK_REWARD)?;
    workflow
        .create_task(ROLE_JAMES, TASK_DESCRIPTION, &reward, DEFAULT_TASK_DUE_DAYS)
        .await?;

    tracing::info!("=== Viewing tasks ===");
    workflow.view_tasks(None).await?;

    tracing::info!("=== {ROLE_JAMES} completing task ===");
    skip_not_found(workflow.complete_task(ROLE_JAMES, TASK_DESCRIPTION).await)?;

    tracing::info!("=== Approving task for {ROLE_JAMES} ===");
    skip_not_found(workflow.approve_task(ROLE_JAMES, TASK_DESCRIPTION).await)?;

    tracing::info!("=== Final account state ===");
    workflow.view_all_accounts().await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Bond
// ---------------------------------------------------------------------------

pub const BOND_ISIN: &str = "US1234567890";
pub const BOND_CURRENCY: &str = "USD";
pub const BOND_DENOMINATION: &str = "100000.0";
pub const BOND_COUPON_RATE: &str = "0.05";
/// Semi-annual.
pub const BOND_COUPON_FREQUENCY: i64 = 2;
pub const BOND_TERM_MONTHS: u32 = 60;
pub const TRADE_PRICE: &str = "102000.0";

/// Contract ids produced along the bond scenario.
#[derive(Debug, Clone)]
pub struct BondScenarioOutcome {
    pub request_cid: ContractId,
    pub bond_cid: ContractId,
    pub offer_cid: ContractId,
    /// The bond as held by Investor2 after the trade.
    pub traded_bond_cid: ContractId,
}

/// Issue, accept, pay a coupon, then trade the bond from Investor1 to
/// Investor2.
pub async fn run_bond(
    ledger: Arc<dyn LedgerApi>,
    parties: &PartyDirectory,
    clock: &dyn Clock,
) -> Result<BondScenarioOutcome, WorkflowError> {
    let issuer = BondClient::new(Arc::clone(&ledger), parties.resolve(ROLE_ISSUER)?.clone());
    let investor1 = BondClient::new(Arc::clone(&ledger), parties.resolve(ROLE_INVESTOR1)?.clone());
    let investor2 = BondClient::new(ledger, parties.resolve(ROLE_INVESTOR2)?.clone());

    let today = clock.today();
    let maturity_date = today
        .checked_add_months(Months::new(BOND_TERM_MONTHS))
        .ok_or_else(|| CoreError::Validation(format!("Maturity {BOND_TERM_MONTHS} months from {today} is out of range")))?;
    let denomination = Amount::parse(BOND_DENOMINATION)?;

    tracing::info!(step = 1, "Creating bond issuance request");
    let request_cid = issuer
        .issue_bond_request(IssuanceTerms {
            investor: investor1.party().clone(),
            isin: BOND_ISIN.to_string(),
            currency: BOND_CURRENCY.to_string(),
            denomination: denomination.clone(),
            issue_date: today,
            maturity_date,
            coupon_rate: Amount::parse(BOND_COUPON_RATE)?,
            coupon_frequency: BOND_COUPON_FREQUENCY,
        })
        .await?;

    tracing::info!(step = 2, "Investor accepting bond");
    let bond_cid = investor1.accept_bond_issuance(&request_cid).await?;

    tracing::info!(step = 3, "Viewing active bonds");
    let bonds = issuer.list_active_bonds().await?;
    tracing::info!("Active bonds: {}", to_pretty_json(&bonds));

    tracing::info!(step = 4, "Paying first coupon");
    issuer.pay_coupon(&bond_cid).await?;

    tracing::info!(step = 5, "Viewing coupon payments");
    let payments = investor1.list_coupon_payments().await?;
    tracing::info!("Coupon payments: {}", to_pretty_json(&payments));

    tracing::info!(step = 6, "Investor2 creating trade offer");
    let bond_data = BondData {
        issuer: issuer.party().clone(),
        isin: BOND_ISIN.to_string(),
        denomination,
        maturity_date,
    };
    let offer_cid = investor2
        .create_trade_offer(
            investor1.party(),
            &Amount::parse(TRADE_PRICE)?,
            BOND_CURRENCY,
            bond_data,
        )
        .await?;

    tracing::info!(step = 7, "Investor1 accepting trade");
    let traded_bond_cid = investor1.accept_trade_offer(&offer_cid, &bond_cid).await?;

    tracing::info!(
        owner = %investor2.party(),
        contract_id = %traded_bond_cid,
        "Bond workflow completed",
    );

    Ok(BondScenarioOutcome {
        request_cid,
        bond_cid,
        offer_cid,
        traded_bond_cid,
    })
}
