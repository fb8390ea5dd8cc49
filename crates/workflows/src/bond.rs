//! Fixed-rate bond client.
//!
//! One [`BondClient`] per party: every create and exercise it submits
//! acts as that party, every query reads as that party. Steps take
//! contract ids from earlier steps rather than looking contracts up.

use std::sync::Arc;

use chrono::NaiveDate;
use ledger_client::typed::{create_contract, exercise_choice, query_contracts};
use ledger_client::{ExerciseOutcome, LedgerApi};
use ledger_core::amount::Amount;
use ledger_core::bond::{
    validate_coupon_frequency, validate_isin, AcceptIssuance, AcceptTradeOffer, Bond, BondData,
    BondIssuanceRequest, BondTradeOffer, CouponPayment, PayCoupon, TransferBond,
};
use ledger_core::error::CoreError;
use ledger_core::types::{Choice, ContractId, Party};

use crate::error::WorkflowError;
use crate::summary::{BondSummary, CouponSummary};

/// Terms of a new issuance. The issuer is the client's own party.
#[derive(Debug, Clone)]
pub struct IssuanceTerms {
    pub investor: Party,
    pub isin: String,
    pub currency: String,
    pub denomination: Amount,
    pub issue_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub coupon_rate: Amount,
    pub coupon_frequency: i64,
}

impl IssuanceTerms {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_isin(&self.isin)?;
        validate_coupon_frequency(self.coupon_frequency)?;
        if self.maturity_date <= self.issue_date {
            return Err(CoreError::Validation(format!(
                "Maturity date {} must be after issue date {}",
                self.maturity_date, self.issue_date
            )));
        }
        if self.denomination <= Amount::zero() {
            return Err(CoreError::Validation(format!(
                "Denomination must be positive, got {}",
                self.denomination
            )));
        }
        Ok(())
    }
}

pub struct BondClient {
    ledger: Arc<dyn LedgerApi>,
    party: Party,
}

impl BondClient {
    pub fn new(ledger: Arc<dyn LedgerApi>, party: Party) -> Self {
        Self { ledger, party }
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    async fn exercise<C: Choice>(
        &self,
        contract_id: &ContractId,
        argument: &C,
    ) -> Result<ExerciseOutcome, WorkflowError> {
        Ok(exercise_choice(self.ledger.as_ref(), &self.party, contract_id, argument).await?)
    }

    /// Issuer proposes a bond to an investor.
    pub async fn issue_bond_request(&self, terms: IssuanceTerms) -> Result<ContractId, WorkflowError> {
        terms.validate()?;

        let request = BondIssuanceRequest {
            issuer: self.party.clone(),
            investor: terms.investor,
            isin: terms.isin,
            currency: terms.currency,
            denomination: terms.denomination,
            issue_date: terms.issue_date,
            maturity_date: terms.maturity_date,
            coupon_rate: terms.coupon_rate,
            coupon_frequency: terms.coupon_frequency,
        };
        let contract_id = create_contract(self.ledger.as_ref(), &self.party, &request).await?;

        tracing::info!(
            issuer = %self.party,
            isin = %request.isin,
            contract_id = %contract_id,
            "Bond issuance request created",
        );
        Ok(contract_id)
    }

    /// Investor accepts an issuance request; returns the new bond.
    pub async fn accept_bond_issuance(&self, request_cid: &ContractId) -> Result<ContractId, WorkflowError> {
        let outcome = self.exercise(request_cid, &AcceptIssuance {}).await?;
        let bond_cid: ContractId = outcome.decode(AcceptIssuance::NAME)?;

        tracing::info!(investor = %self.party, contract_id = %bond_cid, "Bond issued");
        Ok(bond_cid)
    }

    /// Issuer pays the next coupon on a bond.
    pub async fn pay_coupon(&self, bond_cid: &ContractId) -> Result<ExerciseOutcome, WorkflowError> {
        let outcome = self.exercise(bond_cid, &PayCoupon {}).await?;

        tracing::info!(issuer = %self.party, bond = %bond_cid, "Coupon paid");
        Ok(outcome)
    }

    /// Investor hands the bond to `new_investor`; returns the re-issued
    /// bond's contract id.
    pub async fn transfer_bond(
        &self,
        bond_cid: &ContractId,
        new_investor: &Party,
    ) -> Result<ContractId, WorkflowError> {
        let arg = TransferBond {
            new_investor: new_investor.clone(),
        };
        let outcome = self.exercise(bond_cid, &arg).await?;
        let new_cid: ContractId = outcome.decode(TransferBond::NAME)?;

        tracing::info!(
            new_investor = %new_investor,
            contract_id = %new_cid,
            "Bond transferred",
        );
        Ok(new_cid)
    }

    /// Buyer offers to purchase a bond from `seller`.
    pub async fn create_trade_offer(
        &self,
        seller: &Party,
        price: &Amount,
        currency: &str,
        bond_data: BondData,
    ) -> Result<ContractId, WorkflowError> {
        let offer = BondTradeOffer {
            bond_data,
            seller: seller.clone(),
            buyer: self.party.clone(),
            price: price.clone(),
            currency: currency.to_string(),
        };
        let contract_id = create_contract(self.ledger.as_ref(), &self.party, &offer).await?;

        tracing::info!(
            buyer = %self.party,
            seller = %seller,
            %price,
            contract_id = %contract_id,
            "Trade offer created",
        );
        Ok(contract_id)
    }

    /// Seller accepts an offer, handing over `bond_cid`; returns the
    /// buyer's bond.
    pub async fn accept_trade_offer(
        &self,
        offer_cid: &ContractId,
        bond_cid: &ContractId,
    ) -> Result<ContractId, WorkflowError> {
        let arg = AcceptTradeOffer {
            bond_cid: bond_cid.clone(),
        };
        let outcome = self.exercise(offer_cid, &arg).await?;
        let new_cid: ContractId = outcome.decode(AcceptTradeOffer::NAME)?;

        tracing::info!(seller = %self.party, contract_id = %new_cid, "Trade accepted");
        Ok(new_cid)
    }

    /// Bonds visible to this party, flattened for display.
    pub async fn list_active_bonds(&self) -> Result<Vec<BondSummary>, WorkflowError> {
        let bonds = query_contracts::<Bond, _>(self.ledger.as_ref(), &self.party).await?;
        Ok(bonds.into_iter().map(BondSummary::from).collect())
    }

    /// Coupon payments visible to this party.
    pub async fn list_coupon_payments(&self) -> Result<Vec<CouponSummary>, WorkflowError> {
        let payments = query_contracts::<CouponPayment, _>(self.ledger.as_ref(), &self.party).await?;
        Ok(payments.into_iter().map(CouponSummary::from).collect())
    }
}
