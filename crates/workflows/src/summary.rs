//! Flattened views of bond contracts for reporting.

use chrono::NaiveDate;
use ledger_core::amount::Amount;
use ledger_core::bond::{Bond, CouponPayment};
use ledger_core::types::{Contract, ContractId, Party};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondSummary {
    pub contract_id: ContractId,
    pub isin: String,
    pub denomination: Amount,
    pub investor: Party,
    pub coupon_rate: Amount,
    pub maturity_date: NaiveDate,
}

impl From<Contract<Bond>> for BondSummary {
    fn from(contract: Contract<Bond>) -> Self {
        let bond = contract.payload;
        Self {
            contract_id: contract.contract_id,
            isin: bond.isin,
            denomination: bond.denomination,
            investor: bond.investor,
            coupon_rate: bond.coupon_rate,
            maturity_date: bond.maturity_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouponSummary {
    pub contract_id: ContractId,
    pub bond: serde_json::Value,
    pub investor: Party,
    pub amount: Amount,
    pub payment_date: NaiveDate,
}

impl From<Contract<CouponPayment>> for CouponSummary {
    fn from(contract: Contract<CouponPayment>) -> Self {
        let payment = contract.payload;
        Self {
            contract_id: contract.contract_id,
            bond: payment.bond,
            investor: payment.investor,
            amount: payment.amount,
            payment_date: payment.payment_date,
        }
    }
}

/// Pretty JSON for log output. Falls back to `Debug` if serialization
/// somehow fails.
pub fn to_pretty_json<T: Serialize + std::fmt::Debug>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
}
