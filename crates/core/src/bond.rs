//! Fixed-rate bond templates and their choices (`FixedRateBond` module).
//!
//! Lifecycle on the ledger: an issuer proposes a [`BondIssuanceRequest`],
//! the investor accepts it into a [`Bond`], the issuer pays coupons
//! ([`CouponPayment`]), and holders trade through [`BondTradeOffer`] or a
//! direct transfer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::CoreError;
use crate::types::{Choice, ContractId, Party, Template};

/// ISIN length: 2-letter country, 9 alphanumerics, 1 check digit.
pub const ISIN_LEN: usize = 12;

/// Structural ISIN check. The check digit itself is not verified.
pub fn validate_isin(isin: &str) -> Result<(), CoreError> {
    let bytes = isin.as_bytes();
    let well_formed = bytes.len() == ISIN_LEN
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..11]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        && bytes[11].is_ascii_digit();

    if well_formed {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid ISIN '{isin}'. Expected 2 letters, 9 alphanumerics and a check digit"
        )))
    }
}

/// Coupon frequency must divide the year into whole periods.
pub fn validate_coupon_frequency(frequency: i64) -> Result<(), CoreError> {
    match frequency {
        1 | 2 | 4 | 12 => Ok(()),
        other => Err(CoreError::Validation(format!(
            "Invalid coupon frequency {other}. Must be one of: 1, 2, 4, 12"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondIssuanceRequest {
    pub issuer: Party,
    pub investor: Party,
    pub isin: String,
    pub currency: String,
    pub denomination: Amount,
    pub issue_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub coupon_rate: Amount,
    pub coupon_frequency: i64,
}

impl Template for BondIssuanceRequest {
    const TEMPLATE_ID: &'static str = "FixedRateBond:BondIssuanceRequest";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    pub issuer: Party,
    pub investor: Party,
    pub isin: String,
    pub denomination: Amount,
    pub coupon_rate: Amount,
    pub maturity_date: NaiveDate,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    pub coupon_frequency: Option<i64>,
}

impl Template for Bond {
    const TEMPLATE_ID: &'static str = "FixedRateBond:Bond";
}

/// Identifies the bond a trade offer is for, independent of its holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondData {
    pub issuer: Party,
    pub isin: String,
    pub denomination: Amount,
    pub maturity_date: NaiveDate,
}

impl From<&Bond> for BondData {
    fn from(bond: &Bond) -> Self {
        Self {
            issuer: bond.issuer.clone(),
            isin: bond.isin.clone(),
            denomination: bond.denomination.clone(),
            maturity_date: bond.maturity_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondTradeOffer {
    pub bond_data: BondData,
    pub seller: Party,
    pub buyer: Party,
    pub price: Amount,
    pub currency: String,
}

impl Template for BondTradeOffer {
    const TEMPLATE_ID: &'static str = "FixedRateBond:BondTradeOffer";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPayment {
    /// Reference to the paying bond, in whatever shape the template uses.
    pub bond: serde_json::Value,
    pub investor: Party,
    pub amount: Amount,
    pub payment_date: NaiveDate,
}

impl Template for CouponPayment {
    const TEMPLATE_ID: &'static str = "FixedRateBond:CouponPayment";
}

// ---------------------------------------------------------------------------
// Choices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct AcceptIssuance {}

impl Choice for AcceptIssuance {
    type Template = BondIssuanceRequest;
    const NAME: &'static str = "AcceptIssuance";
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PayCoupon {}

impl Choice for PayCoupon {
    type Template = Bond;
    const NAME: &'static str = "PayCoupon";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBond {
    pub new_investor: Party,
}

impl Choice for TransferBond {
    type Template = Bond;
    const NAME: &'static str = "TransferBond";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptTradeOffer {
    pub bond_cid: ContractId,
}

impl Choice for AcceptTradeOffer {
    type Template = BondTradeOffer;
    const NAME: &'static str = "AcceptTradeOffer";
}
