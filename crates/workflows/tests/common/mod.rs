//! Shared test doubles for the workflow integration tests.
//!
//! [`MemoryLedger`] keeps active contracts in memory, records every call,
//! and implements just enough of the allowance and bond choices for the
//! scenarios to run. It does not check authorization.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};

use ledger_client::{ActiveContract, CreatedContract, ExerciseOutcome, LedgerApi, LedgerError};
use ledger_core::allowance::{AllowanceAccount, Task, TaskCompletion};
use ledger_core::amount::Amount;
use ledger_core::bond::{Bond, BondIssuanceRequest, BondTradeOffer, CouponPayment};
use ledger_core::clock::FixedClock;
use ledger_core::types::{ContractId, Party, Template};

const ACCOUNT: &str = AllowanceAccount::TEMPLATE_ID;
const TASK: &str = Task::TEMPLATE_ID;
const COMPLETION: &str = TaskCompletion::TEMPLATE_ID;
const ISSUANCE: &str = BondIssuanceRequest::TEMPLATE_ID;
const BOND: &str = Bond::TEMPLATE_ID;
const TRADE_OFFER: &str = BondTradeOffer::TEMPLATE_ID;
const COUPON: &str = CouponPayment::TEMPLATE_ID;

/// Coupon amount the double books for every `PayCoupon`.
pub const COUPON_AMOUNT: &str = "2500.0";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock(today())
}

pub fn amount(s: &str) -> Amount {
    Amount::parse(s).unwrap()
}

// ---------------------------------------------------------------------------
// Recorded calls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Query {
        acting: Party,
        template_id: String,
    },
    Create {
        acting: Party,
        template_id: String,
        payload: Value,
    },
    Exercise {
        acting: Party,
        template_id: String,
        contract_id: ContractId,
        choice: String,
        argument: Value,
    },
}

impl Call {
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Call::Query { .. })
    }

    pub fn acting(&self) -> &Party {
        match self {
            Call::Query { acting, .. } | Call::Create { acting, .. } | Call::Exercise { acting, .. } => acting,
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory ledger
// ---------------------------------------------------------------------------

#[derive(Default)]
struct State {
    next_id: u64,
    active: Vec<ActiveContract>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct MemoryLedger {
    state: Mutex<State>,
}

fn rejected(status: u16, message: impl Into<String>) -> LedgerError {
    LedgerError::Api {
        status,
        errors: vec![message.into()],
    }
}

fn amount_field(payload: &Value, field: &str) -> Result<Amount, LedgerError> {
    payload[field]
        .as_str()
        .and_then(|s| Amount::parse(s).ok())
        .ok_or_else(|| rejected(400, format!("Field '{field}' is not a decimal")))
}

fn contract_id_field(payload: &Value, field: &str) -> Result<ContractId, LedgerError> {
    payload[field]
        .as_str()
        .map(ContractId::new)
        .ok_or_else(|| rejected(400, format!("Field '{field}' is not a contract id")))
}

impl State {
    fn insert(&mut self, template_id: &str, payload: Value) -> ContractId {
        self.next_id += 1;
        let contract_id = ContractId::new(format!("#{}:0", self.next_id));
        self.active.push(ActiveContract {
            contract_id: contract_id.clone(),
            template_id: template_id.to_string(),
            payload,
        });
        contract_id
    }

    fn payload(&self, template_id: &str, contract_id: &ContractId) -> Result<Value, LedgerError> {
        self.active
            .iter()
            .find(|c| &c.contract_id == contract_id && c.template_id == template_id)
            .map(|c| c.payload.clone())
            .ok_or_else(|| rejected(404, format!("Contract could not be found with id {contract_id}")))
    }

    fn archive(&mut self, contract_id: &ContractId) {
        self.active.retain(|c| &c.contract_id != contract_id);
    }

    fn exercise(
        &mut self,
        template_id: &str,
        cid: &ContractId,
        choice: &str,
        argument: &Value,
    ) -> Result<Value, LedgerError> {
        let mut payload = self.payload(template_id, cid)?;

        let result = match (template_id, choice) {
            (ACCOUNT, "PayWeeklyAllowance") => {
                let balance = amount_field(&payload, "balance")?;
                let weekly = amount_field(&payload, "weeklyAmount")?;
                payload["balance"] = json!(balance.checked_add(&weekly).unwrap());
                payload["lastPaymentDate"] = argument["today"].clone();
                self.archive(cid);
                json!(self.insert(template_id, payload))
            }
            (ACCOUNT, "MakeBonusPayment") => {
                let balance = amount_field(&payload, "balance")?;
                let bonus = amount_field(argument, "amount")?;
                payload["balance"] = json!(balance.checked_add(&bonus).unwrap());
                self.archive(cid);
                json!(self.insert(template_id, payload))
            }
            (ACCOUNT, "WithdrawMoney") => {
                let balance = amount_field(&payload, "balance")?;
                let withdrawal = amount_field(argument, "amount")?;
                let remaining = balance.checked_sub(&withdrawal).unwrap();
                if remaining.is_negative() {
                    return Err(rejected(400, "Insufficient funds"));
                }
                payload["balance"] = json!(remaining);
                self.archive(cid);
                json!(self.insert(template_id, payload))
            }
            (TASK, "CompleteTask") => {
                self.archive(cid);
                let completion = json!({
                    "parent": payload["parent"],
                    "child": payload["child"],
                    "childName": payload["childName"],
                    "description": payload["description"],
                    "reward": payload["reward"],
                    "currency": payload["currency"],
                    "completionDate": argument["completionDate"],
                });
                json!(self.insert(COMPLETION, completion))
            }
            (COMPLETION, "ApproveAndPay") => {
                let account_cid = contract_id_field(argument, "allowanceAccountCid")?;
                let mut account = self.payload(ACCOUNT, &account_cid)?;
                let balance = amount_field(&account, "balance")?;
                let reward = amount_field(&payload, "reward")?;
                account["balance"] = json!(balance.checked_add(&reward).unwrap());

                self.archive(cid);
                self.archive(&account_cid);
                json!(self.insert(ACCOUNT, account))
            }
            (ISSUANCE, "AcceptIssuance") => {
                self.archive(cid);
                json!(self.insert(BOND, payload))
            }
            (BOND, "PayCoupon") => {
                let coupon = json!({
                    "bond": cid,
                    "investor": payload["investor"],
                    "amount": COUPON_AMOUNT,
                    "paymentDate": payload["issueDate"],
                });
                json!(self.insert(COUPON, coupon))
            }
            (BOND, "TransferBond") => {
                payload["investor"] = argument["newInvestor"].clone();
                self.archive(cid);
                json!(self.insert(template_id, payload))
            }
            (TRADE_OFFER, "AcceptTradeOffer") => {
                let bond_cid = contract_id_field(argument, "bondCid")?;
                let mut bond = self.payload(BOND, &bond_cid)?;
                if bond["investor"] != payload["seller"] {
                    return Err(rejected(400, "Seller does not hold the bond"));
                }
                bond["investor"] = payload["buyer"].clone();

                self.archive(cid);
                self.archive(&bond_cid);
                json!(self.insert(BOND, bond))
            }
            _ => return Err(rejected(400, format!("Unknown choice {choice} on {template_id}"))),
        };
        Ok(result)
    }
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a contract on the ledger without recording a call.
    pub fn seed(&self, template_id: &str, payload: Value) -> ContractId {
        self.state.lock().unwrap().insert(template_id, payload)
    }

    pub fn seed_account(&self, child_name: &str, balance: &str, weekly_amount: &str) -> ContractId {
        self.seed(
            ACCOUNT,
            json!({
                "parent": "Parent",
                "child": child_name,
                "childName": child_name,
                "balance": balance,
                "weeklyAmount": weekly_amount,
                "lastPaymentDate": "2024-02-23",
                "currency": "USD",
            }),
        )
    }

    pub fn active(&self, template_id: &str) -> Vec<ActiveContract> {
        self.state
            .lock()
            .unwrap()
            .active
            .iter()
            .filter(|c| c.template_id == template_id)
            .cloned()
            .collect()
    }

    /// Balance of the single active account for `child_name`.
    pub fn balance(&self, child_name: &str) -> Amount {
        let accounts: Vec<_> = self
            .active(ACCOUNT)
            .into_iter()
            .filter(|c| c.payload["childName"] == child_name)
            .collect();
        assert_eq!(accounts.len(), 1, "expected one account for {child_name}");
        amount(accounts[0].payload["balance"].as_str().unwrap())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutating).collect()
    }

    pub fn exercises_of(&self, choice: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Exercise { choice: name, .. } if name == choice))
            .collect()
    }
}

#[async_trait]
impl LedgerApi for MemoryLedger {
    async fn query(&self, acting: &Party, template_id: &str) -> Result<Vec<ActiveContract>, LedgerError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Query {
            acting: acting.clone(),
            template_id: template_id.to_string(),
        });
        Ok(state
            .active
            .iter()
            .filter(|c| c.template_id == template_id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        acting: &Party,
        template_id: &str,
        payload: Value,
    ) -> Result<CreatedContract, LedgerError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create {
            acting: acting.clone(),
            template_id: template_id.to_string(),
            payload: payload.clone(),
        });
        let contract_id = state.insert(template_id, payload);
        Ok(CreatedContract { contract_id })
    }

    async fn exercise(
        &self,
        acting: &Party,
        template_id: &str,
        contract_id: &ContractId,
        choice: &str,
        argument: Value,
    ) -> Result<ExerciseOutcome, LedgerError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Exercise {
            acting: acting.clone(),
            template_id: template_id.to_string(),
            contract_id: contract_id.clone(),
            choice: choice.to_string(),
            argument: argument.clone(),
        });
        let exercise_result = state.exercise(template_id, contract_id, choice, &argument)?;
        Ok(ExerciseOutcome { exercise_result })
    }
}

// ---------------------------------------------------------------------------
// Always-failing ledger
// ---------------------------------------------------------------------------

/// Rejects every call as if the gateway were down.
#[derive(Default)]
pub struct UnavailableLedger {
    calls: Mutex<usize>,
}

impl UnavailableLedger {
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn fail(&self) -> LedgerError {
        *self.calls.lock().unwrap() += 1;
        rejected(503, "Service unavailable")
    }
}

#[async_trait]
impl LedgerApi for UnavailableLedger {
    async fn query(&self, _: &Party, _: &str) -> Result<Vec<ActiveContract>, LedgerError> {
        Err(self.fail())
    }

    async fn create(&self, _: &Party, _: &str, _: Value) -> Result<CreatedContract, LedgerError> {
        Err(self.fail())
    }

    async fn exercise(
        &self,
        _: &Party,
        _: &str,
        _: &ContractId,
        _: &str,
        _: Value,
    ) -> Result<ExerciseOutcome, LedgerError> {
        Err(self.fail())
    }
}
