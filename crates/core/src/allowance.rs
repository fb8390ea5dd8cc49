//! Kids allowance templates and their choices (`Allowance` module).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::types::{Choice, ContractId, Party, Template};

/// Currency every task reward is denominated in.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Days from creation until a task is due, unless the caller says otherwise.
pub const DEFAULT_TASK_DUE_DAYS: u32 = 7;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// A child's savings account. The balance only moves through choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceAccount {
    pub parent: Party,
    pub child: Party,
    pub child_name: String,
    pub balance: Amount,
    pub weekly_amount: Amount,
    pub last_payment_date: NaiveDate,
    pub currency: String,
}

impl Template for AllowanceAccount {
    const TEMPLATE_ID: &'static str = "Allowance:AllowanceAccount";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub parent: Party,
    pub child: Party,
    pub child_name: String,
    pub description: String,
    pub reward: Amount,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub currency: String,
}

impl Template for Task {
    const TEMPLATE_ID: &'static str = "Allowance:Task";
}

/// Created when a child completes a task; waits for the parent to pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
    pub parent: Party,
    pub child: Party,
    pub child_name: String,
    pub description: String,
    pub reward: Amount,
    pub currency: String,
    pub completion_date: NaiveDate,
}

impl Template for TaskCompletion {
    const TEMPLATE_ID: &'static str = "Allowance:TaskCompletion";
}

// ---------------------------------------------------------------------------
// Choices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PayWeeklyAllowance {
    pub today: NaiveDate,
}

impl Choice for PayWeeklyAllowance {
    type Template = AllowanceAccount;
    const NAME: &'static str = "PayWeeklyAllowance";
}

#[derive(Debug, Clone, Serialize)]
pub struct MakeBonusPayment {
    pub amount: Amount,
    pub reason: String,
}

impl Choice for MakeBonusPayment {
    type Template = AllowanceAccount;
    const NAME: &'static str = "MakeBonusPayment";
}

#[derive(Debug, Clone, Serialize)]
pub struct WithdrawMoney {
    pub amount: Amount,
    pub description: String,
}

impl Choice for WithdrawMoney {
    type Template = AllowanceAccount;
    const NAME: &'static str = "WithdrawMoney";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTask {
    pub completion_date: NaiveDate,
}

impl Choice for CompleteTask {
    type Template = Task;
    const NAME: &'static str = "CompleteTask";
}

/// Archives the completion and credits the reward to the given account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveAndPay {
    pub allowance_account_cid: ContractId,
}

impl Choice for ApproveAndPay {
    type Template = TaskCompletion;
    const NAME: &'static str = "ApproveAndPay";
}
