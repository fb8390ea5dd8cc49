//! Allowance app workflow steps.
//!
//! Every mutating step re-queries the ledger, picks the matching contract
//! by child name (and task description where relevant), and exercises a
//! single choice on it. A failed lookup is logged and returned as
//! [`WorkflowError::NotFound`] before anything is submitted.

use chrono::Days;
use ledger_client::typed::{create_contract, exercise_choice, find_contract, query_contracts};
use ledger_client::LedgerApi;
use ledger_core::allowance::{
    AllowanceAccount, ApproveAndPay, CompleteTask, MakeBonusPayment, PayWeeklyAllowance, Task,
    TaskCompletion, WithdrawMoney, DEFAULT_CURRENCY,
};
use ledger_core::amount::Amount;
use ledger_core::clock::Clock;
use ledger_core::error::CoreError;
use ledger_core::party::{PartyDirectory, ROLE_PARENT};
use ledger_core::types::{Contract, ContractId, Party};

use crate::error::WorkflowError;

/// Ledger handle, party directory and date source shared by every step.
pub struct AllowanceWorkflow<'a> {
    ledger: &'a dyn LedgerApi,
    parties: &'a PartyDirectory,
    clock: &'a dyn Clock,
}

impl<'a> AllowanceWorkflow<'a> {
    pub fn new(ledger: &'a dyn LedgerApi, parties: &'a PartyDirectory, clock: &'a dyn Clock) -> Self {
        Self {
            ledger,
            parties,
            clock,
        }
    }

    fn parent(&self) -> Result<&'a Party, WorkflowError> {
        Ok(self.parties.resolve(ROLE_PARENT)?)
    }

    /// Children act under the party registered for their name.
    fn child(&self, child_name: &str) -> Result<&'a Party, WorkflowError> {
        Ok(self.parties.resolve(child_name)?)
    }

    async fn find_account(
        &self,
        acting: &Party,
        child_name: &str,
    ) -> Result<Contract<AllowanceAccount>, WorkflowError> {
        find_contract::<AllowanceAccount, _, _>(self.ledger, acting, |a| a.child_name == child_name)
            .await?
            .ok_or_else(|| {
                tracing::error!(child = child_name, "Account not found");
                WorkflowError::not_found("Allowance account", child_name)
            })
    }

    /// Every account the parent can see, logged one line each.
    pub async fn view_all_accounts(&self) -> Result<Vec<Contract<AllowanceAccount>>, WorkflowError> {
        let accounts = query_contracts::<AllowanceAccount, _>(self.ledger, self.parent()?).await?;

        for account in &accounts {
            let a = &account.payload;
            tracing::info!(
                child = %a.child_name,
                balance = %a.balance,
                weekly_amount = %a.weekly_amount,
                last_payment = %a.last_payment_date,
                currency = %a.currency,
                "Allowance account",
            );
        }
        Ok(accounts)
    }

    /// Parent credits the child's weekly amount, dated today.
    pub async fn pay_weekly_allowance(&self, child_name: &str) -> Result<(), WorkflowError> {
        let parent = self.parent()?;
        let account = self.find_account(parent, child_name).await?;

        let arg = PayWeeklyAllowance {
            today: self.clock.today(),
        };
        exercise_choice(self.ledger, parent, &account.contract_id, &arg).await?;

        tracing::info!(
            child = child_name,
            amount = %account.payload.weekly_amount,
            "Paid weekly allowance",
        );
        Ok(())
    }

    /// Parent credits a one-off `amount` to the child's account.
    pub async fn make_bonus_payment(
        &self,
        child_name: &str,
        amount: &Amount,
        reason: &str,
    ) -> Result<(), WorkflowError> {
        let parent = self.parent()?;
        let account = self.find_account(parent, child_name).await?;

        let arg = MakeBonusPayment {
            amount: amount.clone(),
            reason: reason.to_string(),
        };
        exercise_choice(self.ledger, parent, &account.contract_id, &arg).await?;

        tracing::info!(child = child_name, %amount, reason, "Paid bonus");
        Ok(())
    }

    /// Child spends from their own account. The ledger rejects the
    /// withdrawal if it would overdraw the balance.
    pub async fn child_withdraw(
        &self,
        child_name: &str,
        amount: &Amount,
        description: &str,
    ) -> Result<(), WorkflowError> {
        let child = self.child(child_name)?;
        let account = self.find_account(child, child_name).await?;

        let arg = WithdrawMoney {
            amount: amount.clone(),
            description: description.to_string(),
        };
        exercise_choice(self.ledger, child, &account.contract_id, &arg).await?;

        tracing::info!(child = child_name, %amount, description, "Withdrew money");
        Ok(())
    }

    /// Parent assigns a task due `due_days` from today.
    pub async fn create_task(
        &self,
        child_name: &str,
        description: &str,
        reward: &Amount,
        due_days: u32,
    ) -> Result<ContractId, WorkflowError> {
        let parent = self.parent()?;
        let child = self.child(child_name)?;
        let due_date = self
            .clock
            .today()
            .checked_add_days(Days::new(u64::from(due_days)))
            .ok_or_else(|| CoreError::Validation(format!("Due date {due_days} days out is out of range")))?;

        let task = Task {
            parent: parent.clone(),
            child: child.clone(),
            child_name: child_name.to_string(),
            description: description.to_string(),
            reward: reward.clone(),
            due_date: Some(due_date),
            currency: DEFAULT_CURRENCY.to_string(),
        };
        let contract_id = create_contract(self.ledger, parent, &task).await?;

        tracing::info!(
            child = child_name,
            task = description,
            %reward,
            due = %due_date,
            contract_id = %contract_id,
            "Created task",
        );
        Ok(contract_id)
    }

    /// All open tasks, or only those for `child_name`.
    pub async fn view_tasks(&self, child_name: Option<&str>) -> Result<Vec<Contract<Task>>, WorkflowError> {
        let tasks = query_contracts::<Task, _>(self.ledger, self.parent()?).await?;

        let tasks: Vec<_> = tasks
            .into_iter()
            .filter(|t| child_name.map_or(true, |name| t.payload.child_name == name))
            .collect();

        for task in &tasks {
            let t = &task.payload;
            let due = t
                .due_date
                .map_or_else(|| "No due date".to_string(), |d| d.to_string());
            tracing::info!(
                child = %t.child_name,
                description = %t.description,
                reward = %t.reward,
                due = %due,
                "Task",
            );
        }
        Ok(tasks)
    }

    /// Child marks a task done, turning it into a completion awaiting
    /// approval.
    pub async fn complete_task(&self, child_name: &str, description: &str) -> Result<(), WorkflowError> {
        let child = self.child(child_name)?;
        let task = find_contract::<Task, _, _>(self.ledger, child, |t| {
            t.child_name == child_name && t.description == description
        })
        .await?
        .ok_or_else(|| {
            tracing::error!(child = child_name, task = description, "Task not found");
            WorkflowError::not_found("Task", description)
        })?;

        let arg = CompleteTask {
            completion_date: self.clock.today(),
        };
        exercise_choice(self.ledger, child, &task.contract_id, &arg).await?;

        tracing::info!(child = child_name, task = description, "Completed task, awaiting approval");
        Ok(())
    }

    /// Parent approves a completed task; the ledger pays the reward into
    /// the child's account and archives the completion.
    pub async fn approve_task(&self, child_name: &str, description: &str) -> Result<(), WorkflowError> {
        let parent = self.parent()?;
        let completion = find_contract::<TaskCompletion, _, _>(self.ledger, parent, |c| {
            c.child_name == child_name && c.description == description
        })
        .await?
        .ok_or_else(|| {
            tracing::error!(child = child_name, task = description, "Task completion not found");
            WorkflowError::not_found("Task completion", description)
        })?;

        let account = self.find_account(parent, child_name).await?;

        let arg = ApproveAndPay {
            allowance_account_cid: account.contract_id,
        };
        exercise_choice(self.ledger, parent, &completion.contract_id, &arg).await?;

        tracing::info!(
            child = child_name,
            task = description,
            reward = %completion.payload.reward,
            "Approved task and paid reward",
        );
        Ok(())
    }
}
