//! Typed wrappers over the raw JSON [`LedgerApi`] operations.
//!
//! These decode payloads into [`Template`] records and encode [`Choice`]
//! arguments, so workflow code never handles `serde_json::Value`.

use ledger_core::types::{Choice, Contract, ContractId, Party, Template};

use crate::api::{ExerciseOutcome, LedgerApi};
use crate::error::LedgerError;

/// All active `T` contracts visible to `acting`.
pub async fn query_contracts<T, L>(ledger: &L, acting: &Party) -> Result<Vec<Contract<T>>, LedgerError>
where
    T: Template,
    L: LedgerApi + ?Sized,
{
    let raw = ledger.query(acting, T::TEMPLATE_ID).await?;
    raw.into_iter()
        .map(|active| -> Result<Contract<T>, LedgerError> {
            let payload = serde_json::from_value(active.payload).map_err(|e| {
                LedgerError::decode(format!("{} {}", T::TEMPLATE_ID, active.contract_id), e)
            })?;
            Ok(Contract {
                contract_id: active.contract_id,
                payload,
            })
        })
        .collect()
}

/// First active `T` contract matching `predicate`, if any.
pub async fn find_contract<T, L, P>(
    ledger: &L,
    acting: &Party,
    predicate: P,
) -> Result<Option<Contract<T>>, LedgerError>
where
    T: Template,
    L: LedgerApi + ?Sized,
    P: Fn(&T) -> bool,
{
    let contracts = query_contracts::<T, L>(ledger, acting).await?;
    Ok(contracts.into_iter().find(|c| predicate(&c.payload)))
}

pub async fn create_contract<T, L>(ledger: &L, acting: &Party, payload: &T) -> Result<ContractId, LedgerError>
where
    T: Template,
    L: LedgerApi + ?Sized,
{
    let payload = serde_json::to_value(payload)
        .map_err(|e| LedgerError::decode(format!("{} payload", T::TEMPLATE_ID), e))?;
    let created = ledger.create(acting, T::TEMPLATE_ID, payload).await?;
    Ok(created.contract_id)
}

pub async fn exercise_choice<C, L>(
    ledger: &L,
    acting: &Party,
    contract_id: &ContractId,
    argument: &C,
) -> Result<ExerciseOutcome, LedgerError>
where
    C: Choice,
    L: LedgerApi + ?Sized,
{
    let argument = serde_json::to_value(argument)
        .map_err(|e| LedgerError::decode(format!("{} argument", C::NAME), e))?;
    ledger
        .exercise(
            acting,
            <C::Template as Template>::TEMPLATE_ID,
            contract_id,
            C::NAME,
            argument,
        )
        .await
}
