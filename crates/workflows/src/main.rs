//! `ledger-workflows` -- runs one scripted scenario against a ledger
//! JSON API.
//!
//! # Environment variables
//!
//! | Variable              | Required | Default     | Description                          |
//! |-----------------------|----------|-------------|--------------------------------------|
//! | `LEDGER_HOST`         | no       | `localhost` | JSON API host                        |
//! | `LEDGER_PORT`         | no       | `7575`      | JSON API port                        |
//! | `LEDGER_TOKEN`        | yes      | --          | Bearer token covering every party    |
//! | `LEDGER_TLS`          | no       | `false`     | Use `https`                          |
//! | `LEDGER_TIMEOUT_SECS` | no       | `30`        | Per-request timeout                  |
//! | `LEDGER_PARTY_<ROLE>` | no       | role name   | Party id for a role, e.g. `LEDGER_PARTY_EMMA` |
//! | `SCENARIO`            | no       | `allowance` | `allowance` or `bond`                |

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledger_client::{HttpLedger, LedgerApi, LedgerConfig};
use ledger_core::clock::SystemClock;
use ledger_core::party::PartyDirectory;
use ledger_workflows::scenario::{self, ScenarioKind};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledger_workflows=info,ledger_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Scenario failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = LedgerConfig::from_env().context("Failed to load ledger configuration")?;

    let kind: ScenarioKind = match std::env::var("SCENARIO") {
        Ok(raw) => raw.parse()?,
        Err(_) => ScenarioKind::default(),
    };

    let parties = PartyDirectory::with_known_roles().with_overrides(|key| std::env::var(key).ok());
    for (role, party) in parties.roles() {
        tracing::debug!(role, party = %party, "Party mapping");
    }

    let ledger: Arc<dyn LedgerApi> =
        Arc::new(HttpLedger::new(&config).context("Failed to build HTTP client")?);

    tracing::info!(
        scenario = %kind,
        ledger = %config.base_url(),
        "Starting ledger-workflows",
    );

    match kind {
        ScenarioKind::Allowance => {
            scenario::run_allowance(ledger.as_ref(), &parties, &SystemClock)
                .await
                .context("Allowance scenario aborted")?;
        }
        ScenarioKind::Bond => {
            let outcome = scenario::run_bond(ledger, &parties, &SystemClock)
                .await
                .context("Bond scenario aborted")?;
            tracing::info!(bond = %outcome.traded_bond_cid, "Bond now owned by Investor2");
        }
    }

    tracing::info!(scenario = %kind, "Scenario completed");
    Ok(())
}
