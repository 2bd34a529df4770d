//! Ledger integration: receivables from proposals, payables from
//! allocations, and the cashflow dashboard

use serde_json::Value;
use studioflow_common::types::ProposalStatus;

use crate::check;
use crate::error::{E2eError, E2eResult};
use crate::fixtures;
use crate::runner::{Scenario, ScenarioCtx};

pub fn scenario() -> Scenario {
    Scenario {
        name: "financial",
        description: "acceptance and allocation feed the ledger; cashflow dashboard is well-typed",
        tags: &["financial"],
        run: |ctx| Box::pin(run(ctx)),
    }
}

async fn run(ctx: &mut ScenarioCtx) -> E2eResult<()> {
    let client = ctx.api.create_client(&fixtures::client()).await?;
    check::created(&client, "create client")?;
    let client_id = check::require_id(&client.body, "create client")?;
    ctx.cleanup.defer(format!("/clients/{client_id}"));

    // Accepting a proposal books the receivable side.
    let proposal = ctx.api.create_proposal(&fixtures::proposal(&client_id)).await?;
    check::created(&proposal, "create proposal")?;
    let proposal_id = check::require_id(&proposal.body, "create proposal")?;
    ctx.cleanup.defer(format!("/proposals/{proposal_id}"));

    let accepted = ctx.api.accept_proposal(&proposal_id).await?;
    check::ok(&accepted, "accept proposal")?;
    check::expect_str_eq(
        &accepted.body,
        "status",
        ProposalStatus::Accepted.as_str(),
        "accept proposal",
    )?;

    let receivables = ctx.api.receivables().await?;
    check::ok(&receivables, "receivables")?;
    expect_reference(&receivables.body, "proposal_id", &proposal_id, "receivables")?;

    // Allocating a freelancer books the payable side.
    let freelancer = ctx.api.create_freelancer(&fixtures::freelancer()).await?;
    check::created(&freelancer, "create freelancer")?;
    let freelancer_id = check::require_id(&freelancer.body, "create freelancer")?;
    ctx.cleanup.defer(format!("/freelancers/{freelancer_id}"));

    let project = ctx.api.create_project(&fixtures::bare_project()).await?;
    check::created(&project, "create project")?;
    let project_id = check::require_id(&project.body, "create project")?;
    ctx.cleanup.defer(format!("/projects/{project_id}"));

    let allocation = ctx
        .api
        .create_allocation(&fixtures::allocation(&freelancer_id, &project_id))
        .await?;
    check::created(&allocation, "create allocation")?;
    let allocation_id = check::require_id(&allocation.body, "create allocation")?;
    ctx.cleanup
        .defer(format!("/freelancer-allocations/{allocation_id}"));

    let payables = ctx.api.payables().await?;
    check::ok(&payables, "payables")?;
    expect_reference(&payables.body, "freelancer_id", &freelancer_id, "payables")?;

    // The raw transaction list carries both sides.
    let transactions = ctx.api.transactions(&[]).await?;
    check::ok(&transactions, "transactions")?;
    expect_reference(&transactions.body, "proposal_id", &proposal_id, "transactions")?;

    // Cashflow dashboard: required keys, numeric balance, even when thin.
    let dashboard = ctx.api.cashflow_dashboard().await?;
    check::ok(&dashboard, "cashflow dashboard")?;
    check::require_f64(&dashboard.body, "total_inflow", "cashflow dashboard")?;
    check::require_f64(&dashboard.body, "total_outflow", "cashflow dashboard")?;
    check::require_f64(&dashboard.body, "cash_balance", "cashflow dashboard")?;

    Ok(())
}

/// The array response must contain an entry whose `field` references `id`.
fn expect_reference(body: &Value, field: &str, id: &str, context: &str) -> E2eResult<()> {
    let entries = body
        .as_array()
        .ok_or_else(|| E2eError::Assertion(format!("{context} response is not an array")))?;
    if entries
        .iter()
        .any(|entry| check::id_field_matches(entry, field, id))
    {
        Ok(())
    } else {
        Err(E2eError::Assertion(format!(
            "{context}: no entry with {field} == {id:?}"
        )))
    }
}
