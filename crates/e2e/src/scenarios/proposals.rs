//! Proposal building, totals, public sharing, and acceptance

use serde_json::Value;
use studioflow_common::money;
use studioflow_common::types::ProposalStatus;

use crate::check;
use crate::error::{E2eError, E2eResult};
use crate::fixtures;
use crate::runner::{Scenario, ScenarioCtx};

pub fn scenario() -> Scenario {
    Scenario {
        name: "proposals",
        description: "build a proposal, verify totals and sharing, accept it into the ledger",
        tags: &["proposals", "financial"],
        run: |ctx| Box::pin(run(ctx)),
    }
}

async fn run(ctx: &mut ScenarioCtx) -> E2eResult<()> {
    let client = ctx.api.create_client(&fixtures::client()).await?;
    check::created(&client, "create client")?;
    let client_id = check::require_id(&client.body, "create client")?;
    ctx.cleanup.defer(format!("/clients/{client_id}"));

    let payload = fixtures::proposal(&client_id);
    let created = ctx.api.create_proposal(&payload).await?;
    check::created(&created, "create proposal")?;
    let proposal_id = check::require_id(&created.body, "create proposal")?;
    ctx.cleanup.defer(format!("/proposals/{proposal_id}"));

    let fetched = ctx.api.get_proposal(&proposal_id).await?;
    check::ok(&fetched, "get proposal")?;

    let items = check::require_array(&fetched.body, "items", "get proposal")?;
    let optionals = check::require_array(&fetched.body, "optionals", "get proposal")?;
    if items.len() != payload.items.len() || optionals.len() != payload.optionals.len() {
        return Err(E2eError::Assertion(format!(
            "proposal echoed {} items and {} optionals, submitted {} and {}",
            items.len(),
            optionals.len(),
            payload.items.len(),
            payload.optionals.len()
        )));
    }

    // The server's total must match Σ quantity × unit_price over the lines
    // it echoed, within the monetary tolerance.
    let expected: f64 = lines_total(items, "items")? + lines_total(optionals, "optionals")?;
    let total = check::require_f64(&fetched.body, "total", "get proposal")?;
    check::expect_f64_near(total, expected, "proposal total")?;

    // Payment schedule percentages may not exceed 100.
    let schedule = check::require_array(&fetched.body, "payment_schedules", "get proposal")?;
    let mut percent_sum = 0.0;
    for entry in schedule {
        percent_sum += check::require_f64(entry, "percentage", "payment schedule")?;
    }
    if percent_sum > 100.0 + money::MONEY_TOLERANCE {
        return Err(E2eError::Assertion(format!(
            "payment schedule sums to {percent_sum}%"
        )));
    }

    let videos = check::require_array(&fetched.body, "portfolio_videos", "get proposal")?;
    if videos.is_empty() {
        return Err(E2eError::Assertion(
            "portfolio videos missing from proposal".to_string(),
        ));
    }

    // Public sharing: the token grants unauthenticated read access.
    if !check::require_bool(&fetched.body, "public_sharing", "get proposal")? {
        return Err(E2eError::Assertion(
            "public_sharing was submitted as true but echoed false".to_string(),
        ));
    }
    let token = check::require_str(&fetched.body, "public_token", "get proposal")?.to_string();
    ctx.api.clear_bearer();
    let shared = ctx.api.public_proposal(&token).await?;
    check::ok(&shared, "public proposal")?;

    // Acceptance flips the status and feeds the ledger.
    let accepted = ctx.api.accept_proposal(&proposal_id).await?;
    check::ok(&accepted, "accept proposal")?;
    check::expect_str_eq(
        &accepted.body,
        "status",
        ProposalStatus::Accepted.as_str(),
        "accept proposal",
    )?;

    let transactions = ctx
        .api
        .transactions(&[("proposal_id", proposal_id.as_str())])
        .await?;
    check::ok(&transactions, "transactions for proposal")?;
    let list = transactions
        .body
        .as_array()
        .ok_or_else(|| E2eError::Assertion("transactions response is not an array".to_string()))?;
    if list.is_empty() {
        return Err(E2eError::Assertion(
            "accepting the proposal created no financial transaction".to_string(),
        ));
    }

    Ok(())
}

fn lines_total(lines: &[Value], context: &str) -> E2eResult<f64> {
    let mut sum = 0.0;
    for line in lines {
        let quantity = check::require_f64(line, "quantity", context)?;
        let unit_price = check::require_f64(line, "unit_price", context)?;
        sum += money::line_total(quantity, unit_price);
    }
    Ok(sum)
}
