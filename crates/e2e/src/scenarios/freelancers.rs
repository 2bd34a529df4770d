//! Freelancer management and the payable side of the ledger

use serde_json::{json, Value};
use studioflow_common::types::{AvailabilityDay, TransactionKind};

use crate::check;
use crate::error::{E2eError, E2eResult};
use crate::fixtures;
use crate::runner::{Scenario, ScenarioCtx};

pub fn scenario() -> Scenario {
    Scenario {
        name: "freelancers",
        description: "rates, availability and rating updates, allocation-driven payables",
        tags: &["freelancers", "financial"],
        run: |ctx| Box::pin(run(ctx)),
    }
}

async fn run(ctx: &mut ScenarioCtx) -> E2eResult<()> {
    let payload = fixtures::freelancer();

    let created = ctx.api.create_freelancer(&payload).await?;
    check::created(&created, "create freelancer")?;
    let freelancer_id = check::require_id(&created.body, "create freelancer")?;
    ctx.cleanup.defer(format!("/freelancers/{freelancer_id}"));

    check::expect_f64_near(
        check::require_f64(&created.body, "rating", "create freelancer")?,
        payload.rating,
        "freelancer rating",
    )?;
    check::expect_f64_near(
        check::require_f64(&created.body, "custom_rate", "create freelancer")?,
        payload.custom_rate,
        "freelancer rate",
    )?;
    let availability = check::require_array(&created.body, "availability", "create freelancer")?;
    if availability.len() != payload.availability.len() {
        return Err(E2eError::Assertion(format!(
            "availability echoed {} days, submitted {}",
            availability.len(),
            payload.availability.len()
        )));
    }

    // A project to allocate against; no client needed for this flow.
    let project = ctx.api.create_project(&fixtures::bare_project()).await?;
    check::created(&project, "create project")?;
    let project_id = check::require_id(&project.body, "create project")?;
    ctx.cleanup.defer(format!("/projects/{project_id}"));

    let allocation_payload = fixtures::allocation(&freelancer_id, &project_id);
    let allocated = ctx.api.create_allocation(&allocation_payload).await?;
    check::created(&allocated, "create allocation")?;
    let allocation_id = check::require_id(&allocated.body, "create allocation")?;
    ctx.cleanup
        .defer(format!("/freelancer-allocations/{allocation_id}"));
    check::expect_id_eq(&allocated.body, "freelancer_id", &freelancer_id, "allocation")?;
    check::expect_id_eq(&allocated.body, "project_id", &project_id, "allocation")?;
    check::expect_f64_near(
        check::require_f64(&allocated.body, "custom_rate", "allocation")?,
        allocation_payload.custom_rate,
        "allocation rate",
    )?;

    // Rating can be adjusted after the fact.
    let updated = ctx
        .api
        .update_freelancer(&freelancer_id, &json!({ "rating": 4.8 }))
        .await?;
    check::ok(&updated, "update rating")?;
    check::expect_f64_near(
        check::require_f64(&updated.body, "rating", "update rating")?,
        4.8,
        "updated rating",
    )?;

    // Replace the availability calendar and confirm the flip took.
    let revised = vec![
        AvailabilityDay {
            date: fixtures::date_from_today(10),
            available: false,
        },
        AvailabilityDay {
            date: fixtures::date_from_today(11),
            available: true,
        },
    ];
    let patched = ctx
        .api
        .update_availability(&freelancer_id, &revised)
        .await?;
    check::ok(&patched, "update availability")?;
    let days = patched.body.as_array().ok_or_else(|| {
        E2eError::Assertion("availability response is not an array".to_string())
    })?;
    let any_blocked = days
        .iter()
        .any(|day| day.get("available").and_then(Value::as_bool) == Some(false));
    if !any_blocked {
        return Err(E2eError::Assertion(
            "availability update did not persist the blocked day".to_string(),
        ));
    }

    // The allocation must have produced a payable transaction.
    let transactions = ctx
        .api
        .transactions(&[("allocation_id", allocation_id.as_str())])
        .await?;
    check::ok(&transactions, "transactions for allocation")?;
    let list = transactions
        .body
        .as_array()
        .ok_or_else(|| E2eError::Assertion("transactions response is not an array".to_string()))?;
    let first = list.first().ok_or_else(|| {
        E2eError::Assertion("no payable transaction created for the allocation".to_string())
    })?;
    check::expect_str_eq(first, "type", TransactionKind::Payable.as_str(), "payable")?;
    let amount = check::require_f64(first, "amount", "payable")?;
    if amount.abs() <= 0.0 {
        return Err(E2eError::Assertion("payable amount is zero".to_string()));
    }
    let transaction_id = check::require_id(first, "payable")?;
    ctx.cleanup
        .defer(format!("/financial/transactions/{transaction_id}"));

    // The detail view ties allocations and payables back to the freelancer.
    let detail = ctx
        .api
        .freelancer_detail(&freelancer_id, "allocations,payables")
        .await?;
    check::ok(&detail, "freelancer detail")?;
    let allocations = check::require_array(&detail.body, "allocations", "freelancer detail")?;
    expect_entry_with_id(allocations, &allocation_id, "freelancer allocations")?;
    let payables = check::require_array(&detail.body, "payables", "freelancer detail")?;
    expect_entry_with_id(payables, &transaction_id, "freelancer payables")?;

    Ok(())
}

fn expect_entry_with_id(entries: &[Value], id: &str, context: &str) -> E2eResult<()> {
    for entry in entries {
        if check::require_id(entry, context)? == id {
            return Ok(());
        }
    }
    Err(E2eError::Assertion(format!(
        "{context}: no entry with id {id:?}"
    )))
}
