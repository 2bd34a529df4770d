//! Client CRUD with read-after-write checks

use crate::check;
use crate::error::E2eResult;
use crate::fixtures;
use crate::runner::{Scenario, ScenarioCtx};

pub fn scenario() -> Scenario {
    Scenario {
        name: "clients",
        description: "create, read back, update, delete, and confirm the 404",
        tags: &["clients", "crud", "smoke"],
        run: |ctx| Box::pin(run(ctx)),
    }
}

async fn run(ctx: &mut ScenarioCtx) -> E2eResult<()> {
    let payload = fixtures::client();

    let created = ctx.api.create_client(&payload).await?;
    check::created(&created, "create client")?;
    let id = check::require_id(&created.body, "create client")?;
    ctx.cleanup.defer(format!("/clients/{id}"));

    // Every submitted field must be echoed back on read.
    let fetched = ctx.api.get_client(&id).await?;
    check::ok(&fetched, "get client")?;
    check::expect_str_eq(&fetched.body, "name", &payload.name, "get client")?;
    check::expect_str_eq(&fetched.body, "notes", &payload.notes, "get client")?;
    let company = check::require_field(&fetched.body, "company", "get client")?;
    check::expect_str_eq(company, "name", &payload.company.name, "get client company")?;
    let contact = check::require_field(&fetched.body, "contact_info", "get client")?;
    check::expect_str_eq(contact, "email", &payload.contact_info.email, "get client contact")?;

    let mut update = fixtures::client();
    update.name = format!("{} Updated", payload.name);
    update.company.name = "Suite Company LLC".to_string();
    update.notes = "Updated by the acceptance suite".to_string();

    let updated = ctx.api.update_client(&id, &update).await?;
    check::ok(&updated, "update client")?;
    check::expect_str_eq(&updated.body, "name", &update.name, "update client")?;
    check::expect_str_eq(&updated.body, "notes", &update.notes, "update client")?;

    // Read-after-write: the stored record reflects the update.
    let reread = ctx.api.get_client(&id).await?;
    check::ok(&reread, "reread client")?;
    check::expect_str_eq(&reread.body, "name", &update.name, "reread client")?;
    let company = check::require_field(&reread.body, "company", "reread client")?;
    check::expect_str_eq(company, "name", &update.company.name, "reread client company")?;

    let deleted = ctx.api.delete_client(&id).await?;
    check::no_content(&deleted, "delete client")?;

    let gone = ctx.api.get_client(&id).await?;
    check::not_found(&gone, "get client after delete")?;

    Ok(())
}
