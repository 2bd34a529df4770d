//! Full project lifecycle: cross-resource creation, kanban, dates,
//! booking conflicts, and team growth

use chrono::Utc;
use serde_json::Value;
use studioflow_common::types::{KanbanStage, TeamMember};
use studioflow_common::DateRange;

use crate::check;
use crate::error::{E2eError, E2eResult};
use crate::fixtures;
use crate::runner::{Scenario, ScenarioCtx};

pub fn scenario() -> Scenario {
    Scenario {
        name: "projects",
        description: "project referencing client, freelancer and equipment through its lifecycle",
        tags: &["projects", "kanban", "bookings"],
        run: |ctx| Box::pin(run(ctx)),
    }
}

async fn run(ctx: &mut ScenarioCtx) -> E2eResult<()> {
    // A project depends on a client, a freelancer, and a piece of equipment.
    let client = ctx.api.create_client(&fixtures::client()).await?;
    check::created(&client, "create client")?;
    let client_id = check::require_id(&client.body, "create client")?;
    ctx.cleanup.defer(format!("/clients/{client_id}"));

    let equipment = ctx.api.create_equipment(&fixtures::equipment()).await?;
    check::created(&equipment, "create equipment")?;
    let equipment_id = check::require_id(&equipment.body, "create equipment")?;
    ctx.cleanup.defer(format!("/equipments/{equipment_id}"));

    let freelancer = ctx.api.create_freelancer(&fixtures::freelancer()).await?;
    check::created(&freelancer, "create freelancer")?;
    let freelancer_id = check::require_id(&freelancer.body, "create freelancer")?;
    ctx.cleanup.defer(format!("/freelancers/{freelancer_id}"));

    let window = DateRange::from_day_offsets(Utc::now(), 30, 32)
        .map_err(|e| E2eError::Assertion(e.to_string()))?;
    let payload = fixtures::project(&client_id, &freelancer_id, &equipment_id, window);

    let created = ctx.api.create_project(&payload).await?;
    check::created(&created, "create project")?;
    let project_id = check::require_id(&created.body, "create project")?;
    ctx.cleanup.defer(format!("/projects/{project_id}"));

    check::expect_str_eq(&created.body, "name", &payload.name, "create project")?;
    check::expect_id_eq(&created.body, "client_id", &client_id, "create project")?;
    check::expect_str_eq(
        &created.body,
        "kanban_stage",
        KanbanStage::Lead.as_str(),
        "create project",
    )?;

    let echoed = check::require_array(&created.body, "shooting_dates", "create project")?;
    for submitted in &payload.shooting_dates {
        if !contains_instant(echoed, *submitted)? {
            return Err(E2eError::Assertion(format!(
                "submitted shooting date {submitted} missing from response"
            )));
        }
    }

    let team = check::require_array(&created.body, "team_allocation", "create project")?;
    expect_member(team, "freelancer_id", &freelancer_id, "project team")?;
    let bookings = check::require_array(&created.body, "equipment_bookings", "create project")?;
    expect_member(bookings, "equipment_id", &equipment_id, "project bookings")?;

    // Advance the kanban stage and confirm the move persisted.
    let advanced = ctx.api.update_kanban(&project_id, KanbanStage::Shooting).await?;
    check::ok(&advanced, "advance kanban")?;
    check::expect_str_eq(
        &advanced.body,
        "kanban_stage",
        KanbanStage::Shooting.as_str(),
        "advance kanban",
    )?;
    let reread = ctx.api.get_project(&project_id).await?;
    check::ok(&reread, "reread project")?;
    check::expect_str_eq(
        &reread.body,
        "kanban_stage",
        KanbanStage::Shooting.as_str(),
        "reread project",
    )?;

    // Append a shooting date and confirm the server kept it.
    let appended = fixtures::days_from_now(38);
    let mut dates = payload.shooting_dates.clone();
    dates.push(appended);
    let updated = ctx.api.update_shooting_dates(&project_id, &dates).await?;
    check::ok(&updated, "append shooting date")?;
    let echoed = check::require_array(&updated.body, "shooting_dates", "append shooting date")?;
    if !contains_instant(echoed, appended)? {
        return Err(E2eError::Assertion(format!(
            "appended shooting date {appended} missing from response"
        )));
    }

    // Booking the same equipment over the project's window must conflict.
    let overlapping = window.shifted_days(1);
    let conflict = ctx
        .api
        .create_booking(&fixtures::booking(&equipment_id, overlapping))
        .await?;
    check::expect_conflict(&conflict, "overlapping project booking")?;

    // Grow the team with a second freelancer.
    let second = ctx.api.create_freelancer(&fixtures::freelancer()).await?;
    check::created(&second, "create second freelancer")?;
    let second_id = check::require_id(&second.body, "create second freelancer")?;
    ctx.cleanup.defer(format!("/freelancers/{second_id}"));

    let member = TeamMember {
        freelancer_id: second_id.clone(),
        role: "Sound Engineer".to_string(),
    };
    let allocated = ctx.api.add_team_member(&project_id, &member).await?;
    check::expect_status_in(
        &allocated,
        &[reqwest::StatusCode::OK, reqwest::StatusCode::CREATED],
        "add team member",
    )?;
    check::expect_id_eq(&allocated.body, "freelancer_id", &second_id, "add team member")?;

    // The kanban board lists stages, including the one we moved to.
    let board = ctx.api.kanban_board(&project_id).await?;
    check::ok(&board, "kanban board")?;
    let stages = check::require_array(&board.body, "stages", "kanban board")?;
    let mut found = false;
    for stage in stages {
        let name = check::require_str(stage, "name", "kanban board stage")?;
        name.parse::<KanbanStage>()
            .map_err(|_| E2eError::Assertion(format!("unknown kanban stage {name:?} on board")))?;
        if name == KanbanStage::Shooting.as_str() {
            found = true;
        }
    }
    if !found {
        return Err(E2eError::Assertion(
            "kanban board does not list the project's current stage".to_string(),
        ));
    }

    Ok(())
}

/// Whether a JSON array of date strings contains `instant`, comparing by
/// timestamp rather than by formatting.
fn contains_instant(dates: &[Value], instant: chrono::DateTime<Utc>) -> E2eResult<bool> {
    for date in dates {
        let text = date
            .as_str()
            .ok_or_else(|| E2eError::Assertion(format!("{date} is not a date string")))?;
        if check::parse_instant(text, "shooting dates")? == instant {
            return Ok(true);
        }
    }
    Ok(false)
}

fn expect_member(entries: &[Value], field: &str, expected: &str, context: &str) -> E2eResult<()> {
    if entries
        .iter()
        .any(|entry| check::id_field_matches(entry, field, expected))
    {
        Ok(())
    } else {
        Err(E2eError::Assertion(format!(
            "{context}: no entry with {field} == {expected:?}"
        )))
    }
}
