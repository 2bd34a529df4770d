//! Equipment inventory, booking conflicts, maintenance, and ROI

use chrono::{NaiveDate, Utc};
use studioflow_common::DateRange;

use crate::check;
use crate::error::{E2eError, E2eResult};
use crate::fixtures;
use crate::runner::{Scenario, ScenarioCtx};

pub fn scenario() -> Scenario {
    Scenario {
        name: "equipment",
        description: "inventory CRUD, double-booking rejection, maintenance and ROI views",
        tags: &["equipment", "bookings"],
        run: |ctx| Box::pin(run(ctx)),
    }
}

async fn run(ctx: &mut ScenarioCtx) -> E2eResult<()> {
    let payload = fixtures::equipment();

    let created = ctx.api.create_equipment(&payload).await?;
    check::created(&created, "create equipment")?;
    let id = check::require_id(&created.body, "create equipment")?;
    ctx.cleanup.defer(format!("/equipments/{id}"));
    check::expect_str_eq(
        &created.body,
        "serial_number",
        &payload.serial_number,
        "create equipment",
    )?;

    // First booking over a future window.
    let window = DateRange::from_day_offsets(Utc::now(), 1, 3)
        .map_err(|e| E2eError::Assertion(e.to_string()))?;
    let booked = ctx.api.create_booking(&fixtures::booking(&id, window)).await?;
    check::created(&booked, "create booking")?;
    let booking_id = check::require_id(&booked.body, "create booking")?;
    ctx.cleanup.defer(format!("/equipment-bookings/{booking_id}"));

    // A window shifted one day still overlaps and must be rejected.
    let overlapping = window.shifted_days(1);
    debug_assert!(overlapping.overlaps(&window));
    let conflict = ctx
        .api
        .create_booking(&fixtures::booking(&id, overlapping))
        .await?;
    check::expect_conflict(&conflict, "overlapping booking")?;

    // A disjoint window is accepted.
    let disjoint = window.shifted_days(4);
    debug_assert!(!disjoint.overlaps(&window));
    let second = ctx.api.create_booking(&fixtures::booking(&id, disjoint)).await?;
    check::created(&second, "disjoint booking")?;
    let second_id = check::require_id(&second.body, "disjoint booking")?;
    ctx.cleanup.defer(format!("/equipment-bookings/{second_id}"));

    // Maintenance tracking: the due date is echoed and still ahead of us.
    let fetched = ctx.api.get_equipment(&id).await?;
    check::ok(&fetched, "get equipment")?;
    let due = check::require_str(&fetched.body, "maintenance_due_date", "get equipment")?;
    let due: NaiveDate = due
        .parse()
        .map_err(|_| E2eError::Assertion(format!("maintenance_due_date {due:?} is not a date")))?;
    if due <= Utc::now().date_naive() {
        return Err(E2eError::Assertion(format!(
            "maintenance_due_date {due} is not in the future"
        )));
    }

    // ROI view: metric plus a booking calendar reflecting the first window.
    let roi = ctx.api.equipment_roi(&id).await?;
    check::ok(&roi, "equipment roi")?;
    check::require_f64(&roi.body, "roi", "equipment roi")?;
    let calendar = check::require_array(&roi.body, "calendar_availability", "equipment roi")?;

    let mut covered = false;
    for period in calendar {
        // Entries without a `booked` flag count as free.
        let booked = period
            .get("booked")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        if !booked {
            continue;
        }
        let range = parse_period(period)?;
        if range.overlaps(&window) {
            covered = true;
        }
    }
    if !covered {
        return Err(E2eError::Assertion(
            "booked window missing from calendar_availability".to_string(),
        ));
    }

    Ok(())
}

fn parse_period(period: &serde_json::Value) -> E2eResult<DateRange> {
    let start = check::parse_instant(
        check::require_str(period, "start_date", "roi calendar")?,
        "roi calendar",
    )?;
    let end = check::parse_instant(
        check::require_str(period, "end_date", "roi calendar")?,
        "roi calendar",
    )?;
    DateRange::new(start, end).map_err(|e| E2eError::Assertion(e.to_string()))
}
