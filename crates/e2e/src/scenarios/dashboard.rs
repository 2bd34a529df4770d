//! Dashboard aggregate: KPI, schedule, and financial sections

use serde_json::Value;

use crate::check;
use crate::error::{E2eError, E2eResult};
use crate::runner::{Scenario, ScenarioCtx};

const REQUIRED_KPIS: &[&str] = &[
    "totalProjects",
    "activeProjects",
    "completedProjects",
    "overdueProjects",
];

const REQUIRED_FINANCIAL_METRICS: &[&str] = &[
    "totalRevenue",
    "totalExpenses",
    "netProfit",
    "outstandingReceivables",
    "outstandingPayables",
];

pub fn scenario() -> Scenario {
    Scenario {
        name: "dashboard",
        description: "dashboard sections are present and well-typed even when empty",
        tags: &["dashboard", "readonly", "smoke"],
        run: |ctx| Box::pin(run(ctx)),
    }
}

async fn run(ctx: &mut ScenarioCtx) -> E2eResult<()> {
    let response = ctx.api.dashboard().await?;
    check::ok(&response, "dashboard")?;
    let body = &response.body;

    let kpis = check::require_object(body, "kpis", "dashboard")?;
    for key in REQUIRED_KPIS {
        let value = kpis.get(*key).ok_or_else(|| E2eError::MissingField {
            context: "dashboard kpis".to_string(),
            field: key.to_string(),
        })?;
        if !value.is_number() {
            return Err(E2eError::Assertion(format!(
                "dashboard kpi {key} is not a number: {value}"
            )));
        }
    }

    // Collections may be empty, but every present entry must be complete.
    let recent = check::require_array(body, "recentProjects", "dashboard")?;
    for project in recent {
        check::require_id(project, "recent project")?;
        check::require_str(project, "name", "recent project")?;
        check::require_str(project, "status", "recent project")?;
        check::require_array(project, "shootingDates", "recent project")?;
    }

    let schedules = check::require_array(body, "shootingSchedules", "dashboard")?;
    for schedule in schedules {
        require_present(schedule, "projectId", "shooting schedule")?;
        check::require_str(schedule, "date", "shooting schedule")?;
        check::require_str(schedule, "location", "shooting schedule")?;
    }

    let metrics = check::require_object(body, "financialMetrics", "dashboard")?;
    for key in REQUIRED_FINANCIAL_METRICS {
        let value = metrics.get(*key).ok_or_else(|| E2eError::MissingField {
            context: "dashboard financialMetrics".to_string(),
            field: key.to_string(),
        })?;
        if !value.is_number() {
            return Err(E2eError::Assertion(format!(
                "dashboard metric {key} is not a number: {value}"
            )));
        }
    }

    Ok(())
}

fn require_present(value: &Value, field: &str, context: &str) -> E2eResult<()> {
    check::require_field(value, field, context).map(|_| ())
}
