//! Global search across every module

use crate::check;
use crate::error::{E2eError, E2eResult};
use crate::runner::{Scenario, ScenarioCtx};

/// One query per module the search surface is expected to cover.
const QUERIES: &[&str] = &[
    "client",
    "project",
    "freelancer",
    "equipment",
    "proposal",
    "financial",
    "dashboard",
];

pub fn scenario() -> Scenario {
    Scenario {
        name: "search",
        description: "search results are well-formed and categorized for every module query",
        tags: &["search", "readonly", "smoke"],
        run: |ctx| Box::pin(run(ctx)),
    }
}

async fn run(ctx: &mut ScenarioCtx) -> E2eResult<()> {
    for query in QUERIES {
        let context = format!("search {query:?}");
        let response = ctx.api.search(query).await?;
        check::ok(&response, &context)?;

        // Empty result sets are valid; malformed items are not.
        let results = check::require_array(&response.body, "results", &context)?;
        for item in results {
            check::require_id(item, &context)?;
            check::expect_module(item, &context)?;
            let title = check::require_str(item, "title", &context)?;
            if title.trim().is_empty() {
                return Err(E2eError::Assertion(format!(
                    "{context}: result title is empty"
                )));
            }
        }
    }

    Ok(())
}
