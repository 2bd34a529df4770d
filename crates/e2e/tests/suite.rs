//! Harness self-tests
//!
//! Exercises the runner, result accounting, and report round-trip with
//! synthetic scenarios. No network is required: the target server address
//! points at a closed port and only teardown ever dials it.

use std::sync::atomic::{AtomicUsize, Ordering};

use studioflow_e2e::config::HarnessConfig;
use studioflow_e2e::runner::{Runner, Scenario, SuiteResult};
use studioflow_e2e::E2eError;

static PASSING_RUNS: AtomicUsize = AtomicUsize::new(0);

fn test_config() -> HarnessConfig {
    HarnessConfig {
        // Reserved port: any teardown DELETE fails fast instead of leaking
        // requests to a real service.
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
        ..Default::default()
    }
}

fn passing() -> Scenario {
    Scenario {
        name: "passing",
        description: "synthetic scenario that succeeds",
        tags: &["synthetic"],
        run: |_ctx| {
            Box::pin(async {
                PASSING_RUNS.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        },
    }
}

fn failing() -> Scenario {
    Scenario {
        name: "failing",
        description: "synthetic scenario that fails an assertion",
        tags: &["synthetic"],
        run: |_ctx| Box::pin(async { Err(E2eError::Assertion("expected failure".to_string())) }),
    }
}

fn failing_with_leftovers() -> Scenario {
    Scenario {
        name: "failing-with-leftovers",
        description: "fails mid-flight with resources still registered",
        tags: &["synthetic"],
        run: |ctx| {
            Box::pin(async move {
                ctx.cleanup.defer("/clients/ghost");
                Err(E2eError::Assertion("boom after create".to_string()))
            })
        },
    }
}

#[tokio::test]
async fn suite_accounts_for_passes_and_failures() {
    let runner = Runner::new(test_config());
    let suite = runner
        .run_scenarios(vec![passing(), failing()])
        .await
        .expect("runner must not error on scenario failures");

    assert_eq!(suite.total, 2);
    assert_eq!(suite.passed, 1);
    assert_eq!(suite.failed, 1);
    assert!(!suite.all_passed());
    assert!(PASSING_RUNS.load(Ordering::SeqCst) >= 1);

    let failed = suite
        .results
        .iter()
        .find(|result| result.name == "failing")
        .expect("failing scenario must be reported");
    assert!(
        failed.error.as_deref().unwrap_or("").contains("expected failure"),
        "failure message must be carried into the result"
    );
}

#[tokio::test]
async fn teardown_runs_even_when_the_scenario_fails() {
    let runner = Runner::new(test_config());
    let suite = runner
        .run_scenarios(vec![failing_with_leftovers()])
        .await
        .expect("runner must survive teardown failures");

    let result = &suite.results[0];
    assert!(!result.passed);
    // The deferred DELETE was attempted against a closed port: teardown ran
    // and its failure was recorded without masking the scenario outcome.
    assert_eq!(result.cleanup_failures, 1);
    assert!(result.error.as_deref().unwrap_or("").contains("boom"));
}

#[tokio::test]
async fn report_round_trips_through_json() {
    let runner = Runner::new(test_config());
    let suite = runner
        .run_scenarios(vec![passing()])
        .await
        .expect("runner must succeed");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = runner
        .write_report(dir.path(), &suite)
        .expect("report must be written");
    assert!(path.ends_with("suite-results.json"));

    let text = std::fs::read_to_string(&path).expect("report must be readable");
    let parsed: SuiteResult = serde_json::from_str(&text).expect("report must parse back");
    assert_eq!(parsed.total, suite.total);
    assert_eq!(parsed.passed, suite.passed);
    assert_eq!(parsed.results.len(), 1);
}
