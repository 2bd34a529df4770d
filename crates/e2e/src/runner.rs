//! Scenario runner
//!
//! Scenarios run strictly sequentially. A failed step aborts the rest of
//! its scenario, but teardown always executes before the next scenario
//! starts. There are no retries: a single failed call fails the scenario.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::cleanup::CleanupStack;
use crate::config::HarnessConfig;
use crate::error::{E2eError, E2eResult};
use crate::http::ApiClient;
use crate::scenarios;

/// Per-scenario state: the API client and the teardown stack.
pub struct ScenarioCtx {
    pub api: ApiClient,
    pub cleanup: CleanupStack,
}

impl ScenarioCtx {
    pub fn new(config: &HarnessConfig) -> E2eResult<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
            cleanup: CleanupStack::new(),
        })
    }

    /// Drain the cleanup stack. Returns the number of failed deletions.
    pub async fn teardown(&mut self) -> usize {
        self.cleanup.run(&self.api).await
    }
}

pub type ScenarioFuture<'a> = Pin<Box<dyn Future<Output = E2eResult<()>> + Send + 'a>>;
pub type ScenarioFn = for<'a> fn(&'a mut ScenarioCtx) -> ScenarioFuture<'a>;

/// A named acceptance flow.
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub run: ScenarioFn,
}

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub cleanup_failures: usize,
}

/// Result of running the whole suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SuiteResult {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Sequential suite runner
pub struct Runner {
    config: HarnessConfig,
}

impl Runner {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Run every registered scenario.
    pub async fn run_all(&self) -> E2eResult<SuiteResult> {
        self.run_scenarios(scenarios::all()).await
    }

    /// Run the scenarios carrying a tag.
    pub async fn run_tagged(&self, tag: &str) -> E2eResult<SuiteResult> {
        let selected: Vec<Scenario> = scenarios::all()
            .into_iter()
            .filter(|scenario| scenario.tags.contains(&tag))
            .collect();
        if selected.is_empty() {
            return Err(E2eError::Config(format!("no scenario tagged {tag:?}")));
        }
        self.run_scenarios(selected).await
    }

    /// Run a single scenario by name.
    pub async fn run_named(&self, name: &str) -> E2eResult<SuiteResult> {
        let selected: Vec<Scenario> = scenarios::all()
            .into_iter()
            .filter(|scenario| scenario.name == name)
            .collect();
        if selected.is_empty() {
            return Err(E2eError::Config(format!("no scenario named {name:?}")));
        }
        self.run_scenarios(selected).await
    }

    /// Run a list of scenarios sequentially, tearing each one down
    /// whether it passed or not.
    pub async fn run_scenarios(&self, list: Vec<Scenario>) -> E2eResult<SuiteResult> {
        let start = Instant::now();
        let mut results = Vec::with_capacity(list.len());
        let mut passed = 0;
        let mut failed = 0;

        info!("running {} scenario(s) against {}", list.len(), self.config.base_url);

        for scenario in &list {
            let result = self.run_scenario(scenario).await?;
            if result.passed {
                passed += 1;
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                failed += 1;
                error!(
                    "✗ {} - {}",
                    result.name,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Suite results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        Ok(SuiteResult {
            total: list.len(),
            passed,
            failed,
            skipped: 0,
            duration_ms,
            results,
        })
    }

    async fn run_scenario(&self, scenario: &Scenario) -> E2eResult<ScenarioResult> {
        info!("scenario {}: {}", scenario.name, scenario.description);

        let mut ctx = ScenarioCtx::new(&self.config)?;
        let start = Instant::now();
        let outcome = (scenario.run)(&mut ctx).await;

        // Teardown runs regardless of the outcome above.
        let cleanup_failures = ctx.teardown().await;

        Ok(ScenarioResult {
            name: scenario.name.to_string(),
            passed: outcome.is_ok(),
            duration_ms: start.elapsed().as_millis() as u64,
            error: outcome.err().map(|e| e.to_string()),
            cleanup_failures,
        })
    }

    /// Write the suite result as pretty JSON. Returns the report path.
    pub fn write_report(&self, out_dir: &Path, suite: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(out_dir)?;

        let path = out_dir.join("suite-results.json");
        let json = serde_json::to_string_pretty(suite)?;
        std::fs::write(&path, json)?;

        info!("report written to {}", path.display());
        Ok(path)
    }
}
