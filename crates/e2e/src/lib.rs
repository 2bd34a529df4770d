//! StudioFlow Acceptance Harness
//!
//! This crate is a black-box acceptance test suite for the StudioFlow
//! production management REST API. It contains no server code: every
//! scenario drives an external, already-running server over HTTP and
//! asserts on status codes and response shapes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Acceptance Suite (Rust)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Runner                                                     │
//! │    ├── ScenarioCtx { api: ApiClient, cleanup: CleanupStack }│
//! │    ├── run_all() / run_tagged() / run_named()               │
//! │    └── write_report() -> suite-results.json                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario (one per API surface)                             │
//! │    auth │ clients │ projects │ proposals │ freelancers      │
//! │    equipment │ financial │ dashboard │ search               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  api: one typed method per endpoint (reqwest, 30 s timeout) │
//! │  fixtures: unique payloads (uuid suffixes, chrono windows)  │
//! │  check: status / shape / tolerance / keyword assertions     │
//! │  cleanup: best-effort reverse-order teardown, always runs   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod check;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod runner;
pub mod scenarios;

pub use config::HarnessConfig;
pub use error::{E2eError, E2eResult};
pub use http::{ApiClient, ApiResponse};
pub use runner::{Runner, Scenario, ScenarioCtx, SuiteResult};
