//! Acceptance suite entry point
//!
//! This file is the test binary that runs the acceptance scenarios against
//! an external StudioFlow server.
//! Run with: cargo test --package studioflow-e2e --test e2e
//!
//! The server is never spawned here: the suite only runs when a target is
//! named via `--base-url`, the config file, or `STUDIOFLOW_E2E_BASE_URL`,
//! and skips cleanly otherwise.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use studioflow_e2e::config::{HarnessConfig, BASE_URL_ENV};
use studioflow_e2e::runner::Runner;
use studioflow_e2e::scenarios;
use studioflow_e2e::E2eResult;

#[derive(Parser, Debug)]
#[command(name = "studioflow-e2e")]
#[command(about = "Acceptance suite for the StudioFlow API")]
struct Args {
    /// Path to the harness config file
    #[arg(short, long, default_value = "harness.toml")]
    config: PathBuf,

    /// Target server, e.g. http://127.0.0.1:3000
    #[arg(short, long)]
    base_url: Option<String>,

    /// API path prefix on the target server
    #[arg(long)]
    prefix: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Run only scenarios carrying this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Run only the scenario with this name
    #[arg(short, long)]
    name: Option<String>,

    /// Output directory for the JSON report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the registered scenarios and exit
    #[arg(long)]
    list: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();

    if args.list {
        for scenario in scenarios::all() {
            println!("{:<12} [{}] {}", scenario.name, scenario.tags.join(", "), scenario.description);
        }
        std::process::exit(0);
    }

    // The target server is external. Without an explicit target this run is
    // a no-op, so `cargo test` stays green on machines without one.
    let opted_in = args.base_url.is_some()
        || std::env::var(BASE_URL_ENV).is_ok()
        || args.config.exists();
    if !opted_in {
        eprintln!(
            "studioflow-e2e: no target server configured; set {BASE_URL_ENV} or pass --base-url to run the suite"
        );
        std::process::exit(0);
    }

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(success) => {
            if success {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> E2eResult<bool> {
    let mut config = HarnessConfig::load(&args.config)?;
    config.apply_env()?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(prefix) = args.prefix {
        config.api_prefix = prefix;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }

    let output_dir = config.output_dir.clone();
    let runner = Runner::new(config);

    let suite = if let Some(name) = args.name {
        runner.run_named(&name).await?
    } else if let Some(tag) = args.tag {
        runner.run_tagged(&tag).await?
    } else {
        runner.run_all().await?
    };

    runner.write_report(&output_dir, &suite)?;

    Ok(suite.all_passed())
}
