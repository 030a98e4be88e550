// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use std::env;

use concurrency_drills::config::{load_and_validate_config, DrillConfig};
use concurrency_drills::observability::init_tracing;
use concurrency_drills::runner::DrillRunner;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");

    let args: Vec<String> = env::args().collect();

    if args.len() > 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: {} [drills.yaml | drills.toml]", args[0]);
        eprintln!("Runs the worker pool, fan-out/fan-in, timeout and counter drills");
        eprintln!("and prints a JSON report. Without a config file, built-in defaults are used.");
        std::process::exit(1);
    }

    let config = match args.get(1) {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("failed to load drill config '{}'", path))?,
        None => DrillConfig::default(),
    };

    let report = DrillRunner::from_config(&config)
        .run_all()
        .await
        .context("drill run failed")?;

    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    println!("{}", json);

    Ok(())
}
