// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;

use anyhow::{bail, Context, Result};
use rdf_intake::config::{discover, load_and_validate_config, RuntimeBuilder};
use rdf_intake::engine::build_construct_query;
use rdf_intake::graph::parse_iri;
use rdf_intake::stage::ProcessorStage;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,rdf_intake=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn usage(program: &str) -> String {
    let stages: Vec<&str> = ProcessorStage::ALL.iter().map(|s| s.as_str()).collect();
    format!(
        "Usage: {} <config.yaml> <stage> [subject-iri]\nStages: {}\nExample: {} configs/intake.yaml rdf_parsing urn:temp:dataset",
        program,
        stages.join(", "),
        program
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("rdf-intake");
    if args.len() < 3 || args.len() > 4 {
        bail!(usage(program));
    }

    let stage: ProcessorStage = args[2].parse()?;
    let subject = args
        .get(3)
        .map(parse_iri)
        .transpose()
        .context("subject must be an absolute IRI")?;

    let config = load_and_validate_config(&args[1]).with_context(|| format!("loading {}", args[1]))?;
    let runtime = RuntimeBuilder::from_config(&config)?;

    let factories = discover(runtime.purl_registry(), runtime.file_reference_registry(), Some(stage));

    println!("🚀 rdf-intake");
    println!("═══════════════════════════════════");
    println!("Config: {}", args[1]);
    println!("Stage: {}", stage);
    if let Some(subject) = &subject {
        println!("Subject: {}", subject);
    }
    println!("Factories: {}", factories.len());

    for factory in &factories {
        println!("\n{}", "─".repeat(80));
        println!("{} [{}] stages {}", factory.key(), factory.kind(), factory.stages());
        println!("{}", build_construct_query(factory, subject.as_ref()));
    }

    if factories.is_empty() {
        println!("\nNo factory is registered for stage {}", stage);
    }
    Ok(())
}
