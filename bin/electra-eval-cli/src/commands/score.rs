// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `electra-eval score` command: per-token scores for one sentence.

use super::load_config;
use crate::SourceArgs;
use discriminator::ModelId;
use evaluation::{scorer, MeasurementRunner};
use std::path::PathBuf;

pub fn execute(
    config_path: Option<PathBuf>,
    model: String,
    sentence: String,
    source: SourceArgs,
) -> anyhow::Result<()> {
    let config = load_config(config_path, &source)?;
    let provider = evaluation::provider_from_config(&config)?;
    let id = ModelId::new(model);

    println!("  Model:    {id}");
    println!("  Sentence: \"{sentence}\"");
    println!();

    let loaded = provider.load(&id)?;
    let sentences = [sentence];
    let measurements = MeasurementRunner::default().run(&loaded, &sentences)?;
    let Some(m) = measurements.into_iter().next() else {
        anyhow::bail!("runner returned no measurement");
    };

    let flagged = scorer::flagged_positions(&m.output);
    println!("  {:>4}  {:<16} {:>9}", "#", "Token", "Logit");
    for (i, (token, score)) in m.output.token_scores().enumerate() {
        let marker = if flagged.contains(&i) { "  <- replaced" } else { "" };
        println!("  {i:>4}  {token:<16} {score:>9.4}{marker}");
    }
    println!();

    let verified = scorer::fact_check(&m.output);
    println!(
        "  Prediction: {} ({} of {} tokens flagged)",
        if verified { "verified" } else { "not verified" },
        flagged.len(),
        m.output.len(),
    );
    println!(
        "  Time:       {:.2} ms   Memory: {:.1} MB",
        m.execution_seconds * 1000.0,
        m.memory_bytes as f64 / (1024.0 * 1024.0),
    );

    Ok(())
}
