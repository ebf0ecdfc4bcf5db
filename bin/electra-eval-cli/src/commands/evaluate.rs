// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `electra-eval evaluate` command: time every model over every sentence.
//!
//! Progress goes to stderr so `--format json` leaves stdout parseable.

use super::{bar, load_config, truncate};
use crate::{OutputFormat, SourceArgs};
use discriminator::ModelId;
use evaluation::report::{self, ChartSeries, LabelAgreement, ModelSummary};
use evaluation::{Aggregator, Checkpoint, Progress, ResultTable};
use std::io::Write;
use std::path::PathBuf;

const BAR_WIDTH: usize = 32;

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    records: &'a ResultTable,
    summaries: &'a [ModelSummary],
    agreement: &'a [LabelAgreement],
}

pub fn execute(
    config_path: Option<PathBuf>,
    models: Vec<String>,
    sentences: Vec<String>,
    format: OutputFormat,
    source: SourceArgs,
) -> anyhow::Result<()> {
    let mut config = load_config(config_path, &source)?;
    if !models.is_empty() {
        config.models = models.into_iter().map(ModelId::from).collect();
    }
    if !sentences.is_empty() {
        config.sentences = sentences;
    }
    config.validate()?;

    let table_output = matches!(format, OutputFormat::Table);
    if table_output {
        println!("╔══════════════════════════════════════════════════════╗");
        println!("║        electra-eval · Discriminator Evaluation       ║");
        println!("╚══════════════════════════════════════════════════════╝");
        println!();
        println!("  Models:    {}", config.models.len());
        for m in &config.models {
            println!("   - {m}");
        }
        println!("  Sentences: {}", config.sentences.len());
        println!("  Provider:  {:?}", config.provider);
        println!();
    }

    let provider = evaluation::provider_from_config(&config)?;
    let aggregator = Aggregator::new(provider.as_ref());
    let table = aggregator.evaluate_with_progress(
        &config.models,
        &config.sentences,
        &mut |p: &Progress<'_>| print_progress(p),
    )?;
    eprintln!();

    let summaries = report::summarize(&table);
    let agreement = report::label_agreement(&table, &config.references);

    match format {
        OutputFormat::Json => {
            let out = JsonReport {
                records: &table,
                summaries: &summaries,
                agreement: &agreement,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            print_table(&table);
            for series in report::chart_series(&table) {
                print_chart(&series);
            }
            print_summaries(&summaries);
            if !agreement.is_empty() {
                print_agreement(&agreement);
            }
        }
    }

    Ok(())
}

fn print_progress(p: &Progress<'_>) {
    let what = match p.checkpoint {
        Checkpoint::LoadingModel => format!("loading {}", p.model),
        Checkpoint::ModelLoaded => format!("loaded {}", p.model),
        Checkpoint::SentenceDone { sentence_index } => {
            format!("{} sentence {}", p.model.short_name(), sentence_index + 1)
        }
        Checkpoint::ModelDone => format!("finished {}", p.model),
    };
    eprint!(
        "\r  [{}] {:>5.1}%  model {}/{}  {:<48}",
        bar(p.fraction, 1.0, 20),
        p.fraction * 100.0,
        p.model_index + 1,
        p.model_count,
        truncate(&what, 48),
    );
    let _ = std::io::stderr().flush();
}

fn print_table(table: &ResultTable) {
    println!("  ┌─ Results ──────────────────────────────────────────");
    println!(
        "  │ {:<28} {:<40} {:>10} {:>10} {:>9}",
        "Model", "Sentence", "Time (ms)", "Mem (MB)", "Verified"
    );
    for r in table {
        println!(
            "  │ {:<28} {:<40} {:>10.2} {:>10.1} {:>9}",
            truncate(r.model.short_name(), 28),
            truncate(&r.sentence, 40),
            r.execution_ms(),
            r.memory_mb(),
            if r.prediction { "yes" } else { "no" },
        );
    }
    println!("  └────────────────────────────────────────────────────");
    println!();
}

fn print_chart(series: &ChartSeries) {
    let max = series.max_value();
    println!("  {} ({})", series.title, series.unit);
    for point in &series.points {
        let label = if point.label.is_empty() {
            truncate(&point.group, 40)
        } else {
            truncate(&format!("{} · {}", point.group, point.label), 40)
        };
        println!(
            "   {:<40} {} {:.2}",
            label,
            bar(point.value, max, BAR_WIDTH),
            point.value,
        );
    }
    println!();
}

fn print_summaries(summaries: &[ModelSummary]) {
    println!("  Summary:");
    for s in summaries {
        println!("   {}", s.summary());
    }
    println!();
}

fn print_agreement(agreement: &[LabelAgreement]) {
    println!("  Agreement with reference labels (positive class: replaced):");
    for a in agreement {
        println!(
            "   {:<28} n={:<3} acc {:>5.1}%  prec {:>5.1}%  recall {:>5.1}%",
            truncate(a.model.short_name(), 28),
            a.confusion.total(),
            a.accuracy * 100.0,
            a.precision * 100.0,
            a.recall * 100.0,
        );
    }
    println!();
}
