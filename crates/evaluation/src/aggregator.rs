// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Model-major evaluation loop producing a [`ResultTable`].
//!
//! ```text
//! for model in models:                 load lazily via ModelProvider
//!     measurements = runner.run(...)   one per sentence, in order
//!     for m in measurements:
//!         push MeasurementRecord { .., prediction: fact_check(m.output) }
//!     drop(model)                      weights released before the next load
//! ```

use crate::config::validate_inputs;
use crate::{scorer, EvalError, MeasurementRecord, MeasurementRunner, ResultTable};
use discriminator::{ModelId, ModelProvider};

/// Where in the run a progress callback fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    /// About to ask the provider for the model.
    LoadingModel,
    /// The provider returned the model.
    ModelLoaded,
    /// One sentence has been measured.
    SentenceDone { sentence_index: usize },
    /// Every sentence for this model has been measured and scored.
    ModelDone,
}

/// A progress notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress<'a> {
    pub model: &'a ModelId,
    pub model_index: usize,
    pub model_count: usize,
    pub checkpoint: Checkpoint,
    /// Completed share of the run in `[0.0, 1.0]`. Loading a model counts
    /// as one unit of work, each sentence as another.
    pub fraction: f64,
}

/// Runs every model over every sentence.
pub struct Aggregator<'p> {
    provider: &'p dyn ModelProvider,
    runner: MeasurementRunner,
}

impl<'p> Aggregator<'p> {
    pub fn new(provider: &'p dyn ModelProvider) -> Self {
        Self {
            provider,
            runner: MeasurementRunner::default(),
        }
    }

    pub fn with_runner(mut self, runner: MeasurementRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Evaluates `models × sentences`, model-major.
    pub fn evaluate(
        &self,
        models: &[ModelId],
        sentences: &[String],
    ) -> Result<ResultTable, EvalError> {
        self.evaluate_with_progress(models, sentences, &mut |_: &Progress<'_>| {})
    }

    /// Like [`evaluate`](Self::evaluate), reporting progress at each
    /// [`Checkpoint`].
    ///
    /// An empty sentence list returns an empty table without loading any
    /// model. Any failure aborts the run and no partial table is returned.
    pub fn evaluate_with_progress(
        &self,
        models: &[ModelId],
        sentences: &[String],
        on_progress: &mut dyn FnMut(&Progress<'_>),
    ) -> Result<ResultTable, EvalError> {
        validate_inputs(models, sentences)?;

        if sentences.is_empty() {
            tracing::info!("no sentences to evaluate; skipping {} model(s)", models.len());
            return Ok(ResultTable::new());
        }

        let units_per_model = sentences.len() + 1;
        let total_units = (models.len() * units_per_model) as f64;
        let mut table = ResultTable::with_capacity(models.len() * sentences.len());

        for (model_index, id) in models.iter().enumerate() {
            let base = model_index * units_per_model;
            let mut notify = |checkpoint: Checkpoint, done: usize| {
                on_progress(&Progress {
                    model: id,
                    model_index,
                    model_count: models.len(),
                    checkpoint,
                    fraction: (base + done) as f64 / total_units,
                });
            };

            notify(Checkpoint::LoadingModel, 0);
            let model = self.provider.load(id).map_err(|e| EvalError::ModelLoad {
                model: id.to_string(),
                source: e,
            })?;
            notify(Checkpoint::ModelLoaded, 1);

            let measurements = self.runner.run_with(&model, sentences, |i| {
                notify(Checkpoint::SentenceDone { sentence_index: i }, i + 2)
            })?;
            drop(model);

            for (sentence, m) in sentences.iter().zip(measurements) {
                table.push(MeasurementRecord {
                    sentence: sentence.clone(),
                    model: id.clone(),
                    memory_bytes: m.memory_bytes,
                    execution_seconds: m.execution_seconds,
                    prediction: scorer::fact_check(&m.output),
                });
            }

            tracing::info!(
                "{id}: {} sentences evaluated ({}/{} models)",
                sentences.len(),
                model_index + 1,
                models.len(),
            );
            notify(Checkpoint::ModelDone, units_per_model);
        }

        Ok(table)
    }
}
