// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Timed, memory-sampled execution of one model over a sentence list.
//!
//! Per sentence:
//! ```text
//! t0 = Instant::now()
//! encode + discriminate        (blocking, dominant cost)
//! t1 = Instant::now()
//! rss = sample process resident set
//! ```
//! The resident set covers the whole process, not just this call.

use crate::EvalError;
use discriminator::{InferenceOutput, LoadedModel};
use resource_monitor::MonitorError;
use std::time::Instant;

/// Samples the process resident set in bytes.
pub type MemorySampler = fn() -> Result<u64, MonitorError>;

/// Raw output plus the timing and memory readings taken around it.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub output: InferenceOutput,
    pub execution_seconds: f64,
    pub memory_bytes: u64,
}

/// Runs sentences through a loaded model one at a time.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementRunner {
    sample_memory: MemorySampler,
}

impl Default for MeasurementRunner {
    fn default() -> Self {
        Self {
            sample_memory: resource_monitor::resident_bytes,
        }
    }
}

impl MeasurementRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the resident-set sampler (used by tests and non-Linux hosts).
    pub fn with_memory_sampler(sample_memory: MemorySampler) -> Self {
        Self { sample_memory }
    }

    /// Measures every sentence in order. An empty list yields an empty
    /// result; the first failure aborts the batch.
    pub fn run(
        &self,
        model: &LoadedModel,
        sentences: &[String],
    ) -> Result<Vec<Measurement>, EvalError> {
        self.run_with(model, sentences, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_sentence(index)` after each
    /// sentence is measured.
    pub fn run_with(
        &self,
        model: &LoadedModel,
        sentences: &[String],
        mut on_sentence: impl FnMut(usize),
    ) -> Result<Vec<Measurement>, EvalError> {
        let mut measurements = Vec::with_capacity(sentences.len());

        for (index, sentence) in sentences.iter().enumerate() {
            let start = Instant::now();
            let output = model.infer(sentence).map_err(|e| EvalError::Inference {
                model: model.id.to_string(),
                sentence_index: index,
                source: e,
            })?;
            let execution_seconds = start.elapsed().as_secs_f64();

            let memory_bytes = (self.sample_memory)().map_err(|e| EvalError::Memory {
                model: model.id.to_string(),
                sentence_index: index,
                source: e,
            })?;

            tracing::debug!(
                model = %model.id,
                sentence = index,
                tokens = output.len(),
                "measured in {:.2}ms, rss {} bytes",
                execution_seconds * 1000.0,
                memory_bytes,
            );

            measurements.push(Measurement {
                output,
                execution_seconds,
                memory_bytes,
            });
            on_sentence(index);
        }

        Ok(measurements)
    }
}
