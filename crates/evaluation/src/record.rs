// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Measurement records and the result table they are collected into.

use discriminator::ModelId;

/// One (model, sentence) measurement. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MeasurementRecord {
    pub sentence: String,
    pub model: ModelId,
    /// Process resident set sampled right after the call.
    pub memory_bytes: u64,
    /// Monotonic wall-clock duration of tokenization plus forward pass.
    pub execution_seconds: f64,
    /// `true` if no token was flagged as replaced.
    pub prediction: bool,
}

impl MeasurementRecord {
    pub fn memory_mb(&self) -> f64 {
        self.memory_bytes as f64 / (1024.0 * 1024.0)
    }

    pub fn execution_ms(&self) -> f64 {
        self.execution_seconds * 1000.0
    }
}

/// Ordered records, model-major and sentence-minor.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    records: Vec<MeasurementRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            records: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, record: MeasurementRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeasurementRecord> {
        self.records.iter()
    }

    /// Rows for one model, in sentence order.
    pub fn for_model<'a>(
        &'a self,
        model: &'a ModelId,
    ) -> impl Iterator<Item = &'a MeasurementRecord> + 'a {
        self.records.iter().filter(move |r| &r.model == model)
    }

    /// Distinct models in the order they first appear.
    pub fn models(&self) -> Vec<&ModelId> {
        let mut models: Vec<&ModelId> = Vec::new();
        for r in &self.records {
            if !models.contains(&&r.model) {
                models.push(&r.model);
            }
        }
        models
    }

    pub fn into_records(self) -> Vec<MeasurementRecord> {
        self.records
    }

    /// Pretty-printed JSON array of the records.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a MeasurementRecord;
    type IntoIter = std::slice::Iter<'a, MeasurementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
