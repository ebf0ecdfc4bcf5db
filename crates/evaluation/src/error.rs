// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for an evaluation run.
//!
//! Every variant that happens mid-run names the model and, where relevant,
//! the sentence index, so the caller can tell which pair failed. The first
//! error aborts the whole run.

use discriminator::DiscriminatorError;
use resource_monitor::MonitorError;

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// The provider could not load the model (unknown id, unreachable hub,
    /// bad weights).
    #[error("failed to load model '{model}': {source}")]
    ModelLoad {
        model: String,
        #[source]
        source: DiscriminatorError,
    },

    /// Tokenization or the forward pass failed for one sentence.
    #[error("inference failed for model '{model}' on sentence {sentence_index}: {source}")]
    Inference {
        model: String,
        sentence_index: usize,
        #[source]
        source: DiscriminatorError,
    },

    /// The resident-set sample after an inference call failed.
    #[error("memory sample failed for model '{model}' on sentence {sentence_index}: {source}")]
    Memory {
        model: String,
        sentence_index: usize,
        #[source]
        source: MonitorError,
    },

    /// The model or sentence lists are unusable.
    #[error("configuration error: {0}")]
    Config(String),
}
