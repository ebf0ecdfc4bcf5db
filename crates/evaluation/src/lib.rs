// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # evaluation
//!
//! Runs ELECTRA discriminators over a sentence list, timing each call and
//! sampling process memory, and collects the results in a [`ResultTable`].
//!
//! The pipeline:
//! - [`MeasurementRunner`]: one model, every sentence, in order; wall-clock
//!   time via `Instant` and the process resident set after each call.
//! - [`scorer::fact_check`]: `true` unless some token's logit is positive.
//! - [`Aggregator`]: loads each model lazily through a
//!   [`ModelProvider`](discriminator::ModelProvider), runs it, scores it,
//!   drops it, and appends rows model-major.
//! - [`report`]: per-model summaries, label agreement and chart series,
//!   derived from a finished table.
//!
//! Everything is synchronous and single-threaded.
//!
//! # Example
//! ```no_run
//! use evaluation::{evaluate, provider_from_config, EvaluationConfig};
//!
//! let config = EvaluationConfig::default();
//! let provider = provider_from_config(&config).unwrap();
//! let table = evaluate(provider.as_ref(), &config).unwrap();
//! for row in &table {
//!     println!("{} | {} | {}", row.model, row.sentence, row.prediction);
//! }
//! ```

mod aggregator;
pub mod config;
mod error;
mod record;
pub mod report;
mod runner;
pub mod scorer;

pub use aggregator::{Aggregator, Checkpoint, Progress};
pub use config::{EvaluationConfig, ProviderKind, Reference};
pub use error::EvalError;
pub use record::{MeasurementRecord, ResultTable};
pub use runner::{Measurement, MeasurementRunner, MemorySampler};

use discriminator::{HubModelProvider, LocalModelProvider, ModelProvider};

/// Evaluates every configured model over every configured sentence.
pub fn evaluate(
    provider: &dyn ModelProvider,
    config: &EvaluationConfig,
) -> Result<ResultTable, EvalError> {
    config.validate()?;
    Aggregator::new(provider).evaluate(&config.models, &config.sentences)
}

/// Builds the provider selected by `config.provider`.
pub fn provider_from_config(
    config: &EvaluationConfig,
) -> Result<Box<dyn ModelProvider>, EvalError> {
    match config.provider {
        ProviderKind::Hub => {
            let hub = HubModelProvider::new(&config.hub)
                .map_err(|e| EvalError::Config(format!("hub client: {e}")))?;
            Ok(Box::new(hub))
        }
        ProviderKind::Local => Ok(Box::new(LocalModelProvider::new(config.local_root.clone()))),
    }
}
