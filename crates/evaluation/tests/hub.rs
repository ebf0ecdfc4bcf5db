// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Real-checkpoint tests. They download the google discriminators from the
//! Hugging Face Hub, so they are ignored by default:
//!
//! ```bash
//! cargo test -p evaluation --test hub -- --ignored
//! ```

use discriminator::{HubModelProvider, HubSettings, ModelId, ModelProvider};
use evaluation::{evaluate, scorer, EvaluationConfig};

#[test]
#[ignore = "downloads the small, base and large discriminators from the hub"]
fn test_unmodified_sentence_verified_by_every_default_model() {
    let config = EvaluationConfig {
        sentences: vec!["time is 6 am".to_string()],
        ..EvaluationConfig::default()
    };
    let provider = HubModelProvider::new(&config.hub).unwrap();

    let table = evaluate(&provider, &config).unwrap();

    assert_eq!(table.len(), 3);
    for row in &table {
        assert!(
            row.prediction,
            "{} flagged a token in '{}'",
            row.model, row.sentence
        );
        assert!(row.execution_seconds > 0.0);
        assert!(row.memory_bytes > 0);
    }
}

#[test]
#[ignore = "downloads google/electra-small-discriminator from the hub"]
fn test_small_model_scores_genuine_sentence_per_token() {
    let provider = HubModelProvider::new(&HubSettings::default()).unwrap();
    let model = provider
        .load(&ModelId::from("google/electra-small-discriminator"))
        .unwrap();

    let output = model.infer("time is 6 am").unwrap();

    // [CLS] time is 6 am [SEP]
    assert_eq!(output.len(), 6);
    assert_eq!(output.tokens.first().map(String::as_str), Some("[CLS]"));
    assert_eq!(output.tokens.last().map(String::as_str), Some("[SEP]"));
    assert!(scorer::fact_check(&output), "scores: {:?}", output.scores);
}
